pub mod config;
pub mod controller;
pub mod deck;
pub mod error;
pub mod export;
pub mod generation;
pub mod input;
pub mod logger;
pub mod models;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use controller::{ActionOutcome, FlashcardController, SessionState};
pub use deck::{DeckService, MochiClient};
pub use error::{FlashcardError, Result};
pub use export::{export_cards, EXPORT_FILE_NAME};
pub use generation::{FlashcardGenerator, GenerationContract, HttpGenerator, OpenRouterGenerator};
pub use models::{CardView, Flashcard, Notification};
