pub mod decode;
pub mod http;
pub mod openrouter;

use crate::error::Result;
use crate::models::Flashcard;
use async_trait::async_trait;

pub use decode::{clean_json_response, decode_generation_response, decode_payload_text};
pub use http::{GenerationContract, HttpGenerator};
pub use openrouter::{ModelConfig, OpenRouterGenerator, DEFAULT_MODEL};

/// Turns raw notes into flashcards. Implementations own their network boundary.
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    /// Short label shown in the header.
    fn name(&self) -> String;

    async fn generate(&self, notes: &str) -> Result<Vec<Flashcard>>;
}
