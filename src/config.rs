use crate::deck::{DeckService, MochiClient, DEFAULT_DECK_API_URL, DEFAULT_DECK_NAME};
use crate::error::Result;
use crate::generation::http::DEFAULT_GENERATE_URL;
use crate::generation::{
    FlashcardGenerator, GenerationContract, HttpGenerator, ModelConfig, OpenRouterGenerator,
    DEFAULT_MODEL,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Post notes to a flashcard generation service.
    #[default]
    Http,
    /// Prompt a model through OpenRouter (reads OPENROUTER_API_KEY).
    Openrouter,
}

/// Turn pasted notes into flashcards, preview them, send them to Mochi or save them as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "flashcard-generator", version, about)]
pub struct Config {
    #[arg(long, env = "FLASHCARDS_BACKEND", value_enum, default_value_t = Backend::Http)]
    pub backend: Backend,

    #[arg(long, env = "FLASHCARDS_GENERATE_URL", default_value = DEFAULT_GENERATE_URL)]
    pub generate_url: String,

    /// Request/response contract of the generation service.
    #[arg(long, env = "FLASHCARDS_CONTRACT", value_enum, default_value_t = GenerationContract::Notes)]
    pub contract: GenerationContract,

    #[arg(long, env = "FLASHCARDS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "MOCHI_API_URL", default_value = DEFAULT_DECK_API_URL)]
    pub deck_api_url: String,

    #[arg(long, env = "MOCHI_API_KEY", hide_env_values = true)]
    pub deck_api_key: Option<String>,

    #[arg(long, env = "FLASHCARDS_DECK_NAME", default_value = DEFAULT_DECK_NAME)]
    pub deck_name: String,

    /// Directory that receives flashcards.json.
    #[arg(long, env = "FLASHCARDS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, env = "FLASHCARDS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn build_generator(&self) -> Result<Arc<dyn FlashcardGenerator>> {
        Ok(match self.backend {
            Backend::Http => Arc::new(HttpGenerator::new(&self.generate_url, self.contract)?),
            Backend::Openrouter => Arc::new(OpenRouterGenerator::new(ModelConfig {
                model: self.model.clone(),
                ..ModelConfig::default()
            })?),
        })
    }

    pub fn build_deck_service(&self) -> Result<Arc<dyn DeckService>> {
        Ok(Arc::new(MochiClient::new(
            &self.deck_api_url,
            self.deck_api_key.clone(),
        )?))
    }
}
