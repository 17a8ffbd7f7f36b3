use super::FlashcardGenerator;
use super::decode::decode_generation_response;
use crate::error::{validate_url, FlashcardError, Result};
use crate::models::Flashcard;
use async_trait::async_trait;
use clap::ValueEnum;
use reqwest::Client;
use serde_json::{json, Value};

pub const DEFAULT_GENERATE_URL: &str = "http://127.0.0.1:8000/generate-flashcards-openai";

/// Which request body the generation service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GenerationContract {
    /// `{"notes": ...}` answered with a bare flashcard array.
    #[default]
    Notes,
    /// `{"text": ...}` answered with a `{status, data}` envelope.
    Envelope,
}

/// Client for a remote text-to-flashcard HTTP service.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    contract: GenerationContract,
}

impl HttpGenerator {
    pub fn new(endpoint: &str, contract: GenerationContract) -> Result<Self> {
        let endpoint = validate_url(endpoint)?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            contract,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_body(&self, notes: &str) -> Value {
        match self.contract {
            GenerationContract::Notes => json!({ "notes": notes }),
            GenerationContract::Envelope => json!({ "text": notes }),
        }
    }
}

#[async_trait]
impl FlashcardGenerator for HttpGenerator {
    fn name(&self) -> String {
        format!("HTTP {}", self.endpoint)
    }

    async fn generate(&self, notes: &str) -> Result<Vec<Flashcard>> {
        tracing::debug!(endpoint = %self.endpoint, contract = ?self.contract, "posting notes");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(notes))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FlashcardError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        decode_generation_response(body)
    }
}
