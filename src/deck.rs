use crate::error::{validate_url, FlashcardError, Result};
use crate::models::Flashcard;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_DECK_API_URL: &str = "https://api.mochi.cards/decks";
pub const DEFAULT_DECK_NAME: &str = "New Flashcard Deck";
pub const API_KEY_ENV: &str = "MOCHI_API_KEY";

/// Remote service that stores named decks.
#[async_trait]
pub trait DeckService: Send + Sync {
    async fn create_deck(&self, name: &str, cards: &[Flashcard]) -> Result<()>;
}

#[derive(Debug, Serialize)]
pub struct DeckRequest<'a> {
    pub name: &'a str,
    pub cards: &'a [Flashcard],
}

#[derive(Debug, Clone)]
pub struct MochiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl MochiClient {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self> {
        let endpoint = validate_url(endpoint)?;
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl DeckService for MochiClient {
    async fn create_deck(&self, name: &str, cards: &[Flashcard]) -> Result<()> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FlashcardError::MissingCredential(API_KEY_ENV))?;

        tracing::debug!(endpoint = %self.endpoint, name, cards = cards.len(), "creating deck");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&DeckRequest { name, cards })
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

        Ok(())
    }
}
