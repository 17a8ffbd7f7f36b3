use super::FlashcardGenerator;
use super::decode::decode_payload_text;
use crate::error::{FlashcardError, Result};
use crate::models::Flashcard;
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Notes shorter than this get a placeholder card instead of a model call.
pub const MIN_NOTES_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Generates flashcards by prompting a model through OpenRouter directly.
#[derive(Debug)]
pub struct OpenRouterGenerator {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

pub fn build_prompt(notes: &str) -> String {
    format!(
        r#"Generate flashcards from the following notes.
Each flashcard should have a question on the front and the answer on the back.

IMPORTANT:

- Respond ONLY with a JSON array of objects with "front" and "back" fields (no markdown, no extra text):
[
    {{"front": "What is X?", "back": "X is Y"}},
    {{"front": "What is the capital of France?", "back": "Paris"}}
]

Notes:
{}
"#,
        notes
    )
}

pub fn too_short_placeholder() -> Vec<Flashcard> {
    vec![Flashcard::new(
        "Input too short",
        "Add more notes to get a response.",
    )]
}

/// Decode a model reply and drop cards missing either side.
pub fn parse_model_reply(reply: &str) -> Result<Vec<Flashcard>> {
    let cards: Vec<Flashcard> = decode_payload_text(reply)?
        .into_iter()
        .filter(|card| !card.front.trim().is_empty() && !card.back.trim().is_empty())
        .collect();

    if cards.is_empty() {
        return Err(FlashcardError::Parse(
            "No valid flashcards were generated".to_string(),
        ));
    }
    Ok(cards)
}

impl OpenRouterGenerator {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = openrouter_api::OpenRouterClient::quick().map_err(|e| {
            FlashcardError::Ai(format!("Failed to create OpenRouter client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            Message::text(
                "system",
                "You are a helpful assistant that generates flashcards from notes.",
            ),
            Message::text("user", prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| FlashcardError::Ai(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| FlashcardError::Ai(format!("OpenRouter API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| FlashcardError::Ai("No response choices received".to_string()))?;

        match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
            openrouter_api::MessageContent::Parts(parts) => Ok(parts
                .iter()
                .filter_map(|p| match p {
                    openrouter_api::ContentPart::Text(tc) => Some(tc.text.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

#[async_trait]
impl FlashcardGenerator for OpenRouterGenerator {
    fn name(&self) -> String {
        format!("OpenRouter {}", self.config.model)
    }

    async fn generate(&self, notes: &str) -> Result<Vec<Flashcard>> {
        let notes = notes.trim();
        if notes.chars().count() < MIN_NOTES_CHARS {
            tracing::info!(chars = notes.chars().count(), "notes below minimum length");
            return Ok(too_short_placeholder());
        }

        let reply = self.complete(&build_prompt(notes)).await?;
        tracing::debug!(reply = %reply, "raw model reply");
        parse_model_reply(&reply)
    }
}
