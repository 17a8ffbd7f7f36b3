use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Please paste some notes first!")]
    EmptyNotes,

    #[error("No flashcards to {0}. Please generate flashcards first.")]
    EmptyDeck(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse flashcards: {0}")]
    Parse(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Generation service reported an error: {0}")]
    Backend(String),

    #[error("Missing credential: set {0}")]
    MissingCredential(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("AI error: {0}")]
    Ai(String),

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

/// Reject anything that is not an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FlashcardError::InvalidUrl(format!(
            "{} (must start with http:// or https://)",
            url
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_message_names_action() {
        let err = FlashcardError::EmptyDeck("submit");
        assert_eq!(
            err.to_string(),
            "No flashcards to submit. Please generate flashcards first."
        );
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert_eq!(
            validate_url(" http://127.0.0.1:8000/x ").unwrap(),
            "http://127.0.0.1:8000/x"
        );
        assert!(validate_url("https://api.mochi.cards/decks").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        let err = validate_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, FlashcardError::InvalidUrl(_)));
        assert!(validate_url("127.0.0.1:8000").is_err());
    }
}
