use thiserror::Error;

/// Why a generation call produced no usable value. Only surfaces to callers
/// when template fallback is switched off.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("AI service unavailable")]
    Unavailable,
    #[error("AI generation failed")]
    Empty,
    #[error("Generation error: {0}")]
    Internal(String),
}

/// A single failed HTTP attempt inside the Ollama client.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("Ollama API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request timeout")]
    Timeout,
    #[error("Connection error")]
    Connection,
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AttemptError::Timeout
        } else if err.is_connect() {
            AttemptError::Connection
        } else {
            AttemptError::Other(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reasons_read_like_messages() {
        assert_eq!(GenerationError::Unavailable.to_string(), "AI service unavailable");
        assert_eq!(GenerationError::Empty.to_string(), "AI generation failed");
        assert_eq!(
            GenerationError::Internal("bad config".into()).to_string(),
            "Generation error: bad config"
        );
    }
}
