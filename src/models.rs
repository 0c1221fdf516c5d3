use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

// Ollama Models
#[derive(Serialize, Debug, Clone)]
pub struct OllamaRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct OllamaResponse {
    #[serde(default)]
    pub response: String,
}

// Concept Models

/// Concept assembled from the fixed category tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConcept {
    pub genre: &'static str,
    pub setting: &'static str,
    pub mechanic: &'static str,
    pub theme: &'static str,
    pub constraint: &'static str,
    pub time_limit: u32,
    pub difficulty: String,
}

/// Concept written by the model. `genre` and `explanation` are best-effort
/// hints scraped from free text and may be wrong or missing.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConcept {
    pub description: String,
    pub explanation: Option<String>,
    pub genre: Option<String>,
    pub time_limit: u32,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Concept {
    Template(TemplateConcept),
    Ai(AiConcept),
}

impl Concept {
    pub fn is_ai(&self) -> bool {
        matches!(self, Concept::Ai(_))
    }

    pub fn genre(&self) -> Option<&str> {
        match self {
            Concept::Template(c) => Some(c.genre),
            Concept::Ai(c) => c.genre.as_deref(),
        }
    }
}

// Generation Models

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Concept,
    Constraint,
    Commentary,
    VibeCheck,
}

/// One generation call's parameters. Built per call and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Concept {
        genre: Option<String>,
        difficulty: String,
        tone: String,
        duration: u32,
    },
    Constraint {
        existing_concept: Option<String>,
        tone: String,
    },
    Commentary {
        user_message: String,
        context_info: Option<String>,
        tone: String,
    },
    VibeCheck {
        user_message: Option<String>,
        tone: String,
    },
}

impl GenerationRequest {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationRequest::Concept { .. } => GenerationKind::Concept,
            GenerationRequest::Constraint { .. } => GenerationKind::Constraint,
            GenerationRequest::Commentary { .. } => GenerationKind::Commentary,
            GenerationRequest::VibeCheck { .. } => GenerationKind::VibeCheck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Ai,
    Template,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome<T> {
    Success { value: T, source: Source },
    Failure(GenerationError),
}

impl<T> GenerationOutcome<T> {
    pub fn ai(value: T) -> Self {
        GenerationOutcome::Success {
            value,
            source: Source::Ai,
        }
    }

    pub fn template(value: T) -> Self {
        GenerationOutcome::Success {
            value,
            source: Source::Template,
        }
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            GenerationOutcome::Success { source, .. } => Some(*source),
            GenerationOutcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Result<T, GenerationError> {
        match self {
            GenerationOutcome::Success { value, .. } => Ok(value),
            GenerationOutcome::Failure(reason) => Err(reason),
        }
    }
}
