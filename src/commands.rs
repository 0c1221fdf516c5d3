//! Chat commands, independent of the Discord transport.

use tracing::{info, warn};

use crate::formatters::{
    format_concept_message, format_constraint_message, format_error_message, format_help_message,
};
use crate::generator::JamGenerator;
use crate::models::GenerationOutcome;
use crate::templates::TemplateGenerator;

pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard", "insane"];

#[derive(Debug, Clone, PartialEq)]
pub enum JamCommand {
    GenerateConcept {
        genre: Option<String>,
        difficulty: String,
    },
    GenerateConstraint,
    VibeCheck {
        message: String,
    },
    Help,
}

impl JamCommand {
    pub fn name(&self) -> &'static str {
        match self {
            JamCommand::GenerateConcept { .. } => "generate-concept",
            JamCommand::GenerateConstraint => "generate-constraint",
            JamCommand::VibeCheck { .. } => "vibe-check",
            JamCommand::Help => "help",
        }
    }

    /// Whether the reply needs a model round trip, so the platform should be
    /// told to wait before the reply is sent.
    pub fn is_slow(&self) -> bool {
        !matches!(self, JamCommand::Help)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}

impl Reply {
    fn public(content: String) -> Self {
        Self {
            content,
            ephemeral: false,
        }
    }

    fn private(content: String) -> Self {
        Self {
            content,
            ephemeral: true,
        }
    }
}

/// Lower-cases a known difficulty; anything else becomes "medium".
pub fn normalize_difficulty(difficulty: Option<&str>) -> String {
    let difficulty = difficulty.unwrap_or("medium").trim().to_lowercase();
    if DIFFICULTIES.contains(&difficulty.as_str()) {
        difficulty
    } else {
        "medium".to_string()
    }
}

pub async fn execute(generator: &JamGenerator, command: JamCommand) -> Reply {
    info!("Running /{}", command.name());

    match command {
        JamCommand::GenerateConcept { genre, difficulty } => {
            let difficulty = normalize_difficulty(Some(difficulty.as_str()));
            match generator
                .generate_concept(genre.as_deref(), &difficulty, None)
                .await
            {
                GenerationOutcome::Success { value, .. } => {
                    Reply::public(format_concept_message(&value))
                }
                GenerationOutcome::Failure(reason) => {
                    warn!("Concept generation failed: {}", reason);
                    Reply::private(format!(
                        "❌ {}\n\nFalling back to template generation...",
                        reason
                    ))
                }
            }
        }
        JamCommand::GenerateConstraint => {
            let constraint = match generator.generate_constraint(None, None).await {
                GenerationOutcome::Success { value, .. } => value,
                GenerationOutcome::Failure(reason) => {
                    warn!("Constraint generation failed, using a table constraint: {}", reason);
                    TemplateGenerator::new()
                        .generate_additional_constraint()
                        .to_string()
                }
            };
            Reply::public(format_constraint_message(&constraint))
        }
        JamCommand::VibeCheck { message } => {
            match generator.generate_vibe_check(Some(message.as_str()), None).await {
                GenerationOutcome::Success { value, .. } => Reply::public(value),
                GenerationOutcome::Failure(reason) => {
                    warn!("Vibe check failed: {}", reason);
                    Reply::private(format_error_message(&reason.to_string()))
                }
            }
        }
        JamCommand::Help => Reply::public(format_help_message()),
    }
}
