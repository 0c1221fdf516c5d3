use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::GenerationSettings;
use crate::error::GenerationError;
use crate::models::{AiConcept, Concept, GenerationOutcome, GenerationRequest};
use crate::ollama::TextGenerator;
use crate::prompts;
use crate::templates::{TemplateGenerator, GENRES};

/// Sentences of a model answer containing any of these are kept as the
/// concept's explanation.
pub const EXPLANATION_KEYWORDS: &[&str] = &["why", "because", "this works", "synergy", "interesting"];

/// Canned replies for kinds that have no template equivalent.
struct Encouragement {
    unavailable: &'static str,
    empty: &'static str,
    error: &'static str,
}

const COMMENTARY_FALLBACK: Encouragement = Encouragement {
    unavailable: "AI service unavailable. Keep up the great work!",
    empty: "Keep pushing forward! You've got this! 💪",
    error: "Keep up the great work! 🚀",
};

const VIBE_CHECK_FALLBACK: Encouragement = Encouragement {
    unavailable: "AI service unavailable, but I'm here to cheer you on! 🎮",
    empty: "You're doing great! Keep it up! 💪",
    error: "Stay strong and keep coding! 🚀",
};

/// Tries the model first and falls back to the template tables (or a canned
/// line) whenever it is down, silent, or misconfigured.
///
/// Only immutable state lives here, so one instance behind an `Arc` serves
/// every concurrent command.
pub struct JamGenerator {
    client: Arc<dyn TextGenerator>,
    templates: TemplateGenerator,
    settings: GenerationSettings,
}

impl JamGenerator {
    pub fn new(client: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            client,
            templates: TemplateGenerator::new(),
            settings,
        }
    }

    pub async fn generate_concept(
        &self,
        genre: Option<&str>,
        difficulty: &str,
        tone: Option<&str>,
    ) -> GenerationOutcome<Concept> {
        let request = GenerationRequest::Concept {
            genre: genre.map(str::to_string),
            difficulty: difficulty.to_string(),
            tone: self.tone(tone),
            duration: self.settings.jam_duration,
        };

        match self.ask_model(&request).await {
            Ok(text) => GenerationOutcome::ai(Concept::Ai(parse_ai_concept(
                &text,
                genre,
                difficulty,
                self.settings.jam_duration,
            ))),
            Err(reason) => self.fall_back(reason, || {
                Concept::Template(self.templates.generate_concept(genre, difficulty))
            }),
        }
    }

    pub async fn generate_constraint(
        &self,
        existing_concept: Option<&str>,
        tone: Option<&str>,
    ) -> GenerationOutcome<String> {
        let request = GenerationRequest::Constraint {
            existing_concept: existing_concept.map(str::to_string),
            tone: self.tone(tone),
        };

        match self.ask_model(&request).await {
            Ok(text) => GenerationOutcome::ai(clean_constraint(&text)),
            Err(reason) => self.fall_back(reason, || {
                self.templates.generate_additional_constraint().to_string()
            }),
        }
    }

    pub async fn generate_commentary(
        &self,
        user_message: &str,
        context_info: Option<&str>,
        tone: Option<&str>,
    ) -> GenerationOutcome<String> {
        let request = GenerationRequest::Commentary {
            user_message: user_message.to_string(),
            context_info: context_info.map(str::to_string),
            tone: self.tone(tone),
        };
        self.encourage(&request, &COMMENTARY_FALLBACK).await
    }

    pub async fn generate_vibe_check(
        &self,
        user_message: Option<&str>,
        tone: Option<&str>,
    ) -> GenerationOutcome<String> {
        let request = GenerationRequest::VibeCheck {
            user_message: user_message.map(str::to_string),
            tone: self.tone(tone),
        };
        self.encourage(&request, &VIBE_CHECK_FALLBACK).await
    }

    async fn encourage(
        &self,
        request: &GenerationRequest,
        fallback: &Encouragement,
    ) -> GenerationOutcome<String> {
        match self.ask_model(request).await {
            Ok(text) => GenerationOutcome::ai(text),
            Err(reason) => {
                let line = match reason {
                    GenerationError::Unavailable => fallback.unavailable,
                    GenerationError::Empty => fallback.empty,
                    GenerationError::Internal(_) => fallback.error,
                };
                self.fall_back(reason, || line.to_string())
            }
        }
    }

    /// Probe, build, generate. Every way this can go wrong ends up as a
    /// `GenerationError`; nothing escapes as a panic or transport error.
    async fn ask_model(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let kind = request.kind();

        if let Err(e) = self.settings.validate() {
            error!("Refusing {:?} generation with bad settings: {}", kind, e);
            return Err(GenerationError::Internal(e.to_string()));
        }

        if !self.client.is_available().await {
            info!("Ollama not available for {:?}, skipping generation", kind);
            return Err(GenerationError::Unavailable);
        }

        let prompt = prompts::build(request);
        debug!("Generating {:?} with AI", kind);

        match self.client.generate(&prompt).await {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => {
                warn!("AI generation for {:?} returned nothing", kind);
                Err(GenerationError::Empty)
            }
        }
    }

    fn fall_back<T>(
        &self,
        reason: GenerationError,
        template: impl FnOnce() -> T,
    ) -> GenerationOutcome<T> {
        if self.settings.enable_ai_fallback {
            debug!("Falling back to template output ({})", reason);
            GenerationOutcome::template(template())
        } else {
            GenerationOutcome::Failure(reason)
        }
    }

    fn tone(&self, tone: Option<&str>) -> String {
        tone.filter(|t| !t.trim().is_empty())
            .unwrap_or(self.settings.default_tone.as_str())
            .to_string()
    }
}

/// Lossy extraction of concept fields from free model text.
///
/// - `description` is the text verbatim.
/// - `genre` is the requested genre, else the first table genre (table order)
///   found anywhere in the text, case-insensitively.
/// - `explanation` joins, with single spaces, the trimmed `.`-separated pieces
///   that contain an [`EXPLANATION_KEYWORDS`] entry.
///
/// Callers must treat `genre` and `explanation` as hints only.
pub fn parse_ai_concept(
    response: &str,
    genre: Option<&str>,
    difficulty: &str,
    duration: u32,
) -> AiConcept {
    let lowered = response.to_lowercase();

    let genre = match genre.map(str::trim).filter(|g| !g.is_empty()) {
        Some(g) => Some(g.to_string()),
        None => GENRES
            .iter()
            .find(|g| lowered.contains(&g.to_lowercase()))
            .map(|g| g.to_string()),
    };

    let explanation: Vec<&str> = response
        .split('.')
        .filter(|sentence| {
            let sentence = sentence.to_lowercase();
            EXPLANATION_KEYWORDS.iter().any(|k| sentence.contains(k))
        })
        .map(str::trim)
        .collect();

    AiConcept {
        description: response.to_string(),
        explanation: (!explanation.is_empty()).then(|| explanation.join(" ")),
        genre,
        time_limit: duration,
        difficulty: difficulty.to_string(),
    }
}

fn clean_constraint(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use crate::templates::{CONSTRAINTS, MECHANICS, SETTINGS, THEMES, TIME_LIMITS};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted stand-in for the Ollama client.
    struct FakeClient {
        available: bool,
        replies: Mutex<VecDeque<Option<String>>>,
        probes: AtomicUsize,
        generations: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(available: bool, replies: Vec<Option<&str>>) -> Arc<Self> {
            Arc::new(Self {
                available,
                replies: Mutex::new(replies.into_iter().map(|r| r.map(String::from)).collect()),
                probes: AtomicUsize::new(0),
                generations: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn generations(&self) -> usize {
            self.generations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for FakeClient {
        async fn is_available(&self) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        async fn generate(&self, prompt: &str) -> Option<String> {
            self.generations.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().pop_front().flatten()
        }
    }

    fn generator(client: Arc<FakeClient>, fallback: bool) -> JamGenerator {
        JamGenerator::new(
            client,
            GenerationSettings {
                enable_ai_fallback: fallback,
                ..GenerationSettings::default()
            },
        )
    }

    fn assert_full_template_concept(concept: &Concept, difficulty: &str) {
        match concept {
            Concept::Template(c) => {
                assert!(GENRES.contains(&c.genre));
                assert!(SETTINGS.contains(&c.setting));
                assert!(MECHANICS.contains(&c.mechanic));
                assert!(THEMES.contains(&c.theme));
                assert!(CONSTRAINTS.contains(&c.constraint));
                assert!(TIME_LIMITS.contains(&c.time_limit));
                assert_eq!(c.difficulty, difficulty);
            }
            Concept::Ai(_) => panic!("expected a template concept"),
        }
    }

    #[tokio::test]
    async fn test_unavailable_never_generates() {
        let client = FakeClient::new(false, vec![Some("never used")]);
        let jam = generator(client.clone(), true);

        let outcome = jam.generate_concept(None, "hard", None).await;

        assert_eq!(client.generations(), 0);
        assert_eq!(outcome.source(), Some(Source::Template));
        let concept = outcome.into_value().unwrap();
        assert!(!concept.is_ai());
        assert_full_template_concept(&concept, "hard");
    }

    #[tokio::test]
    async fn test_unavailable_without_fallback_fails() {
        let client = FakeClient::new(false, vec![]);
        let jam = generator(client.clone(), false);

        let outcome = jam.generate_concept(None, "medium", None).await;

        assert_eq!(client.generations(), 0);
        assert_eq!(outcome, GenerationOutcome::Failure(GenerationError::Unavailable));
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back_like_unavailable() {
        let client = FakeClient::new(true, vec![Some("   ")]);
        let jam = generator(client.clone(), true);

        let outcome = jam.generate_concept(None, "hard", None).await;

        assert_eq!(client.generations(), 1);
        assert_eq!(outcome.source(), Some(Source::Template));
        assert_full_template_concept(&outcome.into_value().unwrap(), "hard");
    }

    #[tokio::test]
    async fn test_no_reply_without_fallback_fails() {
        let client = FakeClient::new(true, vec![None]);
        let jam = generator(client, false);

        let outcome = jam.generate_constraint(None, None).await;
        assert_eq!(outcome, GenerationOutcome::Failure(GenerationError::Empty));
    }

    #[tokio::test]
    async fn test_ai_concept_is_tagged_and_parsed() {
        let reply = "Genre: Roguelike\nSetting: Space station. This works because the constraint synergy is interesting.";
        let client = FakeClient::new(true, vec![Some(reply)]);
        let jam = generator(client.clone(), true);

        let outcome = jam.generate_concept(None, "insane", Some("sarcastic")).await;
        assert_eq!(outcome.source(), Some(Source::Ai));

        match outcome.into_value().unwrap() {
            Concept::Ai(c) => {
                assert_eq!(c.description, reply);
                assert_eq!(c.genre.as_deref(), Some("Roguelike"));
                assert_eq!(
                    c.explanation.as_deref(),
                    Some("This works because the constraint synergy is interesting")
                );
                assert_eq!(c.time_limit, 48);
                assert_eq!(c.difficulty, "insane");
            }
            Concept::Template(_) => panic!("expected an AI concept"),
        }

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("Tone: sarcastic"));
        assert!(prompts[0].contains("48-hour jam"));
    }

    #[tokio::test]
    async fn test_constraint_quotes_stripped() {
        let client = FakeClient::new(true, vec![Some("  \"Every level is a single screen\"  ")]);
        let jam = generator(client.clone(), true);

        let outcome = jam.generate_constraint(None, None).await;
        assert_eq!(
            outcome,
            GenerationOutcome::ai("Every level is a single screen".to_string())
        );
        assert!(client.prompts.lock().unwrap()[0].contains("A game jam project in progress"));
    }

    #[tokio::test]
    async fn test_constraint_fallback_from_table() {
        let jam = generator(FakeClient::new(false, vec![]), true);
        let constraint = jam.generate_constraint(None, None).await.into_value().unwrap();
        assert!(CONSTRAINTS.contains(&constraint.as_str()));
    }

    #[tokio::test]
    async fn test_vibe_check_fallback_lines() {
        let jam = generator(FakeClient::new(false, vec![]), true);
        assert_eq!(
            jam.generate_vibe_check(None, None).await,
            GenerationOutcome::template(VIBE_CHECK_FALLBACK.unavailable.to_string())
        );

        let client = FakeClient::new(true, vec![None]);
        let jam = generator(client.clone(), true);
        assert_eq!(
            jam.generate_vibe_check(Some(""), None).await,
            GenerationOutcome::template(VIBE_CHECK_FALLBACK.empty.to_string())
        );
        assert!(client.prompts.lock().unwrap()[0].contains("\"Just checking in\""));
    }

    #[tokio::test]
    async fn test_commentary_uses_context_placeholder() {
        let client = FakeClient::new(true, vec![Some("Nice work on the controller!")]);
        let jam = generator(client.clone(), true);

        let outcome = jam
            .generate_commentary("Finished the player controller", None, None)
            .await;
        assert_eq!(
            outcome,
            GenerationOutcome::ai("Nice work on the controller!".to_string())
        );
        assert!(client.prompts.lock().unwrap()[0].contains(prompts::NO_CONTEXT));
    }

    #[tokio::test]
    async fn test_bad_settings_become_failure_or_fallback() {
        let client = FakeClient::new(true, vec![Some("unused")]);
        let jam = JamGenerator::new(
            client.clone(),
            GenerationSettings {
                jam_duration: 0,
                enable_ai_fallback: false,
                ..GenerationSettings::default()
            },
        );

        match jam.generate_concept(None, "easy", None).await {
            GenerationOutcome::Failure(GenerationError::Internal(msg)) => {
                assert!(msg.contains("jam duration"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(client.generations(), 0);

        let jam = JamGenerator::new(
            client,
            GenerationSettings {
                jam_duration: 0,
                ..GenerationSettings::default()
            },
        );
        assert_eq!(
            jam.generate_commentary("hi", None, None).await,
            GenerationOutcome::template(COMMENTARY_FALLBACK.error.to_string())
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_generator() {
        let client = FakeClient::new(false, vec![]);
        let jam = Arc::new(generator(client.clone(), true));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let jam = Arc::clone(&jam);
                tokio::spawn(async move { jam.generate_concept(Some("puzzle"), "easy", None).await })
            })
            .collect();

        for handle in handles {
            let concept = handle.await.unwrap().into_value().unwrap();
            assert_eq!(concept.genre(), Some("Puzzle"));
        }
        assert_eq!(client.probes.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_parse_explanation_pinned_example() {
        let concept = parse_ai_concept(
            "Setting: Space station. This works because the constraint synergy is interesting.",
            None,
            "medium",
            48,
        );
        assert_eq!(
            concept.explanation.as_deref(),
            Some("This works because the constraint synergy is interesting")
        );
        assert_eq!(concept.genre, None);
    }

    #[test]
    fn test_parse_genre_table_order_not_text_order() {
        // "Horror" appears first in the text but "Puzzle" comes first in the table.
        let concept = parse_ai_concept("A horror puzzle game", None, "easy", 24);
        assert_eq!(concept.genre.as_deref(), Some("Puzzle"));
        assert_eq!(concept.explanation, None);
    }

    #[test]
    fn test_parse_supplied_genre_kept_verbatim() {
        let concept = parse_ai_concept("A horror game", Some("cozy farming"), "easy", 24);
        assert_eq!(concept.genre.as_deref(), Some("cozy farming"));
    }

    #[test]
    fn test_parse_blank_genre_scans_text() {
        let concept = parse_ai_concept("A Puzzle game", Some(""), "easy", 48);
        assert_eq!(concept.genre.as_deref(), Some("Puzzle"));

        let concept = parse_ai_concept("A Puzzle game", Some("   "), "easy", 48);
        assert_eq!(concept.genre.as_deref(), Some("Puzzle"));
    }

    #[test]
    fn test_parse_joins_multiple_explanations() {
        let concept = parse_ai_concept(
            "Genre: Stealth. Why? The dark hides you. Light is interesting here.",
            None,
            "hard",
            48,
        );
        assert_eq!(
            concept.explanation.as_deref(),
            Some("Why? The dark hides you Light is interesting here")
        );
    }
}
