//! Prompt text sent to the model, one template per generation kind.

use crate::models::GenerationRequest;

pub const NO_CONTEXT: &str = "No additional context provided.";
pub const DEFAULT_EXISTING_CONCEPT: &str = "A game jam project in progress";
pub const DEFAULT_VIBE_MESSAGE: &str = "Just checking in";

pub const CONCEPT_PROMPT: &str = r#"You are a creative game jam assistant helping developers come up with interesting game concepts.

Generate a unique game concept in this EXACT format:

Genre: [genre name]
Setting: [setting description]
Core Mechanic: [brief, open-ended mechanic - keep it concise, 2-5 words max]
Theme: [theme/tone]
Special Constraint: [one creative constraint]

Guidelines:
- Core Mechanic should be brief and open-ended (e.g., "Time manipulation", "Gravity switching", "Resource trading") - give developers creative freedom
- Be CREATIVE and UNEXPECTED - don't limit yourself to common genres, settings, or mechanics. Think outside the box!
- AVOID repetitive settings - vary your settings significantly. Don't repeatedly use libraries, bookstores, or similar knowledge-based locations. Explore diverse environments!
- Genres can be unique combinations or new concepts (e.g., "Rhythm-based Metroidvania", "Cozy Horror", "Reverse Tower Defense")
- Settings should be diverse and creative (e.g., "Inside a living organism", "A world made of sound", "A collapsing space station", "A city that rebuilds itself daily", "The space between thoughts", "A factory that produces emotions", "An ocean of clouds")
- Mechanics should be innovative and open-ended to spark creativity
- Themes can be abstract or unique (e.g., "Impermanence", "Miscommunication", "The uncanny")
- Constraints should be creative and challenging
- Make the constraints synergize in interesting ways
- Keep the scope realistic for a {duration}-hour jam

Tone: {tone} (encouraging/sarcastic/neutral)

IMPORTANT: Respond ONLY in the format above with the 5 fields. Do not write a full game description or narrative. Just provide the 5 structured fields.

Generate the concept now:"#;

pub const CONSTRAINT_PROMPT: &str = r#"You are a creative game jam assistant. A developer is working on a game with these constraints:

{existing_concept}

Generate one additional creative constraint that complements the existing concept and makes it more interesting or challenging. The constraint should:
- Work well with the existing elements
- Add a new layer of challenge or creativity
- Be realistic for a game jam scope

Tone: {tone}

Provide just the constraint description (1-2 sentences):"#;

pub const COMMENTARY_PROMPT: &str = r#"You are a game jam assistant bot with personality. A developer just shared this update:

"{user_message}"

{context_info}

Provide a brief (2-3 sentence) response that:
1. Acknowledges their progress or situation
2. Provides light commentary (be {tone})
3. Keeps them motivated

Be concise, friendly, and match the {tone} tone. Response:"#;

pub const VIBE_CHECK_PROMPT: &str = r#"You are a game jam assistant bot with personality. A developer is checking in with you:

"{user_message}"

Provide a brief, {tone} response (2-4 sentences) that:
- Acknowledges their situation
- Provides encouragement, humor, or practical advice (depending on tone)
- Keeps them motivated to continue

Be concise and engaging. Response:"#;

pub fn concept_prompt(duration: u32, tone: &str, genre: Option<&str>) -> String {
    let prompt = CONCEPT_PROMPT
        .replace("{duration}", &duration.to_string())
        .replace("{tone}", tone);

    match genre.filter(|g| !g.is_empty()) {
        Some(genre) => format!("Genre preference: {}\n\n{}", genre, prompt),
        None => prompt,
    }
}

pub fn constraint_prompt(existing_concept: Option<&str>, tone: &str) -> String {
    CONSTRAINT_PROMPT.replace("{tone}", tone).replace(
        "{existing_concept}",
        non_empty_or(existing_concept, DEFAULT_EXISTING_CONCEPT),
    )
}

pub fn commentary_prompt(user_message: &str, context_info: Option<&str>, tone: &str) -> String {
    // User text goes in last so braces inside it are never substituted.
    COMMENTARY_PROMPT
        .replace("{tone}", tone)
        .replace("{context_info}", non_empty_or(context_info, NO_CONTEXT))
        .replace("{user_message}", user_message)
}

pub fn vibe_check_prompt(user_message: Option<&str>, tone: &str) -> String {
    VIBE_CHECK_PROMPT.replace("{tone}", tone).replace(
        "{user_message}",
        non_empty_or(user_message, DEFAULT_VIBE_MESSAGE),
    )
}

/// Renders the prompt for any request.
pub fn build(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Concept {
            genre,
            tone,
            duration,
            ..
        } => concept_prompt(*duration, tone, genre.as_deref()),
        GenerationRequest::Constraint {
            existing_concept,
            tone,
        } => constraint_prompt(existing_concept.as_deref(), tone),
        GenerationRequest::Commentary {
            user_message,
            context_info,
            tone,
        } => commentary_prompt(user_message, context_info.as_deref(), tone),
        GenerationRequest::VibeCheck { user_message, tone } => {
            vibe_check_prompt(user_message.as_deref(), tone)
        }
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}
