use rand::seq::SliceRandom;

use crate::models::{AiConcept, Concept, TemplateConcept};

const HEADER: &str = "🎮 Game Jam Concept Generator 🎮\n\n";

const AI_CLOSINGS: &[&str] = &[
    "Now stop reading and start coding! ⏰",
    "Good luck, you'll need it! 🎲",
    "Time to make something awesome! 🚀",
];

const CONSTRAINT_CLOSINGS: &[&str] = &[
    "May the odds be ever in your favor... 📐",
    "Just when you thought it couldn't get harder... 😏",
    "Because why make it easy? 🎯",
    "Your game just got more interesting! 🎨",
];

pub fn format_concept_message(concept: &Concept) -> String {
    match concept {
        Concept::Ai(c) => format_ai_concept(c),
        Concept::Template(c) => format_template_concept(c),
    }
}

fn format_ai_concept(concept: &AiConcept) -> String {
    let mut message = String::from(HEADER);
    message.push_str(&concept.description);

    if let Some(explanation) = &concept.explanation {
        message.push_str(&format!("\n\n{}", explanation));
    }

    message.push_str(&format!("\n\nTime Limit: {} hours", concept.time_limit));
    message.push_str(&format!("\nDifficulty: {}", title_case(&concept.difficulty)));
    message.push_str(&format!("\n\n{}", closing(AI_CLOSINGS)));
    message
}

fn format_template_concept(concept: &TemplateConcept) -> String {
    let mut message = String::from(HEADER);
    message.push_str(&format!("**Genre:** {}\n", concept.genre));
    message.push_str(&format!("**Setting:** {}\n", concept.setting));
    message.push_str(&format!("**Core Mechanic:** {}\n", concept.mechanic));
    message.push_str(&format!("**Theme:** {}\n", concept.theme));
    message.push_str(&format!("**Special Constraint:** {}\n", concept.constraint));
    message.push_str(&format!("**Time Limit:** {} hours\n", concept.time_limit));
    message.push_str("\nGood luck, you'll need it! 🎲");
    message
}

pub fn format_constraint_message(constraint: &str) -> String {
    format!(
        "**Additional Constraint:** {}\n\n{}",
        constraint,
        closing(CONSTRAINT_CLOSINGS)
    )
}

pub fn format_error_message(error: &str) -> String {
    format!(
        "❌ **Error:** {}\n\nPlease try again or use `/help` for assistance.",
        error
    )
}

pub fn format_help_message() -> String {
    let mut message = String::from("🎮 **Game Jam Assistant Bot** 🎮\n\n");
    message.push_str("**Available Commands:**\n\n");

    message.push_str("`/generate-concept [genre] [difficulty]`\n");
    message.push_str("Generate a random game concept with constraints.\n");
    message.push_str("• `genre` (optional): Specify a genre (platformer, rpg, puzzle, etc.)\n");
    message.push_str("• `difficulty` (optional): Easy, Medium, Hard, Insane\n\n");

    message.push_str("`/generate-constraint`\n");
    message.push_str("Add one more constraint to your existing concept.\n\n");

    message.push_str("`/vibe-check [message]`\n");
    message.push_str("Get AI commentary on your current progress/mood.\n");
    message.push_str("• `message` (optional): Your current status or situation\n\n");

    message.push_str("`/help`\n");
    message.push_str("Show this help message.\n\n");

    message.push_str("---\n");
    message.push_str("Need help? The bot uses AI to generate creative concepts and provide encouragement during your game jams!");
    message
}

fn closing(lines: &[&'static str]) -> &'static str {
    lines
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_concept() -> TemplateConcept {
        TemplateConcept {
            genre: "Puzzle",
            setting: "Museum",
            mechanic: "Time loop",
            theme: "Memory",
            constraint: "Only 3 colors",
            time_limit: 72,
            difficulty: "hard".to_string(),
        }
    }

    #[test]
    fn test_template_layout() {
        let message = format_concept_message(&Concept::Template(template_concept()));
        assert!(message.starts_with(HEADER));
        assert!(message.contains("**Genre:** Puzzle\n"));
        assert!(message.contains("**Core Mechanic:** Time loop\n"));
        assert!(message.contains("**Special Constraint:** Only 3 colors\n"));
        assert!(message.contains("**Time Limit:** 72 hours\n"));
        assert!(message.ends_with("Good luck, you'll need it! 🎲"));
    }

    #[test]
    fn test_ai_layout() {
        let concept = Concept::Ai(AiConcept {
            description: "Genre: Rhythm\nSetting: A world made of sound".to_string(),
            explanation: Some("This works because sound is the world".to_string()),
            genre: Some("Rhythm".to_string()),
            time_limit: 48,
            difficulty: "insane".to_string(),
        });
        let message = format_concept_message(&concept);
        assert!(message.contains("Setting: A world made of sound\n\nThis works because sound is the world"));
        assert!(message.contains("\n\nTime Limit: 48 hours\nDifficulty: Insane\n\n"));
        assert!(AI_CLOSINGS.iter().any(|c| message.ends_with(c)));
    }

    #[test]
    fn test_constraint_message() {
        let message = format_constraint_message("No jumping");
        assert!(message.starts_with("**Additional Constraint:** No jumping\n\n"));
        assert!(CONSTRAINT_CLOSINGS.iter().any(|c| message.ends_with(c)));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = format_help_message();
        for command in ["/generate-concept", "/generate-constraint", "/vibe-check", "/help"] {
            assert!(help.contains(command), "missing {}", command);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hard"), "Hard");
        assert_eq!(title_case("mEDIUM rare"), "Medium Rare");
        assert_eq!(title_case(""), "");
    }
}
