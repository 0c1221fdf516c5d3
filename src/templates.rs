use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::TemplateConcept;

pub const GENRES: &[&str] = &[
    "Platformer", "Puzzle", "RPG", "Roguelike", "Metroidvania", "Visual Novel",
    "Tower Defense", "Card Game", "Rhythm", "Racing", "Fighting", "Stealth",
    "Survival", "Strategy", "Adventure", "Point-and-Click", "Idle", "Management",
    "Simulation", "Horror", "Action", "Shooter", "Sports", "Educational",
];

pub const SETTINGS: &[&str] = &[
    "Space station", "Medieval castle", "Cyberpunk city", "Underwater",
    "Post-apocalyptic", "Fantasy forest", "Desert wasteland", "Corporate office",
    "Haunted mansion", "School", "Laboratory", "Alien planet", "Dream world",
    "Tiny world (microscopic)", "Giant world (macro)", "Inside a computer",
    "Ancient ruins", "Suburban neighborhood", "Abandoned factory", "Museum",
    "Library", "Prison", "Hospital", "Airport", "Shopping mall", "Theme park",
    "Cemetery", "Beach", "Mountain peak", "Underground cave", "Floating island",
];

pub const MECHANICS: &[&str] = &[
    "Time loop", "Gravity manipulation", "Portal creation", "Shape-shifting",
    "Resource management", "Dialogue choices", "Crafting system", "Permadeath",
    "Procedural generation", "Limited inventory", "One-button control",
    "Memory-based puzzles", "Physics-based", "Asymmetric multiplayer",
    "Deck building", "Turn-based combat", "Real-time strategy", "Stealth mechanics",
    "Parkour movement", "Building/construction", "Trading", "Farming",
    "Cooking", "Fishing", "Exploration", "Combat", "Puzzle solving",
];

pub const THEMES: &[&str] = &[
    "Isolation", "Friendship", "Betrayal", "Discovery", "Loss", "Growth",
    "Rebellion", "Mystery", "Horror", "Comedy", "Nostalgia", "Existential",
    "Environmental", "Political", "Love", "Fear", "Hope", "Greed", "Redemption",
    "Sacrifice", "Identity", "Memory", "Time", "Death", "Rebirth",
];

pub const CONSTRAINTS: &[&str] = &[
    "No text or dialogue allowed",
    "Only 3 colors",
    "Everything is circles",
    "One-button gameplay",
    "No jumping",
    "Reverse controls",
    "Real-time only (no pause)",
    "All assets must be ASCII art",
    "No sound effects",
    "Enemies are friendly",
    "You play as the environment",
    "Speed increases constantly",
    "Everything moves in slow motion",
    "Only black and white",
    "No UI elements",
    "First-person only",
    "Top-down only",
    "Side-scrolling only",
    "No death/failure state",
    "Permadeath (one life)",
    "No save system",
    "Time limit per level",
    "Only mouse controls",
    "Only keyboard controls",
    "No tutorial",
    "Silent protagonist",
    "No inventory",
    "Infinite respawns",
    "No health system",
    "Only one enemy type",
];

/// Jam lengths in hours.
pub const TIME_LIMITS: &[u32] = &[24, 48, 72, 96, 120, 144];

/// Random picker over the fixed category tables. Holds no state; the `_with`
/// variants take the random source so tests can seed it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_concept(&self, genre: Option<&str>, difficulty: &str) -> TemplateConcept {
        self.generate_concept_with(&mut rand::thread_rng(), genre, difficulty)
    }

    pub fn generate_concept_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        genre: Option<&str>,
        difficulty: &str,
    ) -> TemplateConcept {
        let genre = genre
            .and_then(find_genre)
            .unwrap_or_else(|| pick(GENRES, rng));

        TemplateConcept {
            genre,
            setting: pick(SETTINGS, rng),
            mechanic: pick(MECHANICS, rng),
            theme: pick(THEMES, rng),
            time_limit: TIME_LIMITS.choose(rng).copied().unwrap_or(48),
            constraint: pick(CONSTRAINTS, rng),
            difficulty: difficulty.to_lowercase(),
        }
    }

    pub fn generate_additional_constraint(&self) -> &'static str {
        self.generate_additional_constraint_with(&mut rand::thread_rng())
    }

    pub fn generate_additional_constraint_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        pick(CONSTRAINTS, rng)
    }
}

/// Canonical table entry for a case-insensitive genre name.
pub fn find_genre(name: &str) -> Option<&'static str> {
    GENRES
        .iter()
        .copied()
        .find(|g| g.eq_ignore_ascii_case(name.trim()))
}

fn pick<R: Rng + ?Sized>(table: &'static [&'static str], rng: &mut R) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}
