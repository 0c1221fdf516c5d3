pub mod commands;
pub mod config;
pub mod discord_bot;
pub mod error;
pub mod formatters;
pub mod generator;
pub mod logging;
pub mod models;
pub mod ollama;
pub mod prompts;
pub mod templates;
