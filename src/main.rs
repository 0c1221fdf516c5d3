use jam_assistant::config::Config;
use jam_assistant::discord_bot;
use jam_assistant::generator::JamGenerator;
use jam_assistant::logging;
use jam_assistant::ollama::{OllamaClient, RetryPolicy};
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    let config = Config::from_env()?;
    let _log_guard = logging::init(&config.log_file);

    info!(
        "Using Ollama at {} with model {}",
        config.ollama_base_url, config.ollama_model
    );
    info!(
        "AI fallback {}, constraint range {}-{} (informational)",
        if config.generation.enable_ai_fallback { "enabled" } else { "disabled" },
        config.generation.min_constraints,
        config.generation.max_constraints
    );

    let ollama = OllamaClient::new(&config.ollama_base_url, &config.ollama_model)
        .with_timeout(config.ai_timeout)
        .with_retry(RetryPolicy {
            max_attempts: config.ai_max_retries,
            delay: config.ai_retry_delay,
        });
    let generator = Arc::new(JamGenerator::new(Arc::new(ollama), config.generation));

    if let Err(e) = discord_bot::run(&config.discord_token, generator).await {
        error!("Bot crashed: {}", e);
        return Err(e.into());
    }

    info!("Bot closed");
    Ok(())
}
