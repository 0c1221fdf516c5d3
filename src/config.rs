use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("jam duration must be at least one hour")]
    ZeroDuration,
}

/// Knobs the generation pipeline reads on every call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub default_tone: String,
    pub jam_duration: u32,
    pub enable_ai_fallback: bool,
    /// Loaded for completeness; no generation path varies the constraint count.
    pub min_constraints: u32,
    pub max_constraints: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_tone: "encouraging".to_string(),
            jam_duration: 48,
            enable_ai_fallback: true,
            min_constraints: 3,
            max_constraints: 7,
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jam_duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

pub struct Config {
    pub discord_token: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ai_timeout: Duration,
    pub ai_max_retries: u32,
    pub ai_retry_delay: Duration,
    pub log_file: String,
    pub generation: GenerationSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let ollama_base_url = lookup("OLLAMA_BASE_URL")
            .unwrap_or_else(|| "http://localhost:11434".to_string())
            .trim_end_matches('/')
            .to_string();
        let ollama_model = lookup("OLLAMA_MODEL").unwrap_or_else(|| "llama3.2:3b".to_string());

        let defaults = GenerationSettings::default();
        let generation = GenerationSettings {
            default_tone: lookup("DEFAULT_TONE").unwrap_or(defaults.default_tone),
            jam_duration: parse_or(&lookup, "DEFAULT_JAM_DURATION", defaults.jam_duration)?,
            enable_ai_fallback: parse_flag(&lookup, "ENABLE_AI_FALLBACK", defaults.enable_ai_fallback)?,
            min_constraints: parse_or(&lookup, "MIN_CONSTRAINTS", defaults.min_constraints)?,
            max_constraints: parse_or(&lookup, "MAX_CONSTRAINTS", defaults.max_constraints)?,
        };

        let ai_timeout_secs: u64 = parse_or(&lookup, "AI_TIMEOUT_SECS", 30)?;
        if ai_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "AI_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            discord_token,
            ollama_base_url,
            ollama_model,
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            ai_max_retries: parse_or(&lookup, "AI_MAX_RETRIES", 3)?,
            ai_retry_delay: Duration::from_millis(parse_or(&lookup, "AI_RETRY_DELAY_MS", 0)?),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "bot.log".to_string()),
            generation,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert_eq!(config.ollama_model, "llama3.2:3b");
        assert_eq!(config.ai_timeout, Duration::from_secs(30));
        assert_eq!(config.ai_max_retries, 3);
        assert_eq!(config.ai_retry_delay, Duration::ZERO);
        assert_eq!(config.log_file, "bot.log");
        assert_eq!(config.generation.default_tone, "encouraging");
        assert_eq!(config.generation.jam_duration, 48);
        assert!(config.generation.enable_ai_fallback);
        assert_eq!(config.generation.min_constraints, 3);
        assert_eq!(config.generation.max_constraints, 7);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup_from(&[])).err().unwrap();
        assert_eq!(err, ConfigError::Missing("DISCORD_TOKEN"));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("OLLAMA_BASE_URL", "http://gpu-box:11434/"),
            ("AI_MAX_RETRIES", "5"),
            ("ENABLE_AI_FALLBACK", "false"),
            ("DEFAULT_TONE", "sarcastic"),
        ]))
        .unwrap();
        assert_eq!(config.ollama_base_url, "http://gpu-box:11434");
        assert_eq!(config.ai_max_retries, 5);
        assert!(!config.generation.enable_ai_fallback);
        assert_eq!(config.generation.default_tone, "sarcastic");
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("AI_TIMEOUT_SECS", "soon"),
        ]))
        .err()
        .unwrap();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "AI_TIMEOUT_SECS",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("AI_TIMEOUT_SECS", "0"),
        ]))
        .err()
        .unwrap();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "AI_TIMEOUT_SECS",
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn test_zero_duration_rejected() {
        let settings = GenerationSettings {
            jam_duration: 0,
            ..GenerationSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroDuration));
        assert!(GenerationSettings::default().validate().is_ok());
    }
}
