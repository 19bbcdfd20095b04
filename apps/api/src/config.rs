use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a sensible local-first default, so the service starts
/// with no environment at all as long as Ollama is running on its
/// standard port.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the Ollama generate endpoint.
    pub ollama_url: String,
    /// Model name passed on every generate call.
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    /// Word budget substituted into the cover letter prompt.
    pub max_word_limit: u32,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "gemma:2b";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_url: env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            temperature: env_or("TEMPERATURE", "0.7")
                .parse::<f64>()
                .context("TEMPERATURE must be a number between 0.0 and 1.0")?,
            top_p: env_or("TOP_P", "0.9")
                .parse::<f64>()
                .context("TOP_P must be a number between 0.0 and 1.0")?,
            max_word_limit: env_or("MAX_WORD_LIMIT", "200")
                .parse::<u32>()
                .context("MAX_WORD_LIMIT must be a positive integer")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_to_default() {
        assert_eq!(
            env_or("COVERLETTER_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_env_or_reads_set_var() {
        std::env::set_var("COVERLETTER_TEST_SET_VAR", "explicit");
        assert_eq!(env_or("COVERLETTER_TEST_SET_VAR", "fallback"), "explicit");
    }
}
