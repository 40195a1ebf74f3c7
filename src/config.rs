use std::env;
use std::fmt;

pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const OPENAI_MODEL: &str = "OPENAI_MODEL";
const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
const TAVILY_BASE_URL: &str = "TAVILY_BASE_URL";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{} not set. Check your .env file.", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    #[cfg(test)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Runtime settings read from the process environment.
///
/// - `TAVILY_API_KEY`, `OPENAI_API_KEY`: required
/// - `OPENAI_MODEL`: completion model (default `gpt-4o-mini`)
/// - `OPENAI_BASE_URL`, `TAVILY_BASE_URL`: endpoint overrides
#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: ApiKey,
    pub openai_api_key: ApiKey,
    pub model: String,
    pub openai_base_url: String,
    pub tavily_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let tavily = read(TAVILY_API_KEY);
        let openai = read(OPENAI_API_KEY);
        let (Some(tavily), Some(openai)) = (tavily.clone(), openai.clone()) else {
            let mut missing = Vec::new();
            if tavily.is_none() {
                missing.push(TAVILY_API_KEY);
            }
            if openai.is_none() {
                missing.push(OPENAI_API_KEY);
            }
            return Err(ConfigError::MissingKeys(missing));
        };

        Ok(Self {
            tavily_api_key: ApiKey(tavily),
            openai_api_key: ApiKey(openai),
            model: read(OPENAI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: read(OPENAI_BASE_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            tavily_base_url: read(TAVILY_BASE_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string()),
        })
    }
}
