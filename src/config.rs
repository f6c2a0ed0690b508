use reqwest::Url;
use thiserror::Error;

use crate::quiz::ai_helper::Personality;

pub const DEFAULT_DB_PATH: &str = "db.sqlite";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ANALYTICS_WEBHOOK_URL is not a valid URL: {0}")]
    InvalidWebhookUrl(String),
    #[error("Unknown COACH_PERSONALITY: {0} (expected mentor, closer or operator)")]
    UnknownPersonality(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub webhook_url: Option<Url>,
    pub chatgpt_api_key: Option<String>,
    pub personality: Personality,
}

impl Config {
    /// Reads the process environment. `TELOXIDE_TOKEN` is left to `Bot::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let webhook_url = match get("ANALYTICS_WEBHOOK_URL") {
            Some(raw) => Some(Url::parse(&raw).map_err(|_| ConfigError::InvalidWebhookUrl(raw))?),
            None => None,
        };

        let personality = match get("COACH_PERSONALITY") {
            Some(name) => {
                Personality::from_name(&name).ok_or(ConfigError::UnknownPersonality(name))?
            }
            None => Personality::default(),
        };

        Ok(Self {
            db_path: get("QUIZ_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            webhook_url,
            chatgpt_api_key: get("CHATGPT_API_KEY"),
            personality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.db_path, DEFAULT_DB_PATH);
        assert!(config.webhook_url.is_none());
        assert!(config.chatgpt_api_key.is_none());
        assert_eq!(config.personality, Personality::Mentor);
    }

    #[test]
    fn reads_all_values() {
        let config = config(&[
            ("QUIZ_DB_PATH", "/var/lib/quiz/dialogues.sqlite"),
            ("ANALYTICS_WEBHOOK_URL", "https://hooks.example.com/quiz"),
            ("CHATGPT_API_KEY", "sk-test"),
            ("COACH_PERSONALITY", "operator"),
        ])
        .unwrap();
        assert_eq!(config.db_path, "/var/lib/quiz/dialogues.sqlite");
        assert_eq!(
            config.webhook_url.map(|url| url.to_string()),
            Some("https://hooks.example.com/quiz".to_string())
        );
        assert_eq!(config.chatgpt_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.personality, Personality::Operator);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config(&[("CHATGPT_API_KEY", "  "), ("ANALYTICS_WEBHOOK_URL", "")]).unwrap();
        assert!(config.chatgpt_api_key.is_none());
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config(&[("ANALYTICS_WEBHOOK_URL", "not a url")]).unwrap_err(),
            ConfigError::InvalidWebhookUrl("not a url".to_string())
        );
        assert_eq!(
            config(&[("COACH_PERSONALITY", "pirate")]).unwrap_err(),
            ConfigError::UnknownPersonality("pirate".to_string())
        );
    }
}
