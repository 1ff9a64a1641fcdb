use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COURSE_ID, DEFAULT_TOKEN, ENV_BASE_URL, ENV_COURSE_ID,
    ENV_LOG_LEVEL, ENV_TOKEN,
};
use crate::errors::{ChatError, ChatResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Runtime values the chat session needs: where the server lives, which
/// course is being asked about, and the bearer credential to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub course_id: String,
    pub token: String,
    pub log_level: String,
    pub log_dir: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            course_id: DEFAULT_COURSE_ID.to_string(),
            token: DEFAULT_TOKEN.to_string(),
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl ChatConfig {
    pub fn new(
        base_url: impl Into<String>,
        course_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            course_id: course_id.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// `{base_url}/courses/{course_id}/query`, with the course id encoded as
    /// a single path segment.
    pub fn query_url(&self) -> ChatResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ChatError::config_error(format!("Invalid base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ChatError::config_error("base_url cannot be used as a base"))?
            .pop_if_empty()
            .extend(["courses", self.course_id.as_str(), "query"]);
        Ok(url)
    }
}

/// Loads the user config file, applies `.env`/environment overrides and
/// validates the result.
pub fn load_config() -> ChatResult<ChatConfig> {
    dotenv::dotenv().ok();

    let config_path = get_config_path()?;
    let config = load_config_from(&config_path)?;
    let config = apply_env_overrides(config, |key| env::var(key).ok());

    validate_config(&config)?;
    Ok(config)
}

/// Reads a config file, or writes the defaults there when it does not exist
/// yet.
pub fn load_config_from(config_path: &Path) -> ChatResult<ChatConfig> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path)
            .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: ChatConfig = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        return Ok(config);
    }

    let config = ChatConfig::default();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(config_path, config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

/// Overlays values found through `lookup` (normally the process environment).
/// Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: ChatConfig, lookup: F) -> ChatConfig
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = pick(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(course_id) = pick(ENV_COURSE_ID) {
        config.course_id = course_id;
    }
    if let Some(token) = pick(ENV_TOKEN) {
        config.token = token;
    }
    if let Some(log_level) = pick(ENV_LOG_LEVEL) {
        config.log_level = log_level;
    }

    config
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir
        .join(".config")
        .join("course-chat")
        .join("config.json"))
}

pub fn validate_config(config: &ChatConfig) -> ChatResult<()> {
    if config.base_url.trim().is_empty() {
        return Err(ChatError::config_error("base_url is required"));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| ChatError::config_error(format!("Invalid base_url: {}", e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ChatError::config_error(format!(
            "base_url must use http or https, got {}",
            url.scheme()
        )));
    }

    if config.course_id.trim().is_empty() {
        return Err(ChatError::config_error("course_id is required"));
    }

    if config.token.trim().is_empty() {
        return Err(ChatError::config_error("token is required"));
    }

    Ok(())
}
