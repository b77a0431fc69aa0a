use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub storage_dir: PathBuf,
    pub backend: BackendConfig,
    pub translation: TranslationConfig,
    pub server: ServerConfig,
    /// Seed for response-variant selection. Unset means entropy; set it for
    /// reproducible replies.
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Budget for the synthesizer's remote fallback stage.
    pub fallback_timeout_secs: u64,
    /// Budget for the model tier of the translation chain.
    pub translate_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Budget for the API tier of the translation chain.
    pub api_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AssistantConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.backend.endpoint.is_empty() {
            return Err("backend.endpoint must not be empty".into());
        }
        if self.backend.model.is_empty() {
            return Err("backend.model must not be empty".into());
        }
        if self.backend.fallback_timeout_secs == 0 {
            return Err("backend.fallback_timeout_secs must be > 0".into());
        }
        if self.backend.translate_timeout_secs == 0 {
            return Err("backend.translate_timeout_secs must be > 0".into());
        }
        if self.translation.endpoint.is_empty() {
            return Err("translation.endpoint must not be empty".into());
        }
        if self.translation.api_timeout_secs == 0 {
            return Err("translation.api_timeout_secs must be > 0".into());
        }
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        Ok(())
    }

    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        let storage_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("compass-assistant");

        let backend_key = std::env::var("COMPASS_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
        let translation_key = std::env::var("COMPASS_TRANSLATE_KEY").ok();

        Self {
            storage_dir,
            backend: BackendConfig {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: backend_key,
                fallback_timeout_secs: 6,
                translate_timeout_secs: 4,
            },
            translation: TranslationConfig {
                endpoint: "https://api-free.deepl.com/v2/translate".to_string(),
                api_key: translation_key,
                api_timeout_secs: 3,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3030,
            },
            random_seed: None,
        }
    }
}
