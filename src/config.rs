use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{HeadshotError, Result};
use crate::models::StyleId;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub json_limit_bytes: usize,
    pub styles: Vec<StyleId>,
    pub gemini: GeminiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            styles: StyleId::ALL.to_vec(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Config::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(defaults.max_upload_bytes);
        let json_limit_bytes = env::var("JSON_LIMIT_BYTES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(defaults.json_limit_bytes);
        let styles = env::var("HEADSHOT_STYLES")
            .map(|val| parse_style_list(&val))
            .unwrap_or(defaults.styles);

        Config {
            host,
            port,
            upload_dir,
            max_upload_bytes,
            json_limit_bytes,
            styles,
            gemini: GeminiConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    pub fn with_styles(mut self, styles: Vec<StyleId>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Parses a comma separated style list. Unknown ids and duplicates are
/// dropped; an empty result falls back to every style.
pub fn parse_style_list(value: &str) -> Vec<StyleId> {
    let mut styles = Vec::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<StyleId>() {
            Ok(style) if !styles.contains(&style) => styles.push(style),
            Ok(_) => {}
            Err(e) => log::warn!("Ignoring {} in HEADSHOT_STYLES", e),
        }
    }

    if styles.is_empty() {
        StyleId::ALL.to_vec()
    } else {
        styles
    }
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = GeminiConfig::default();

        GeminiConfig {
            api_key: env::var("GOOGLE_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|val| val.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| HeadshotError::Config("GOOGLE_API_KEY is not set".into()))
    }
}
