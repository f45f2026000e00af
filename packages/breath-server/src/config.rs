use breath_filter::DEFAULT_WINDOW_SIZE;
use std::env;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Bind address (0.0.0.0 for LAN, 127.0.0.1 for localhost)
    pub bind_addr: String,
    /// CORS allowed origins (comma-separated in env var, "*" allows any)
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Moving-average window used when a request omits `window_size`
    pub default_window_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024,
            default_window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let max_body_size = match env::var("MAX_BODY_SIZE") {
            Ok(v) => positive_integer("MAX_BODY_SIZE", &v)?,
            Err(_) => defaults.max_body_size,
        };
        let default_window_size = match env::var("DEFAULT_WINDOW_SIZE") {
            Ok(v) => positive_integer("DEFAULT_WINDOW_SIZE", &v)?,
            Err(_) => defaults.default_window_size,
        };

        Ok(Self {
            port: env::var("BREATH_PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            bind_addr: env::var("BREATH_BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            max_body_size,
            default_window_size,
        })
    }

    /// Get the full bind address (addr:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// True when any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn positive_integer(name: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
