use std::env;

/// Server configuration from the environment. `CACHE` selects the store:
/// `:memory:` for ad-hoc, anything else is a data directory path; unset
/// falls back to ad-hoc with a warning.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub cache: Option<String>,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()),
            cache: env::var("CACHE").ok(),
        }
    }

    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
