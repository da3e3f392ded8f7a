//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::fmt;

/// How much a 500 response reveals about the storage failure behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Generic `server error` body.
    Production,
    /// Raw error detail in the body.
    Development,
}

impl RunMode {
    pub fn exposes_error_detail(self) -> bool {
        matches!(self, RunMode::Development)
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    /// Shared secret every bookmark request must present as a bearer token.
    pub api_token: String,
    pub mode: RunMode,
    pub host: String,
    pub port: u16,
    /// Path the bookmark routes are nested under, e.g. `/api`. Empty mounts them at the root.
    pub api_prefix: String,
    /// `None` keeps bookmarks in memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_token", &"<redacted>")
            .field("mode", &self.mode)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_prefix", &self.api_prefix)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("max_connections", &self.max_connections)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl ServerConfig {
    /// Defaults for everything except the token: development mode, in-memory store, no prefix.
    pub fn new(api_token: impl Into<String>) -> Self {
        ServerConfig {
            api_token: api_token.into(),
            mode: RunMode::Development,
            host: "0.0.0.0".into(),
            port: 8000,
            api_prefix: String::new(),
            database_url: None,
            max_connections: 5,
            cors_origins: vec!["*".into()],
        }
    }

    /// | Env var                    | Default        |
    /// |----------------------------|----------------|
    /// | `API_TOKEN`                | required       |
    /// | `APP_ENV`                  | `development`  |
    /// | `HOST`                     | `0.0.0.0`      |
    /// | `PORT`                     | `8000`         |
    /// | `API_PREFIX`               | empty          |
    /// | `DATABASE_URL`             | unset (memory) |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`            |
    /// | `CORS_ORIGINS`             | `*`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_token = get("API_TOKEN").ok_or(ConfigError::Missing("API_TOKEN"))?;
        let mut config = ServerConfig::new(api_token);

        if let Some(env) = get("APP_ENV") {
            config.mode = if env.eq_ignore_ascii_case("production") {
                RunMode::Production
            } else {
                RunMode::Development
            };
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(prefix) = get("API_PREFIX") {
            config.api_prefix = normalize_prefix(&prefix)?;
        }
        config.database_url = get("DATABASE_URL");
        if let Some(max) = get("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value: max.clone(),
                })?;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        Ok(config)
    }
}

/// `api`, `/api/` and `/api` all become `/api`; `/` becomes empty.
fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, ':' | '*' | '{' | '}' | '?' | '#'))
    {
        return Err(ConfigError::Invalid {
            name: "API_PREFIX",
            value: raw.to_string(),
        });
    }
    Ok(format!("/{}", trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("API_TOKEN"))));
        assert!(matches!(
            load(&[("API_TOKEN", "  ")]),
            Err(ConfigError::Missing("API_TOKEN"))
        ));
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("API_TOKEN", "secret")]).unwrap();
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.mode, RunMode::Development);
        assert_eq!(config.port, 8000);
        assert_eq!(config.api_prefix, "");
        assert_eq!(config.database_url, None);
        assert_eq!(config.cors_origins, vec!["*"]);
    }

    #[test]
    fn production_hides_error_detail() {
        let config = load(&[("API_TOKEN", "t"), ("APP_ENV", "Production")]).unwrap();
        assert_eq!(config.mode, RunMode::Production);
        assert!(!config.mode.exposes_error_detail());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("API_TOKEN", "t"),
            ("PORT", "9090"),
            ("API_PREFIX", "api/"),
            ("DATABASE_URL", "postgres://localhost/bookmarks"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/bookmarks"));
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            load(&[("API_TOKEN", "t"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("API_TOKEN", "t"), ("API_PREFIX", "/:tenant")]),
            Err(ConfigError::Invalid { name: "API_PREFIX", .. })
        ));
        assert!(matches!(
            load(&[("API_TOKEN", "t"), ("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut config = ServerConfig::new("top-secret");
        config.database_url = Some("postgres://user:pw@db/bookmarks".into());
        let printed = format!("{:?}", config);
        assert!(!printed.contains("top-secret"));
        assert!(!printed.contains("pw@db"));
    }
}
