use std::str::FromStr;
use std::time::Duration;

/// Error raised when an environment variable holds an unparseable value.
#[derive(Debug, thiserror::Error)]
#[error("{var} has invalid value '{value}': expected {expected}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development next to the
/// dashboard on `localhost:3000`. In production, override via environment
/// variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Status notification sink endpoint.
    pub webhook_url: String,
    /// Timeout of one outbound notification call in seconds (default: `10`).
    pub webhook_timeout_secs: u64,
    /// Pause before each progress milestone in milliseconds (default: `1000`).
    pub milestone_delay_ms: u64,
    /// How long finished runs stay queryable in seconds (default: `3600`).
    pub run_retention_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                          |
    /// |------------------------|--------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                        |
    /// | `PORT`                 | `8000`                                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://127.0.0.1:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                             |
    /// | `WEBHOOK_URL`          | `http://localhost:3000/api/webhooks/test-update` |
    /// | `WEBHOOK_TIMEOUT_SECS` | `10`                                             |
    /// | `MILESTONE_DELAY_MS`   | `1000`                                           |
    /// | `RUN_RETENTION_SECS`   | `3600`                                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let webhook_url = lookup("WEBHOOK_URL")
            .unwrap_or_else(|| "http://localhost:3000/api/webhooks/test-update".into());

        Ok(Self {
            host,
            port: parse_or(&lookup, "PORT", 8000, "a port number")?,
            cors_origins,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "seconds")?,
            webhook_url,
            webhook_timeout_secs: parse_or(&lookup, "WEBHOOK_TIMEOUT_SECS", 10, "seconds")?,
            milestone_delay_ms: parse_or(&lookup, "MILESTONE_DELAY_MS", 1000, "milliseconds")?,
            run_retention_secs: parse_or(&lookup, "RUN_RETENTION_SECS", 3600, "seconds")?,
        })
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    pub fn milestone_delay(&self) -> Duration {
        Duration::from_millis(self.milestone_delay_ms)
    }

    pub fn run_retention(&self) -> Duration {
        Duration::from_secs(self.run_retention_secs)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
            var,
            value: raw,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(
            config.webhook_url,
            "http://localhost:3000/api/webhooks/test-update"
        );
        assert_eq!(config.milestone_delay(), Duration::from_secs(1));
        assert_eq!(config.webhook_timeout(), Duration::from_secs(10));
        assert_eq!(config.run_retention(), Duration::from_secs(3600));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "9100"),
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("MILESTONE_DELAY_MS", "0"),
            ("WEBHOOK_URL", "https://sink.example/hook"),
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.milestone_delay(), Duration::ZERO);
        assert_eq!(config.webhook_url, "https://sink.example/hook");
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.value, "eighty");
        assert!(err.to_string().contains("PORT"));
    }
}
