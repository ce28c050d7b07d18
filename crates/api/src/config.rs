use axum::http::HeaderValue;

/// Default topics declared when `TOPICS` is unset.
pub const DEFAULT_TOPICS: &str = "greetings,user-events,movie-events";

/// Output format of the `fmt` tracing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background consumers (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Requests processed at once across all routes (default: `512`).
    pub max_concurrent_requests: usize,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Topic names declared on the bus.
    pub topics: Vec<String>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                                |
    /// |---------------------------|----------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                              |
    /// | `PORT`                    | `3000`                                 |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`                |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                   |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                                   |
    /// | `MAX_CONCURRENT_REQUESTS` | `512`                                  |
    /// | `DATABASE_URL`            | unset (in-memory store)                |
    /// | `TOPICS`                  | `greetings,user-events,movie-events`   |
    /// | `LOG_FORMAT`              | `text` (`json` for structured output)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins = split_list(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
        )
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;

        let max_concurrent_requests: usize = parse_or(&lookup, "MAX_CONCURRENT_REQUESTS", 512)?;
        if max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_CONCURRENT_REQUESTS",
                value: "0".into(),
            });
        }

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let topics = split_list(&lookup("TOPICS").unwrap_or_else(|| DEFAULT_TOPICS.into()));

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_concurrent_requests,
            database_url,
            topics,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
