use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const ENV_API_URL: &str = "TRANSLATOR_API_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "TRANSLATOR_TIMEOUT_MS";

/// Origin of the translation service. Endpoint paths are joined onto it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, ConfigError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl {
            url: raw.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: raw.to_owned(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(Self(url))
    }

    /// `path` is relative to the origin, e.g. `"translate"`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The origin as the user wrote it, without the trailing slash `Url` adds.
    pub fn display(&self) -> &str {
        self.as_str().trim_end_matches('/')
    }
}

impl Default for ApiBaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_BASE_URL).expect("default api url is valid"))
    }
}

impl fmt::Debug for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiBaseUrl({})", self.display())
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestTimeout {
    pub ms: u64,
}

impl RequestTimeout {
    pub fn new(ms: u64) -> Result<Self, ConfigError> {
        if ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { ms })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.ms)
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self {
            ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: ApiBaseUrl,
    pub request_timeout: RequestTimeout,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api url must not be empty")]
    EmptyApiUrl,
    #[error("invalid api url `{url}`: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("request timeout must be > 0 ms")]
    ZeroTimeout,
    #[error("invalid request timeout `{0}`")]
    InvalidTimeout(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_api_base(
    cli_value: Option<String>,
    env: &impl Env,
) -> Result<ApiBaseUrl, ConfigError> {
    let raw = resolve_string_with_default(cli_value, ENV_API_URL, env, DEFAULT_API_BASE_URL);
    ApiBaseUrl::new(raw)
}

pub fn resolve_request_timeout(
    cli_value: Option<u64>,
    env: &impl Env,
) -> Result<RequestTimeout, ConfigError> {
    match cli_value {
        Some(ms) => RequestTimeout::new(ms),
        None => match env.var(ENV_REQUEST_TIMEOUT_MS) {
            Some(v) => {
                let ms = v
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?;
                RequestTimeout::new(ms)
            }
            None => Ok(RequestTimeout::default()),
        },
    }
}
