//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERITY_*` environment variables.
//! Leaving `VERITY_SEARCH_API_KEYS` and `VERITY_NLI_URL` unset runs the pipeline fully offline:
//! synthetic sources and the heuristic NLI scorer.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_MAX_CLAIMS, DEFAULT_MAX_INPUT_CHARS, DEFAULT_NLI_TIMEOUT, DEFAULT_QUERY_DELAY,
    DEFAULT_SEARCH_TIMEOUT, MAX_CLAIMS_LIMIT,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERITY_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the news-search service. Default: `https://newsapi.org`.
    pub search_url: String,

    /// Interchangeable search credentials, rotated on rate limits.
    pub search_api_keys: Vec<String>,

    /// Zero-shot NLI endpoint. `None` means heuristic scoring only.
    pub nli_url: Option<String>,

    /// Bearer token sent to the NLI endpoint.
    pub nli_token: Option<String>,

    pub search_timeout: Duration,

    pub nli_timeout: Duration,

    /// Pause between successive query dispatches.
    pub query_delay: Duration,

    /// Top-K claims kept by the extractor. Default: `10`.
    pub max_claims: usize,

    /// Raw input cap in characters. Default: `50_000`.
    pub max_input_chars: usize,
}

/// Default search URL used when `VERITY_SEARCH_URL` is not set.
pub const DEFAULT_SEARCH_URL: &str = "https://newsapi.org";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_api_keys: Vec::new(),
            nli_url: None,
            nli_token: None,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            nli_timeout: DEFAULT_NLI_TIMEOUT,
            query_delay: DEFAULT_QUERY_DELAY,
            max_claims: DEFAULT_MAX_CLAIMS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("search_url", &self.search_url)
            .field("search_api_keys", &self.search_api_keys.len())
            .field("nli_url", &self.nli_url)
            .field("nli_token", &self.nli_token.as_ref().map(|_| "<redacted>"))
            .field("search_timeout", &self.search_timeout)
            .field("nli_timeout", &self.nli_timeout)
            .field("query_delay", &self.query_delay)
            .field("max_claims", &self.max_claims)
            .field("max_input_chars", &self.max_input_chars)
            .finish()
    }
}

impl Config {
    const ENV_PORT: &'static str = "VERITY_PORT";
    const ENV_BIND_ADDR: &'static str = "VERITY_BIND_ADDR";
    const ENV_SEARCH_URL: &'static str = "VERITY_SEARCH_URL";
    const ENV_SEARCH_API_KEYS: &'static str = "VERITY_SEARCH_API_KEYS";
    const ENV_NLI_URL: &'static str = "VERITY_NLI_URL";
    const ENV_NLI_TOKEN: &'static str = "VERITY_NLI_TOKEN";
    const ENV_SEARCH_TIMEOUT_MS: &'static str = "VERITY_SEARCH_TIMEOUT_MS";
    const ENV_NLI_TIMEOUT_MS: &'static str = "VERITY_NLI_TIMEOUT_MS";
    const ENV_QUERY_DELAY_MS: &'static str = "VERITY_QUERY_DELAY_MS";
    const ENV_MAX_CLAIMS: &'static str = "VERITY_MAX_CLAIMS";
    const ENV_MAX_INPUT_CHARS: &'static str = "VERITY_MAX_INPUT_CHARS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let search_url = Self::parse_string_from_env(Self::ENV_SEARCH_URL, defaults.search_url);
        let search_api_keys = Self::parse_list_from_env(Self::ENV_SEARCH_API_KEYS);
        let nli_url = Self::parse_optional_string_from_env(Self::ENV_NLI_URL);
        let nli_token = Self::parse_optional_string_from_env(Self::ENV_NLI_TOKEN);
        let search_timeout =
            Self::parse_millis_from_env(Self::ENV_SEARCH_TIMEOUT_MS, defaults.search_timeout)?;
        let nli_timeout =
            Self::parse_millis_from_env(Self::ENV_NLI_TIMEOUT_MS, defaults.nli_timeout)?;
        let query_delay =
            Self::parse_millis_from_env(Self::ENV_QUERY_DELAY_MS, defaults.query_delay)?;
        let max_claims = Self::parse_usize_from_env(Self::ENV_MAX_CLAIMS, defaults.max_claims)?;
        let max_input_chars =
            Self::parse_usize_from_env(Self::ENV_MAX_INPUT_CHARS, defaults.max_input_chars)?;

        Ok(Self {
            port,
            bind_addr,
            search_url,
            search_api_keys,
            nli_url,
            nli_token,
            search_timeout,
            nli_timeout,
            query_delay,
            max_claims,
            max_input_chars,
        })
    }

    /// Validates URLs and numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_url(&self.search_url)?;

        if let Some(ref nli_url) = self.nli_url {
            Self::validate_url(nli_url)?;
        }

        if self.max_claims == 0 || self.max_claims > MAX_CLAIMS_LIMIT {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MAX_CLAIMS,
                value: self.max_claims.to_string(),
                reason: format!("must be between 1 and {}", MAX_CLAIMS_LIMIT),
            });
        }

        if self.max_input_chars == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MAX_INPUT_CHARS,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.search_timeout.is_zero() || self.nli_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                name: "VERITY_*_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "timeouts must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Returns `true` when no search credentials are configured.
    pub fn is_search_offline(&self) -> bool {
        self.search_api_keys.is_empty()
    }

    fn validate_url(value: &str) -> Result<(), ConfigError> {
        Url::parse(value)
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidUrl {
                value: value.to_string(),
                source: e,
            })
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_list_from_env(var_name: &str) -> Vec<String> {
        env::var(var_name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.trim().parse().map_err(|e| ConfigError::InvalidNumber {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
