//! # Client Configuration
//!
//! Configuration is read from environment variables (a `.env` file is honoured
//! through `dotenvy`) and validated before anything is wired up, so a bad
//! setup fails at startup rather than on the first remote call.
//!
//! | Variable | Default |
//! |---|---|
//! | `DFX_NETWORK` | `local` |
//! | `NURU_HOST` | `http://localhost:4943` when local, `https://ic0.app` otherwise |
//! | `CANISTER_ID_NURU_BACKEND` | required |
//! | `CANISTER_ID_CANISTER_TWO` | required (custody) |
//! | `CANISTER_ID_CANISTER_THREE` | required (governance) |
//! | `CANISTER_ID_CANISTER_FOUR` | required (yield) |
//! | `NURU_REQUEST_TIMEOUT_SECS` | `10` |
//! | `NURU_READ_RETRIES` | `1` |
//! | `NURU_RETRY_BACKOFF_MS` | `200` |
//! | `NURU_EVENT_BUFFER` | `256` |

use std::env;
use std::str::FromStr;

use crate::core::error::{AppError, Result};

const LOCAL_HOST: &str = "http://localhost:4943";
const MAINNET_HOST: &str = "https://ic0.app";

/// Canister ids of the four remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanisterIds {
    pub identity: String,
    pub custody: String,
    pub governance: String,
    pub yield_farm: String,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `local` or a named network (`ic`)
    pub network: String,
    /// Gateway base URL, no trailing slash
    pub host: String,
    pub canisters: CanisterIds,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout_secs: u64,
    /// Extra attempts for read procedures after a transport failure
    pub read_retries: u32,
    /// Linear backoff step between read attempts
    pub retry_backoff_ms: u64,
    /// Capacity of the store's event channel
    pub event_buffer: usize,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; real environment variables still apply
        let _ = dotenvy::dotenv();

        let network = env::var("DFX_NETWORK").unwrap_or_else(|_| "local".to_string());
        let host = env::var("NURU_HOST").unwrap_or_else(|_| default_host(&network).to_string());

        let canisters = CanisterIds {
            identity: required("CANISTER_ID_NURU_BACKEND")?,
            custody: required("CANISTER_ID_CANISTER_TWO")?,
            governance: required("CANISTER_ID_CANISTER_THREE")?,
            yield_farm: required("CANISTER_ID_CANISTER_FOUR")?,
        };

        Ok(Self {
            network,
            host: host.trim_end_matches('/').to_string(),
            canisters,
            request_timeout_secs: parsed("NURU_REQUEST_TIMEOUT_SECS", 10)?,
            read_retries: parsed("NURU_READ_RETRIES", 1)?,
            retry_backoff_ms: parsed("NURU_RETRY_BACKOFF_MS", 200)?,
            event_buffer: parsed("NURU_EVENT_BUFFER", 256)?,
        })
    }

    /// Configuration for a given host and canister set with default tuning.
    pub fn new(host: impl Into<String>, canisters: CanisterIds) -> Self {
        Self {
            network: "local".to_string(),
            host: host.into().trim_end_matches('/').to_string(),
            canisters,
            request_timeout_secs: 10,
            read_retries: 1,
            retry_backoff_ms: 200,
            event_buffer: 256,
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "NURU_HOST must start with http:// or https://, got '{}'",
                self.host
            )));
        }

        let ids = [
            ("CANISTER_ID_NURU_BACKEND", &self.canisters.identity),
            ("CANISTER_ID_CANISTER_TWO", &self.canisters.custody),
            ("CANISTER_ID_CANISTER_THREE", &self.canisters.governance),
            ("CANISTER_ID_CANISTER_FOUR", &self.canisters.yield_farm),
        ];
        for (name, id) in ids {
            if id.trim().is_empty() {
                return Err(AppError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "NURU_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer == 0 {
            return Err(AppError::Config("NURU_EVENT_BUFFER must be greater than 0".to_string()));
        }

        Ok(())
    }
}

fn default_host(network: &str) -> &'static str {
    if network == "local" {
        LOCAL_HOST
    } else {
        MAINNET_HOST
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AppError::Config(format!("{} must be set in environment", name)))
}

fn parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be a valid number: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> CanisterIds {
        CanisterIds {
            identity: "uxrrr-q7777-77774-qaaaq-cai".to_string(),
            custody: "u6s2n-gx777-77774-qaaba-cai".to_string(),
            governance: "uzt4z-lp777-77774-qaabq-cai".to_string(),
            yield_farm: "umunu-kh777-77774-qaaca-cai".to_string(),
        }
    }

    #[test]
    fn test_default_host_by_network() {
        assert_eq!(default_host("local"), "http://localhost:4943");
        assert_eq!(default_host("ic"), "https://ic0.app");
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:4943/", ids());
        assert_eq!(config.host, "http://localhost:4943");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::new("localhost:4943", ids());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.host = "http://localhost:4943".to_string();
        config.canisters.custody = " ".to_string();
        assert!(config.validate().is_err());

        config.canisters = ids();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
