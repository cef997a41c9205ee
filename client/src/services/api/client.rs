//! # Canister Gateway Client
//!
//! HTTP client for the canister gateway. Every remote procedure is a
//! `POST {host}/api/canister/{canister_id}/{method}` carrying a JSON array of
//! arguments; the reply body is the procedure's decoded return value.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::core::config::{CanisterIds, ClientConfig};
use crate::core::error::{AppError, Result};
use crate::core::service::{CallerSlot, TransportError};

/// Header carrying the caller principal
pub const PRINCIPAL_HEADER: &str = "x-ic-principal";
/// Header carrying a per-call request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The four remote services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canister {
    Identity,
    Custody,
    Governance,
    Yield,
}

impl Canister {
    pub fn name(&self) -> &'static str {
        match self {
            Canister::Identity => "nuru_backend",
            Canister::Custody => "custody",
            Canister::Governance => "governance",
            Canister::Yield => "yield",
        }
    }
}

/// HTTP client for the canister gateway.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct ApiClient {
    pub(crate) client: Client,
    host: String,
    canister_ids: CanisterIds,
    caller: CallerSlot,
}

impl ApiClient {
    /// Build a client from configuration. `caller` is read on every call.
    pub fn new(config: &ClientConfig, caller: CallerSlot) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: config.host.clone(),
            canister_ids: config.canisters.clone(),
            caller,
        })
    }

    fn canister_id(&self, canister: Canister) -> &str {
        match canister {
            Canister::Identity => &self.canister_ids.identity,
            Canister::Custody => &self.canister_ids.custody,
            Canister::Governance => &self.canister_ids.governance,
            Canister::Yield => &self.canister_ids.yield_farm,
        }
    }

    pub(crate) fn endpoint(&self, canister: Canister, method: &str) -> String {
        format!("{}/api/canister/{}/{}", self.host, self.canister_id(canister), method)
    }

    /// Invoke `method` on `canister` with positional `args`.
    #[tracing::instrument(skip(self, canister, args), fields(canister = canister.name()))]
    pub(crate) async fn call<R: DeserializeOwned>(
        &self,
        canister: Canister,
        method: &str,
        args: Value,
    ) -> std::result::Result<R, TransportError> {
        let start = Instant::now();
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut request = self
            .client
            .post(self.endpoint(canister, method))
            .header(REQUEST_ID_HEADER, &request_id)
            .json(&args);
        if let Some(principal) = self.caller.get() {
            request = request.header(PRINCIPAL_HEADER, principal.as_str());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, request_id = %request_id, "Canister call network error");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, request_id = %request_id, "Failed to read canister reply");
            TransportError::Network(e.to_string())
        })?;

        let result = decode_reply(status, &body);
        tracing::debug!(
            status,
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Canister call completed"
        );
        result
    }
}

/// Map a raw gateway reply onto the expected return type.
pub(crate) fn decode_reply<R: DeserializeOwned>(
    status: u16,
    body: &str,
) -> std::result::Result<R, TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status {
            status,
            body: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CallResult, Principal};

    fn config() -> ClientConfig {
        ClientConfig::new(
            "http://localhost:4943",
            CanisterIds {
                identity: "id-cai".to_string(),
                custody: "custody-cai".to_string(),
                governance: "gov-cai".to_string(),
                yield_farm: "yield-cai".to_string(),
            },
        )
    }

    #[test]
    fn test_endpoint_per_canister() {
        let client = ApiClient::new(&config(), CallerSlot::new()).unwrap();
        assert_eq!(
            client.endpoint(Canister::Custody, "getBalance"),
            "http://localhost:4943/api/canister/custody-cai/getBalance"
        );
        assert_eq!(
            client.endpoint(Canister::Yield, "claimYields"),
            "http://localhost:4943/api/canister/yield-cai/claimYields"
        );
    }

    #[test]
    fn test_decode_reply_success() {
        let parsed: CallResult<u64> = decode_reply(200, r#"{"ok": 250000000}"#).unwrap();
        assert_eq!(parsed, CallResult::Ok(250_000_000));
    }

    #[test]
    fn test_decode_reply_status_is_transport_error() {
        let err = decode_reply::<Vec<u64>>(503, "replica unavailable").unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 503,
                body: "replica unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_decode_reply_bad_body_is_transport_error() {
        let err = decode_reply::<CallResult<Principal>>(200, "<html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
