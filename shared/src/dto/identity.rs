use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller identity presented to the canisters.
///
/// The client never constructs or validates principals; it only carries the
/// textual form it was handed by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Registered user record, keyed by principal on the identity canister.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Principal,
    /// Registration time (ns since epoch)
    pub created_at: i64,
    pub total_savings: f64,
    #[serde(default)]
    pub pool_memberships: Vec<u64>,
}
