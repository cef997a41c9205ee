use serde::{Deserialize, Serialize};

use super::identity::Principal;

/// Custody wallet record. Balances on this canister are integer minor units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: String,
    pub balance_minor: u64,
    pub owner: Principal,
}
