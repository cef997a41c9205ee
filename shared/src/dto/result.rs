use serde::{Deserialize, Serialize};

/// Tagged result returned by every command procedure of the canisters.
///
/// Serializes as `{"ok": <payload>}` or `{"err": "<reason>"}`. Read procedures
/// return their value directly and never use this wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CallResult<T> {
    Ok(T),
    Err(String),
}

impl<T> CallResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, CallResult::Ok(_))
    }

    /// Convert into a std `Result`, the decline reason becoming the error.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            CallResult::Ok(value) => Ok(value),
            CallResult::Err(reason) => Err(reason),
        }
    }
}

impl<T> From<Result<T, String>> for CallResult<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => CallResult::Ok(value),
            Err(reason) => CallResult::Err(reason),
        }
    }
}
