//! # Application State Types
//!
//! Session and domain collections held by the store. The store keeps one
//! [`AppState`] behind a lock; consumers read clones through
//! [`crate::app::AppStore::snapshot`] and the typed accessors.

use shared::{Principal, Proposal, SavingsPool, UserPosition, UserProfile, YieldStrategy};

/// Where the session is in the sign-in lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No identity (initial state, and after logout)
    #[default]
    Anonymous,
    /// Identity accepted, profile lookup in flight
    Authenticating,
    /// Signed in but not registered with the identity canister
    AuthenticatedNoProfile,
    /// Signed in with a registered profile
    AuthenticatedWithProfile,
}

impl SessionPhase {
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self,
            SessionPhase::AuthenticatedNoProfile | SessionPhase::AuthenticatedWithProfile
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Anonymous => "anonymous",
            SessionPhase::Authenticating => "authenticating",
            SessionPhase::AuthenticatedNoProfile => "authenticated (no profile)",
            SessionPhase::AuthenticatedWithProfile => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-scoped state. Everything here is cleared on logout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub principal: Option<Principal>,
    pub phase: SessionPhase,
    pub profile: Option<UserProfile>,
    /// Custody balance in native units
    pub balance: f64,
    pub positions: Vec<UserPosition>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some() && self.phase.is_authenticated()
    }

    pub fn is_registered(&self) -> bool {
        self.profile.is_some()
    }
}

/// Full store state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub pools: Vec<SavingsPool>,
    pub proposals: Vec<Proposal>,
    pub strategies: Vec<YieldStrategy>,
    /// Number of actions between invocation and settlement
    pub in_flight: usize,
    /// Last action failure, overwritten by the next one
    pub error: Option<String>,
    /// Public collections loaded by `init()`
    pub ready: bool,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}
