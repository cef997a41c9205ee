//! # Action Locks
//!
//! At most one in-flight action per [`ActionKey`]. Acquiring a key hands out an
//! [`ActionToken`]; dropping the token releases the key, whatever the outcome
//! of the action (including unwinding).

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{AppError, Result};

/// Identity of a mutating action for mutual exclusion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    Login,
    Register,
    CreatePool,
    JoinPool(u64),
    Deposit(u64),
    CreateWallet,
    Transfer(u64),
    Vote(u64),
    CreateProposal,
    EnterPosition(String),
    ClaimYields,
    SimulateDeposit,
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKey::Login => write!(f, "Login"),
            ActionKey::Register => write!(f, "Registration"),
            ActionKey::CreatePool => write!(f, "Pool creation"),
            ActionKey::JoinPool(id) => write!(f, "Joining pool {}", id),
            ActionKey::Deposit(id) => write!(f, "Deposit to pool {}", id),
            ActionKey::CreateWallet => write!(f, "Wallet creation"),
            ActionKey::Transfer(id) => write!(f, "Transfer to pool {}", id),
            ActionKey::Vote(id) => write!(f, "Vote on proposal {}", id),
            ActionKey::CreateProposal => write!(f, "Proposal creation"),
            ActionKey::EnterPosition(id) => write!(f, "Entering {}", id),
            ActionKey::ClaimYields => write!(f, "Yield claim"),
            ActionKey::SimulateDeposit => write!(f, "Simulated deposit"),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct ActionLocks {
    held: Arc<Mutex<HashSet<ActionKey>>>,
}

impl ActionLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take `key`, or fail with [`AppError::Busy`] if it is already held.
    pub(crate) fn acquire(&self, key: ActionKey) -> Result<ActionToken> {
        let mut held = self.held.lock();
        if held.contains(&key) {
            return Err(AppError::Busy(key.to_string()));
        }
        held.insert(key.clone());
        Ok(ActionToken {
            key,
            held: self.held.clone(),
        })
    }

    pub(crate) fn is_held(&self, key: &ActionKey) -> bool {
        self.held.lock().contains(key)
    }
}

/// Proof of holding an [`ActionKey`]. Released on drop.
pub(crate) struct ActionToken {
    key: ActionKey,
    held: Arc<Mutex<HashSet<ActionKey>>>,
}

impl Drop for ActionToken {
    fn drop(&mut self) {
        self.held.lock().remove(&self.key);
    }
}
