//! # Session Handlers
//!
//! Login, registration and logout. The store never creates or checks
//! principals; it only forwards the one it is handed.

use shared::{truncate_principal, Principal};
use tracing::{info, warn};

use crate::app::events::AppEvent;
use crate::app::locks::ActionKey;
use crate::app::state::{Session, SessionPhase};
use crate::app::AppStore;
use crate::core::error::{AppError, Result};

impl AppStore {
    /// Sign in as `principal` and look up its profile.
    ///
    /// Resolves to [`SessionPhase::AuthenticatedWithProfile`] (balance and
    /// positions fetched) or [`SessionPhase::AuthenticatedNoProfile`]. If the
    /// profile lookup cannot reach the canister the session falls back to
    /// anonymous and the error is returned.
    pub async fn login(&self, principal: Principal) -> Result<SessionPhase> {
        const FAILED: &str = "Failed to login";

        self.perform(ActionKey::Login, FAILED, async {
            info!(principal = %truncate_principal(principal.as_str()), "Logging in");
            self.facade.set_caller(principal.clone());
            self.state.write().session = Session {
                principal: Some(principal.clone()),
                phase: SessionPhase::Authenticating,
                ..Session::default()
            };
            self.events.emit(AppEvent::SessionChanged(SessionPhase::Authenticating));

            let lookup = self.facade.get_user_profile().await;
            if !self.still_signed_in(&principal) {
                return Err(AppError::Precondition("Signed out during login".to_string()));
            }

            match lookup {
                Ok(Some(profile)) => {
                    self.state.write().session.profile = Some(profile);
                    self.set_phase(SessionPhase::AuthenticatedWithProfile);
                    futures::join!(self.refresh_balance(), self.refresh_positions());
                    Ok(SessionPhase::AuthenticatedWithProfile)
                }
                Ok(None) => {
                    self.set_phase(SessionPhase::AuthenticatedNoProfile);
                    Ok(SessionPhase::AuthenticatedNoProfile)
                }
                Err(e) => {
                    self.facade.clear_caller();
                    self.state.write().session = Session::default();
                    self.events.emit(AppEvent::SessionChanged(SessionPhase::Anonymous));
                    Err(AppError::from(e))
                }
            }
        })
        .await
    }

    /// Register the signed-in principal with the identity canister.
    ///
    /// The stored profile comes from a fresh lookup after registration, not
    /// from the registration reply.
    pub async fn register_user(&self) -> Result<()> {
        const FAILED: &str = "Failed to register user";

        if self.principal().is_none() {
            return Err(self.fail(
                FAILED,
                AppError::Precondition("No principal available for user registration".to_string()),
            ));
        }

        self.perform(ActionKey::Register, FAILED, async {
            self.facade.register_user().await?;
            let (found, ()) = futures::join!(self.refresh_profile(), self.refresh_balance());
            if !found {
                warn!("Registration succeeded but the profile could not be re-fetched");
            }
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Login, then register if the principal has no profile yet.
    pub async fn sign_in(&self, principal: Principal) -> Result<SessionPhase> {
        let phase = self.login(principal).await?;
        if phase != SessionPhase::AuthenticatedNoProfile {
            return Ok(phase);
        }
        self.register_user().await?;
        Ok(self.phase())
    }

    /// Drop the session. Public collections are kept. Always succeeds, and also
    /// clears the current error when already anonymous.
    pub fn logout(&self) {
        self.facade.clear_caller();
        let previous = {
            let mut state = self.state.write();
            state.error = None;
            std::mem::take(&mut state.session).phase
        };
        if previous != SessionPhase::Anonymous {
            info!("Logged out");
            self.events.emit(AppEvent::SessionChanged(SessionPhase::Anonymous));
        }
    }
}
