//! # Governance Handlers

use shared::{Proposal, ProposalType};
use tracing::info;

use crate::app::locks::ActionKey;
use crate::app::AppStore;
use crate::core::error::{AppError, Result};
use crate::utils::validation::validate_proposal;

impl AppStore {
    /// Vote for (`support`) or against a proposal.
    pub async fn vote(&self, proposal_id: u64, support: bool) -> Result<()> {
        const FAILED: &str = "Failed to vote";

        self.require_session(FAILED)?;

        self.perform(ActionKey::Vote(proposal_id), FAILED, async {
            self.facade.vote(proposal_id, support).await?;
            info!(proposal_id, support, "Vote cast");
            self.refresh_proposals().await;
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Returns the new proposal id.
    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: ProposalType,
    ) -> Result<u64> {
        const FAILED: &str = "Failed to create proposal";

        self.require_session(FAILED)?;
        self.check(FAILED, validate_proposal(title, description).into_result())?;

        self.perform(ActionKey::CreateProposal, FAILED, async {
            let proposal_id = self
                .facade
                .create_proposal(title.trim(), description, proposal_type)
                .await?;
            info!(proposal_id, %proposal_type, "Proposal created");
            self.refresh_proposals().await;
            Ok::<_, AppError>(proposal_id)
        })
        .await
    }

    /// Single proposal straight from the canister.
    pub async fn get_proposal(&self, proposal_id: u64) -> Result<Proposal> {
        Ok(self.facade.get_proposal(proposal_id).await?)
    }
}
