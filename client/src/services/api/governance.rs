//! # Governance Canister Procedures

use async_trait::async_trait;
use serde_json::json;
use shared::{CallResult, Proposal, ProposalType, VoteChoice};

use super::client::{ApiClient, Canister};
use crate::core::service::{GovernanceService, TransportError};

#[async_trait]
impl GovernanceService for ApiClient {
    async fn get_active_proposals(&self) -> Result<Vec<Proposal>, TransportError> {
        self.call(Canister::Governance, "getActiveProposals", json!([])).await
    }

    async fn get_proposal(&self, proposal_id: u64) -> Result<CallResult<Proposal>, TransportError> {
        self.call(Canister::Governance, "getProposal", json!([proposal_id])).await
    }

    async fn vote(&self, proposal_id: u64, choice: VoteChoice) -> Result<CallResult<()>, TransportError> {
        self.call(Canister::Governance, "vote", json!([proposal_id, choice])).await
    }

    async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: ProposalType,
    ) -> Result<CallResult<u64>, TransportError> {
        self.call(
            Canister::Governance,
            "createProposal",
            json!([title, description, proposal_type]),
        )
        .await
    }
}
