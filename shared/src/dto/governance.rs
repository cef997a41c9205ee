use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::identity::Principal;

/// Category of governance proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalType {
    NewFeature,
    ParameterChange,
    TreasurySpend,
}

impl ProposalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalType::NewFeature => "newFeature",
            ProposalType::ParameterChange => "parameterChange",
            ProposalType::TreasurySpend => "treasurySpend",
        }
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newFeature" => Ok(ProposalType::NewFeature),
            "parameterChange" => Ok(ProposalType::ParameterChange),
            "treasurySpend" => Ok(ProposalType::TreasurySpend),
            other => Err(format!("Unknown proposal type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
    Executed,
}

/// Ballot sent with a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteChoice {
    For,
    Against,
}

impl From<bool> for VoteChoice {
    fn from(support: bool) -> Self {
        if support {
            VoteChoice::For
        } else {
            VoteChoice::Against
        }
    }
}

/// Governance proposal. Tallies are owned by the governance canister.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
    pub proposer: Principal,
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: i64,
    pub deadline: i64,
    pub status: ProposalStatus,
}

impl Proposal {
    pub fn total_votes(&self) -> u64 {
        self.votes_for.saturating_add(self.votes_against)
    }
}
