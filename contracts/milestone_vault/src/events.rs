use soroban_sdk::{contractevent, Address, BytesN, String};

use crate::storage::{MilestoneStatus, ProjectStatus};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreatedEvent {
    #[topic]
    pub creator: Address,
    pub project_id: u64,
    pub title: String,
    pub goal: i128,
    pub deadline: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneAddedEvent {
    #[topic]
    pub project_id: u64,
    pub index: u32,
    pub amount: i128,
    pub deadline: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    #[topic]
    pub backer: Address,
    #[topic]
    pub project_id: u64,
    pub amount: i128,
    pub voting_power: i128,
    pub total_raised: i128,
}

/// Emitted once, on the deposit that lifts a project out of fundraising.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingGoalReachedEvent {
    #[topic]
    pub project_id: u64,
    pub goal: i128,
    pub total_raised: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofSubmittedEvent {
    #[topic]
    pub project_id: u64,
    pub index: u32,
    pub proof: String,
    pub voting_start: u32,
    pub voting_end: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    #[topic]
    pub voter: Address,
    #[topic]
    pub project_id: u64,
    pub index: u32,
    pub approve: bool,
    pub power: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneFinalizedEvent {
    #[topic]
    pub project_id: u64,
    pub index: u32,
    pub status: MilestoneStatus,
    pub votes_for: i128,
    pub votes_against: i128,
    pub approval_bps: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutEvent {
    #[topic]
    pub recipient: Address,
    #[topic]
    pub project_id: u64,
    pub amount: i128,
    pub remaining: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectStatusChangedEvent {
    #[topic]
    pub project_id: u64,
    pub old_status: ProjectStatus,
    pub new_status: ProjectStatus,
}

/// Emitted when the contract WASM is upgraded to a new hash.
#[contractevent]
pub struct UpgradedEvent {
    #[topic]
    pub admin: Address,
    pub new_wasm_hash: BytesN<32>,
}

/// Emitted when the admin role is transferred to a new address.
#[contractevent]
pub struct AdminChangedEvent {
    #[topic]
    pub old_admin: Address,
    pub new_admin: Address,
}
