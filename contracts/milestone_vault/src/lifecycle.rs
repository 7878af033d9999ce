//! Per-milestone state machine.
//!
//! ```text
//! Locked --submit_proof--> Voting --finalize--> Approved --payout--> Paid
//!                                   \-------------------> Rejected
//! ```

use soroban_sdk::{Address, Env, String};

use crate::constants::VOTING_PERIOD;
use crate::errors::VaultError;
use crate::events::ProofSubmittedEvent;
use crate::storage::{self, MilestoneData, MilestoneStatus, ProjectStatus};

/// Last ledger on which votes are still accepted.
pub fn voting_end(milestone: &MilestoneData) -> u32 {
    milestone.voting_start.saturating_add(VOTING_PERIOD)
}

pub fn is_voting_open(milestone: &MilestoneData, now: u32) -> bool {
    milestone.status == MilestoneStatus::Voting && now <= voting_end(milestone)
}

pub fn is_ready_to_finalize(milestone: &MilestoneData, now: u32) -> bool {
    milestone.status == MilestoneStatus::Voting && now > voting_end(milestone)
}

/// Creator attaches proof of delivery and opens the voting window.
pub fn submit_proof(
    env: &Env,
    project_id: u64,
    index: u32,
    creator: &Address,
    proof: String,
) -> Result<MilestoneData, VaultError> {
    let project = storage::load_project(env, project_id)?;
    if project.creator != *creator {
        return Err(VaultError::NotAuthorized);
    }
    if project.status != ProjectStatus::Active {
        return Err(VaultError::NotActive);
    }

    let mut milestone = storage::load_milestone(env, project_id, index)?;
    match milestone.status {
        MilestoneStatus::Locked => {}
        MilestoneStatus::Voting
        | MilestoneStatus::Approved
        | MilestoneStatus::Rejected
        | MilestoneStatus::Paid => return Err(VaultError::NotActive),
    }

    milestone.status = MilestoneStatus::Voting;
    milestone.voting_start = env.ledger().sequence();
    milestone.proof = proof.clone();
    storage::save_milestone(env, project_id, &milestone);

    ProofSubmittedEvent {
        project_id,
        index,
        proof,
        voting_start: milestone.voting_start,
        voting_end: voting_end(&milestone),
    }
    .publish(env);

    Ok(milestone)
}
