//! Closes a voting window and settles the milestone. Permissionless: the
//! outcome depends only on votes already recorded.

use soroban_sdk::{log, Env};

use crate::constants::APPROVAL_THRESHOLD_BPS;
use crate::custody;
use crate::errors::VaultError;
use crate::events::MilestoneFinalizedEvent;
use crate::lifecycle;
use crate::registry;
use crate::storage::{self, MilestoneStatus};
use crate::voting;

pub fn finalize_milestone(
    env: &Env,
    project_id: u64,
    index: u32,
) -> Result<MilestoneStatus, VaultError> {
    let mut project = storage::load_project(env, project_id)?;
    let mut milestone = storage::load_milestone(env, project_id, index)?;

    // Check the voting window has closed
    if !lifecycle::is_ready_to_finalize(&milestone, env.ledger().sequence()) {
        return Err(VaultError::MilestoneNotReady);
    }

    let approval_bps = voting::approval_bps(milestone.votes_for, milestone.votes_against);
    let approved = approval_bps >= APPROVAL_THRESHOLD_BPS;

    // Release the tranche, or close the milestone with no fund movement
    if approved {
        milestone.status = MilestoneStatus::Approved;
        let creator = project.creator.clone();
        custody::payout(env, &mut project, &creator, milestone.amount)?;
        milestone.status = MilestoneStatus::Paid;
        project.milestones_completed = project
            .milestones_completed
            .checked_add(1)
            .ok_or(VaultError::Overflow)?;
    } else {
        milestone.status = MilestoneStatus::Rejected;
    }
    storage::save_milestone(env, project_id, &milestone);

    registry::complete_if_settled(env, &mut project)?;
    storage::save_project(env, &project);

    log!(env, "milestone finalized", project_id, index, approved);
    MilestoneFinalizedEvent {
        project_id,
        index,
        status: milestone.status,
        votes_for: milestone.votes_for,
        votes_against: milestone.votes_against,
        approval_bps,
    }
    .publish(env);

    Ok(milestone.status)
}
