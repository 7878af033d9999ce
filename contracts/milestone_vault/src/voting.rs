//! Weighted voting and tally.

use soroban_sdk::{Address, Env};

use crate::constants::BPS_DENOMINATOR;
use crate::errors::VaultError;
use crate::events::VoteCastEvent;
use crate::lifecycle;
use crate::storage::{self, VoteData};

/// Approval ratio of cast power in basis points. No votes at all counts as 0.
///
/// Never fails, so a closed window can always be finalized.
pub fn approval_bps(votes_for: i128, votes_against: i128) -> i128 {
    let total = votes_for.saturating_add(votes_against);
    let denominator = if total == 0 { 1 } else { total };
    match votes_for.checked_mul(BPS_DENOMINATOR) {
        Some(scaled) => scaled / denominator,
        // votes_for > i128::MAX / BPS_DENOMINATOR here, so the scaled-down
        // denominator is non-zero.
        None => votes_for / (denominator / BPS_DENOMINATOR),
    }
}

/// Records one vote for `voter`, weighted by their full voting power in the
/// project.
pub fn vote(
    env: &Env,
    project_id: u64,
    index: u32,
    voter: &Address,
    approve: bool,
) -> Result<VoteData, VaultError> {
    storage::load_project(env, project_id)?;
    let mut milestone = storage::load_milestone(env, project_id, index)?;

    let now = env.ledger().sequence();
    if !lifecycle::is_voting_open(&milestone, now) {
        return Err(VaultError::MilestoneNotReady);
    }

    let power = storage::load_backer(env, project_id, voter)
        .map(|backer| backer.voting_power)
        .unwrap_or(0);
    if power <= 0 {
        return Err(VaultError::NotAuthorized);
    }
    if approve {
        milestone.votes_for = milestone
            .votes_for
            .checked_add(power)
            .ok_or(VaultError::Overflow)?;
    } else {
        milestone.votes_against = milestone
            .votes_against
            .checked_add(power)
            .ok_or(VaultError::Overflow)?;
    }

    let record = VoteData {
        approve,
        power,
        cast_at: now,
    };
    storage::insert_vote(env, project_id, index, voter, &record)?;
    storage::save_milestone(env, project_id, &milestone);

    VoteCastEvent {
        voter: voter.clone(),
        project_id,
        index,
        approve,
        power,
    }
    .publish(env);

    Ok(record)
}
