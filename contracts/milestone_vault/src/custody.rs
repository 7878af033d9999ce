//! Fund custody ledger: the only code that moves tokens in or out of the
//! contract. Every check runs before the token call, and storage is written
//! after it, so a failed call leaves no trace.

use soroban_sdk::{log, Address, Env};

use crate::errors::VaultError;
use crate::events::{DepositEvent, PayoutEvent};
use crate::registry;
use crate::storage::{self, BackerData, ProjectData, ProjectStatus};
use crate::token;

/// Pulls `amount` from `backer` into project custody and grows the backer's
/// contribution and voting power by the same amount.
pub fn deposit(
    env: &Env,
    backer: &Address,
    project_id: u64,
    amount: i128,
) -> Result<BackerData, VaultError> {
    // Validate amount
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }

    let mut project = storage::load_project(env, project_id)?;
    let now = env.ledger().sequence();

    // A project with nothing to release could never leave Active.
    if project.milestone_count == 0 {
        return Err(VaultError::NotActive);
    }

    // Check the raise is still open
    match project.status {
        ProjectStatus::Fundraising | ProjectStatus::Active => {}
        ProjectStatus::Completed | ProjectStatus::Failed => {
            return Err(VaultError::CampaignClosed)
        }
    }
    if now > project.deadline {
        return Err(VaultError::CampaignClosed);
    }

    // Check the backer can cover the transfer
    let token_address = storage::get_token(env)?;
    if token::balance(env, &token_address, backer) < amount {
        return Err(VaultError::InsufficientFunds);
    }

    let total_raised = project
        .total_raised
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    let custody = storage::custody_balance(env, project_id)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    let mut record = storage::load_backer(env, project_id, backer).unwrap_or(BackerData {
        amount: 0,
        voting_power: 0,
        first_contribution: now,
        last_contribution: now,
        refunded: false,
    });
    record.amount = record
        .amount
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    record.voting_power = record
        .voting_power
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    record.last_contribution = now;

    // Transfer tokens from backer to contract
    let contract_address = env.current_contract_address();
    token::transfer(env, &token_address, backer, &contract_address, &amount);

    // Commit balances and the backer record
    project.total_raised = total_raised;
    storage::set_custody_balance(env, project_id, custody);
    storage::save_backer(env, project_id, backer, &record);

    if project.status == ProjectStatus::Fundraising && project.total_raised >= project.goal {
        registry::goal_reached(env, &mut project);
    }
    storage::save_project(env, &project);

    log!(env, "deposit", project_id, amount, total_raised);
    DepositEvent {
        backer: backer.clone(),
        project_id,
        amount,
        voting_power: record.voting_power,
        total_raised,
    }
    .publish(env);

    Ok(record)
}

/// Releases `amount` from project custody to `recipient`. Only finalization
/// reaches this. Returns the custody balance left behind.
pub(crate) fn payout(
    env: &Env,
    project: &mut ProjectData,
    recipient: &Address,
    amount: i128,
) -> Result<i128, VaultError> {
    // Check custody covers the tranche
    let balance = storage::custody_balance(env, project.id);
    if balance < amount {
        return Err(VaultError::InsufficientEscrow);
    }
    let total_released = project
        .total_released
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    // Transfer tokens from contract to recipient
    let token_address = storage::get_token(env)?;
    let contract_address = env.current_contract_address();
    token::transfer(env, &token_address, &contract_address, recipient, &amount);

    let remaining = balance - amount;
    storage::set_custody_balance(env, project.id, remaining);
    project.total_released = total_released;

    PayoutEvent {
        recipient: recipient.clone(),
        project_id: project.id,
        amount,
        remaining,
    }
    .publish(env);

    Ok(remaining)
}
