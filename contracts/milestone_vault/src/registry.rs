//! Project registry: project creation, the milestone list and project-level
//! status.

use soroban_sdk::{Address, Env, String};

use crate::constants::MAX_MILESTONES;
use crate::errors::VaultError;
use crate::events::{
    FundingGoalReachedEvent, MilestoneAddedEvent, ProjectCreatedEvent, ProjectStatusChangedEvent,
};
use crate::storage::{self, MilestoneData, MilestoneStatus, ProjectData, ProjectStatus};

pub fn create_project(
    env: &Env,
    creator: &Address,
    title: String,
    goal: i128,
    fundraise_duration: u32,
) -> Result<u64, VaultError> {
    if goal <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if title.is_empty() {
        return Err(VaultError::InvalidTitle);
    }
    if fundraise_duration == 0 {
        return Err(VaultError::InvalidDuration);
    }

    let now = env.ledger().sequence();
    let deadline = now
        .checked_add(fundraise_duration)
        .ok_or(VaultError::Overflow)?;
    let project_id = storage::next_project_id(env)?;

    let project = ProjectData {
        id: project_id,
        creator: creator.clone(),
        title: title.clone(),
        goal,
        total_raised: 0,
        total_released: 0,
        milestone_count: 0,
        milestones_completed: 0,
        milestones_allocated: 0,
        status: ProjectStatus::Fundraising,
        created_at: now,
        deadline,
    };
    storage::save_project(env, &project);
    storage::set_custody_balance(env, project_id, 0);

    ProjectCreatedEvent {
        creator: creator.clone(),
        project_id,
        title,
        goal,
        deadline,
    }
    .publish(env);

    Ok(project_id)
}

/// Appends a milestone at the next dense index. Only the creator may do this,
/// and only while the project is still raising.
pub fn add_milestone(
    env: &Env,
    project_id: u64,
    creator: &Address,
    title: String,
    description: String,
    amount: i128,
    deadline: u32,
) -> Result<u32, VaultError> {
    let mut project = storage::load_project(env, project_id)?;
    if project.creator != *creator {
        return Err(VaultError::NotAuthorized);
    }
    if project.status != ProjectStatus::Fundraising {
        return Err(VaultError::NotActive);
    }
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if title.is_empty() {
        return Err(VaultError::InvalidTitle);
    }
    if project.milestone_count >= MAX_MILESTONES {
        return Err(VaultError::TooManyMilestones);
    }

    // Milestones may never claim more than the goal.
    let allocated = project
        .milestones_allocated
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    if allocated > project.goal {
        return Err(VaultError::InvalidAmount);
    }

    let index = project.milestone_count;
    let milestone = MilestoneData {
        index,
        title,
        description,
        amount,
        deadline,
        status: MilestoneStatus::Locked,
        votes_for: 0,
        votes_against: 0,
        voting_start: 0,
        proof: String::from_str(env, ""),
    };
    storage::save_milestone(env, project_id, &milestone);

    project.milestone_count = index + 1;
    project.milestones_allocated = allocated;
    storage::save_project(env, &project);

    MilestoneAddedEvent {
        project_id,
        index,
        amount,
        deadline,
    }
    .publish(env);

    Ok(index)
}

/// Marks a project whose raise window closed short of its goal as failed.
/// Anyone may call this; it moves no funds.
pub fn mark_failed(env: &Env, project_id: u64) -> Result<(), VaultError> {
    let mut project = storage::load_project(env, project_id)?;
    if project.status != ProjectStatus::Fundraising {
        return Err(VaultError::NotActive);
    }
    if env.ledger().sequence() <= project.deadline {
        return Err(VaultError::NotActive);
    }

    set_status(env, &mut project, ProjectStatus::Failed);
    storage::save_project(env, &project);
    Ok(())
}

/// Fundraising -> Active. The caller persists the project.
pub(crate) fn goal_reached(env: &Env, project: &mut ProjectData) {
    set_status(env, project, ProjectStatus::Active);
    FundingGoalReachedEvent {
        project_id: project.id,
        goal: project.goal,
        total_raised: project.total_raised,
    }
    .publish(env);
}

/// Active -> Completed once every milestone is settled. The caller persists
/// the project.
pub(crate) fn complete_if_settled(env: &Env, project: &mut ProjectData) -> Result<(), VaultError> {
    if project.status != ProjectStatus::Active {
        return Ok(());
    }
    for index in 0..project.milestone_count {
        let milestone = storage::load_milestone(env, project.id, index)?;
        if !milestone.status.is_terminal() {
            return Ok(());
        }
    }
    set_status(env, project, ProjectStatus::Completed);
    Ok(())
}

fn set_status(env: &Env, project: &mut ProjectData, new_status: ProjectStatus) {
    let old_status = project.status;
    project.status = new_status;
    ProjectStatusChangedEvent {
        project_id: project.id,
        old_status,
        new_status,
    }
    .publish(env);
}
