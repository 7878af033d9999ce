use soroban_sdk::{contracttype, Address, Env, IntoVal, String, Val};

use crate::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT,
    RECORD_LIFETIME_THRESHOLD,
};
use crate::errors::VaultError;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                   // -> Address
    Token,                   // -> Address
    NextProjectId,           // -> u64
    Project(u64),            // -> ProjectData
    ProjectBalance(u64),     // project_id -> i128 held in custody
    Milestone(u64, u32),     // (project_id, index) -> MilestoneData
    Backer(u64, Address),    // (project_id, account) -> BackerData
    Vote(u64, u32, Address), // (project_id, index, account) -> VoteData
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    Fundraising = 0,
    Active = 1,
    Completed = 2,
    Failed = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    Locked = 0,
    Voting = 1,
    Approved = 2,
    Rejected = 3,
    Paid = 4,
}

impl MilestoneStatus {
    /// Rejected and Paid milestones never change again.
    pub fn is_terminal(self) -> bool {
        match self {
            MilestoneStatus::Rejected | MilestoneStatus::Paid => true,
            MilestoneStatus::Locked | MilestoneStatus::Voting | MilestoneStatus::Approved => false,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectData {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub goal: i128,
    pub total_raised: i128,
    pub total_released: i128,
    pub milestone_count: u32,
    pub milestones_completed: u32,
    pub milestones_allocated: i128,
    pub status: ProjectStatus,
    pub created_at: u32,
    pub deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackerData {
    pub amount: i128,
    pub voting_power: i128,
    pub first_contribution: u32,
    pub last_contribution: u32,
    pub refunded: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneData {
    pub index: u32,
    pub title: String,
    pub description: String,
    pub amount: i128,
    pub deadline: u32,
    pub status: MilestoneStatus,
    pub votes_for: i128,
    pub votes_against: i128,
    pub voting_start: u32,
    pub proof: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteData {
    pub approve: bool,
    pub power: i128,
    pub cast_at: u32,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn write_record<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    let storage = env.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn require_initialized(env: &Env) -> Result<(), VaultError> {
    if !is_initialized(env) {
        return Err(VaultError::NotInitialized);
    }
    bump_instance(env);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_token(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextProjectId)
        .unwrap_or(0)
}

pub fn reset_project_counter(env: &Env) {
    env.storage().instance().set(&DataKey::NextProjectId, &0u64);
}

/// Hands out the next sequential project id.
pub fn next_project_id(env: &Env) -> Result<u64, VaultError> {
    let id = project_count(env);
    let next = id.checked_add(1).ok_or(VaultError::Overflow)?;
    env.storage().instance().set(&DataKey::NextProjectId, &next);
    Ok(id)
}

pub fn load_project(env: &Env, project_id: u64) -> Result<ProjectData, VaultError> {
    env.storage()
        .persistent()
        .get(&DataKey::Project(project_id))
        .ok_or(VaultError::ProjectNotFound)
}

pub fn save_project(env: &Env, project: &ProjectData) {
    write_record(env, &DataKey::Project(project.id), project);
}

pub fn custody_balance(env: &Env, project_id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ProjectBalance(project_id))
        .unwrap_or(0)
}

pub fn set_custody_balance(env: &Env, project_id: u64, balance: i128) {
    write_record(env, &DataKey::ProjectBalance(project_id), &balance);
}

pub fn load_milestone(env: &Env, project_id: u64, index: u32) -> Result<MilestoneData, VaultError> {
    env.storage()
        .persistent()
        .get(&DataKey::Milestone(project_id, index))
        .ok_or(VaultError::MilestoneNotFound)
}

pub fn save_milestone(env: &Env, project_id: u64, milestone: &MilestoneData) {
    write_record(env, &DataKey::Milestone(project_id, milestone.index), milestone);
}

pub fn load_backer(env: &Env, project_id: u64, account: &Address) -> Option<BackerData> {
    env.storage()
        .persistent()
        .get(&DataKey::Backer(project_id, account.clone()))
}

pub fn save_backer(env: &Env, project_id: u64, account: &Address, backer: &BackerData) {
    write_record(env, &DataKey::Backer(project_id, account.clone()), backer);
}

pub fn load_vote(env: &Env, project_id: u64, index: u32, account: &Address) -> Option<VoteData> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(project_id, index, account.clone()))
}

pub fn has_vote(env: &Env, project_id: u64, index: u32, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vote(project_id, index, account.clone()))
}

/// Stores a vote only if none exists for the (project, milestone, account) triple.
pub fn insert_vote(
    env: &Env,
    project_id: u64,
    index: u32,
    account: &Address,
    vote: &VoteData,
) -> Result<(), VaultError> {
    if has_vote(env, project_id, index, account) {
        return Err(VaultError::AlreadyVoted);
    }
    write_record(env, &DataKey::Vote(project_id, index, account.clone()), vote);
    Ok(())
}
