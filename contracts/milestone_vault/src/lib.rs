#![no_std]

pub mod constants;
mod custody;
mod errors;
mod events;
mod finalize;
mod lifecycle;
mod registry;
mod storage;
mod token;
mod voting;

pub use errors::VaultError;
pub use storage::{BackerData, MilestoneData, MilestoneStatus, ProjectData, ProjectStatus, VoteData};

use events::{AdminChangedEvent, InitializedEvent, UpgradedEvent};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String};

#[contract]
pub struct MilestoneVaultContract;

#[contractimpl]
impl MilestoneVaultContract {
    /// Initialize the contract with an admin and the token held in custody
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }

        admin.require_auth();

        storage::set_admin(&env, &admin);
        storage::set_token(&env, &token);
        storage::reset_project_counter(&env);
        storage::bump_instance(&env);

        InitializedEvent { admin, token }.publish(&env);
        Ok(())
    }

    /// Create a new project that raises toward `goal` for `fundraise_duration` ledgers
    pub fn create_project(
        env: Env,
        creator: Address,
        title: String,
        goal: i128,
        fundraise_duration: u32,
    ) -> Result<u64, VaultError> {
        storage::require_initialized(&env)?;
        creator.require_auth();
        registry::create_project(&env, &creator, title, goal, fundraise_duration)
    }

    /// Append a milestone to a project that is still fundraising (creator only)
    pub fn add_milestone(
        env: Env,
        project_id: u64,
        creator: Address,
        title: String,
        description: String,
        amount: i128,
        deadline: u32,
    ) -> Result<u32, VaultError> {
        storage::require_initialized(&env)?;
        creator.require_auth();
        registry::add_milestone(&env, project_id, &creator, title, description, amount, deadline)
    }

    /// Deposit funds into a project; the backer's voting power grows by `amount`
    pub fn deposit(
        env: Env,
        backer: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<BackerData, VaultError> {
        storage::require_initialized(&env)?;
        backer.require_auth();
        custody::deposit(&env, &backer, project_id, amount)
    }

    /// Submit proof for a locked milestone and open its voting window (creator only)
    pub fn submit_proof(
        env: Env,
        project_id: u64,
        milestone: u32,
        creator: Address,
        proof: String,
    ) -> Result<MilestoneData, VaultError> {
        storage::require_initialized(&env)?;
        creator.require_auth();
        lifecycle::submit_proof(&env, project_id, milestone, &creator, proof)
    }

    /// Cast a weighted vote on a milestone in its voting window (backers only)
    pub fn vote(
        env: Env,
        project_id: u64,
        milestone: u32,
        voter: Address,
        approve: bool,
    ) -> Result<VoteData, VaultError> {
        storage::require_initialized(&env)?;
        voter.require_auth();
        voting::vote(&env, project_id, milestone, &voter, approve)
    }

    /// Settle a milestone whose voting window has closed. Anyone may call this.
    pub fn finalize_milestone(
        env: Env,
        project_id: u64,
        milestone: u32,
    ) -> Result<MilestoneStatus, VaultError> {
        storage::require_initialized(&env)?;
        finalize::finalize_milestone(&env, project_id, milestone)
    }

    /// Flag a project whose raise closed short of its goal. Anyone may call this.
    pub fn mark_failed(env: Env, project_id: u64) -> Result<(), VaultError> {
        storage::require_initialized(&env)?;
        registry::mark_failed(&env, project_id)
    }

    /// Get project data
    pub fn get_project(env: Env, project_id: u64) -> Result<ProjectData, VaultError> {
        storage::load_project(&env, project_id)
    }

    /// Get milestone data
    pub fn get_milestone(
        env: Env,
        project_id: u64,
        milestone: u32,
    ) -> Result<MilestoneData, VaultError> {
        storage::load_project(&env, project_id)?;
        storage::load_milestone(&env, project_id, milestone)
    }

    /// Get a backer's contribution record
    pub fn get_backer(env: Env, project_id: u64, backer: Address) -> Result<BackerData, VaultError> {
        storage::load_project(&env, project_id)?;
        storage::load_backer(&env, project_id, &backer).ok_or(VaultError::BackerNotFound)
    }

    /// Get the vote `voter` cast on a milestone
    pub fn get_vote(
        env: Env,
        project_id: u64,
        milestone: u32,
        voter: Address,
    ) -> Result<VoteData, VaultError> {
        storage::load_milestone(&env, project_id, milestone)?;
        storage::load_vote(&env, project_id, milestone, &voter).ok_or(VaultError::VoteNotFound)
    }

    /// Check whether `voter` has already voted on a milestone
    pub fn has_voted(env: Env, project_id: u64, milestone: u32, voter: Address) -> bool {
        storage::has_vote(&env, project_id, milestone, &voter)
    }

    /// Get the balance held in custody for a project
    pub fn get_balance(env: Env, project_id: u64) -> Result<i128, VaultError> {
        storage::load_project(&env, project_id)?;
        Ok(storage::custody_balance(&env, project_id))
    }

    /// Current approval ratio of a milestone, in basis points
    pub fn get_approval_bps(env: Env, project_id: u64, milestone: u32) -> Result<i128, VaultError> {
        let milestone = storage::load_milestone(&env, project_id, milestone)?;
        Ok(voting::approval_bps(milestone.votes_for, milestone.votes_against))
    }

    /// Get the number of projects created so far
    pub fn get_project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, VaultError> {
        storage::get_admin(&env)
    }

    /// Get custody token address
    pub fn get_token(env: Env) -> Result<Address, VaultError> {
        storage::get_token(&env)
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), VaultError> {
        let admin = storage::get_admin(&env)?;
        if caller != admin {
            return Err(VaultError::NotAuthorized);
        }
        caller.require_auth();
        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());
        UpgradedEvent {
            admin: caller,
            new_wasm_hash,
        }
        .publish(&env);
        Ok(())
    }

    /// Transfer the admin role to `new_admin`.
    ///
    /// Requires authorization from the current admin. Emits [`AdminChangedEvent`].
    pub fn set_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), VaultError> {
        let stored_admin = storage::get_admin(&env)?;
        if current_admin != stored_admin {
            return Err(VaultError::NotAuthorized);
        }
        current_admin.require_auth();
        storage::set_admin(&env, &new_admin);
        storage::bump_instance(&env);
        AdminChangedEvent {
            old_admin: current_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }
}
