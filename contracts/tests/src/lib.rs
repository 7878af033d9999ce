#![cfg(test)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use milestone_vault::constants::VOTING_PERIOD;
use milestone_vault::{
    MilestoneStatus, MilestoneVaultContract, MilestoneVaultContractClient as VaultClient,
    ProjectStatus, VaultError,
};

struct Protocol<'a> {
    vault: VaultClient<'a>,
    vault_id: Address,
    token: TokenClient<'a>,
    creator: Address,
    backer_a: Address,
    backer_b: Address,
    project_id: u64,
}

/// Goal 1,000,000 with one 200,000 milestone, funded 400,000 + 700,000 and
/// opened for voting.
fn funded_protocol<'a>(env: &Env) -> Protocol<'a> {
    env.mock_all_auths();
    env.ledger().with_mut(|li| {
        li.sequence_number = 1_000;
        li.min_persistent_entry_ttl = 1_000_000;
        li.min_temp_entry_ttl = 1_000_000;
    });

    let admin = Address::generate(env);
    let creator = Address::generate(env);
    let backer_a = Address::generate(env);
    let backer_b = Address::generate(env);

    let sac = env.register_stellar_asset_contract_v2(admin.clone());
    let token = TokenClient::new(env, &sac.address());
    let token_admin = StellarAssetClient::new(env, &sac.address());
    token_admin.mint(&backer_a, &400_000);
    token_admin.mint(&backer_b, &700_000);

    let vault_id = env.register(MilestoneVaultContract, ());
    let vault = VaultClient::new(env, &vault_id);
    vault.initialize(&admin, &token.address);

    let project_id = vault.create_project(
        &creator,
        &String::from_str(env, "Community Garden"),
        &1_000_000,
        &20_000,
    );
    vault.add_milestone(
        &project_id,
        &creator,
        &String::from_str(env, "Raised beds"),
        &String::from_str(env, "Build and install the beds"),
        &200_000,
        &60_000,
    );

    vault.deposit(&backer_a, &project_id, &400_000);
    assert_eq!(
        vault.get_project(&project_id).status,
        ProjectStatus::Fundraising
    );
    vault.deposit(&backer_b, &project_id, &700_000);

    let project = vault.get_project(&project_id);
    assert_eq!(project.total_raised, 1_100_000);
    assert_eq!(project.status, ProjectStatus::Active);

    let late = vault.try_add_milestone(
        &project_id,
        &creator,
        &String::from_str(env, "Greenhouse"),
        &String::from_str(env, "Added after funding"),
        &100_000,
        &60_000,
    );
    assert_eq!(late, Err(Ok(VaultError::NotActive)));

    let early = vault.try_vote(&project_id, &0, &backer_a, &true);
    assert_eq!(early, Err(Ok(VaultError::MilestoneNotReady)));

    vault.submit_proof(
        &project_id,
        &0,
        &creator,
        &String::from_str(env, "ipfs://raised-beds-photos"),
    );

    Protocol {
        vault,
        vault_id,
        token,
        creator,
        backer_a,
        backer_b,
        project_id,
    }
}

fn close_voting_window(env: &Env) {
    env.ledger()
        .set_sequence_number(env.ledger().sequence() + VOTING_PERIOD + 1);
}

#[test]
fn test_split_vote_rejects_milestone() {
    let env = Env::default();
    let p = funded_protocol(&env);

    p.vault.vote(&p.project_id, &0, &p.backer_a, &true);
    p.vault.vote(&p.project_id, &0, &p.backer_b, &false);

    let milestone = p.vault.get_milestone(&p.project_id, &0);
    assert_eq!(milestone.votes_for, 400_000);
    assert_eq!(milestone.votes_against, 700_000);

    close_voting_window(&env);
    let status = p.vault.finalize_milestone(&p.project_id, &0);
    assert_eq!(status, MilestoneStatus::Rejected);

    assert_eq!(p.vault.get_balance(&p.project_id), 1_100_000);
    assert_eq!(p.token.balance(&p.vault_id), 1_100_000);
    assert_eq!(p.token.balance(&p.creator), 0);
    assert_eq!(p.vault.get_project(&p.project_id).milestones_completed, 0);
}

#[test]
fn test_unanimous_vote_releases_tranche() {
    let env = Env::default();
    let p = funded_protocol(&env);

    p.vault.vote(&p.project_id, &0, &p.backer_a, &true);
    p.vault.vote(&p.project_id, &0, &p.backer_b, &true);
    assert_eq!(p.vault.get_approval_bps(&p.project_id, &0), 10_000);

    let again = p.vault.try_vote(&p.project_id, &0, &p.backer_b, &true);
    assert_eq!(again, Err(Ok(VaultError::AlreadyVoted)));

    close_voting_window(&env);
    let status = p.vault.finalize_milestone(&p.project_id, &0);
    assert_eq!(status, MilestoneStatus::Paid);

    assert_eq!(p.vault.get_balance(&p.project_id), 900_000);
    assert_eq!(p.token.balance(&p.vault_id), 900_000);
    assert_eq!(p.token.balance(&p.creator), 200_000);
    assert_eq!(p.vault.get_project(&p.project_id).milestones_completed, 1);

    let replay = p.vault.try_finalize_milestone(&p.project_id, &0);
    assert_eq!(replay, Err(Ok(VaultError::MilestoneNotReady)));
    assert_eq!(p.token.balance(&p.creator), 200_000);

    std::println!("milestone payout flow passed");
}
