use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    ProjectNotFound = 4,
    MilestoneNotFound = 5,
    BackerNotFound = 6,
    VoteNotFound = 7,
    InvalidAmount = 8,
    InvalidTitle = 9,
    InvalidDuration = 10,
    NotActive = 11,
    CampaignClosed = 12,
    TooManyMilestones = 13,
    AlreadyVoted = 14,
    MilestoneNotReady = 15,
    InsufficientFunds = 16,
    InsufficientEscrow = 17,
    Overflow = 18,
}
