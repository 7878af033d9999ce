/// Ledgers closed per day at a 5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Length of a milestone voting window, in ledgers.
pub const VOTING_PERIOD: u32 = 2 * DAY_IN_LEDGERS;

/// Share of cast voting power needed to approve a milestone (50%).
pub const APPROVAL_THRESHOLD_BPS: i128 = 5_000;
pub const BPS_DENOMINATOR: i128 = 10_000;

pub const MAX_MILESTONES: u32 = 20;

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const RECORD_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const RECORD_LIFETIME_THRESHOLD: u32 = RECORD_BUMP_AMOUNT - DAY_IN_LEDGERS;
