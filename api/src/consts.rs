use crate::types::ClaimPolicy;

pub const MINING_POOL: &[u8]               = b"mining_pool";
pub const MINING_POOL_REWARD: &[u8]        = b"mining_pool_reward";
pub const MINER: &[u8]                     = b"miner";

/// Domain separator for undelegation commitment ids.
pub const COMMIT: &[u8]                    = b"commit";

// Ledger height (slots) per mining epoch.
pub const EPOCH_LENGTH: u64                = 150;

// Difficulty is the number of leading zero bytes required in a solution hash. Zero is
// representable but rejected by pool policy, it would make every nonce a solution.
pub const MIN_DIFFICULTY: u64              = 1;
pub const MAX_DIFFICULTY: u64              = 32;

// Sentinel for a miner that has never had a solution accepted.
pub const NEVER_MINED: u64                 = 0;

pub const BASE_MULTIPLIER: u64             = 1;
pub const MAX_MULTIPLIER: u64              = 100;

// Slots a delegation request may wait for the rollup validator before it can be cancelled.
pub const DELEGATION_TIMEOUT: u64          = 600;

pub const HASH_LEN: usize                  = 32;

// Behaviour of a claim with nothing accrued.
pub const CLAIM_POLICY: ClaimPolicy        = ClaimPolicy::Lenient;
