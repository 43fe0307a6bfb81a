use steel::*;
use super::AccountType;
use crate::state;

/// A pre-funded pool of tokens that miners earn from. The vault (the pool's associated token
/// account) always holds `amount + total_staked`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MiningPool {
    pub maker: Pubkey,
    pub mint: Pubkey,

    /// Funded tokens not yet paid out (includes rewards accrued but unclaimed).
    pub amount: u64,
    pub total_staked: u64,

    pub reward_per_epoch: u64,
    pub difficulty: u64,
    pub decimals: u64,

    pub bump: u64,
}

state!(AccountType, MiningPool);
