use steel::*;
use super::{AccountType, Delegated, Delegation};
use crate::state;

/// Tokens of a pool set aside for issuance to miners. Funds here cannot be reclaimed by the
/// pool maker, they only leave through miner rewards.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MiningPoolRewardState {
    pub pool: Pubkey,
    pub authority: Pubkey,

    pub amount: u64,
    pub total_issued: u64,

    pub bump: u64,

    pub delegation: Delegation,
}

state!(AccountType, MiningPoolRewardState);

impl Delegated for MiningPoolRewardState {
    fn authority(&self) -> Pubkey {
        self.authority
    }

    fn pool(&self) -> Pubkey {
        self.pool
    }

    fn bump(&self) -> u64 {
        self.bump
    }

    fn delegation(&self) -> &Delegation {
        &self.delegation
    }

    fn delegation_mut(&mut self) -> &mut Delegation {
        &mut self.delegation
    }
}
