use steel::*;
use super::{AccountType, Delegated, Delegation};
use crate::state;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Miner {
    pub authority: Pubkey,
    pub pool: Pubkey,

    pub difficulty: u64,
    pub last_epoch_mined: u64,

    pub rewards: u64,
    pub multiplier: u64,

    pub staked_amount: u64,
    pub last_staked_at: i64,

    pub total_rewards: u64,
    pub total_proofs: u64,

    pub bump: u64,

    pub delegation: Delegation,
}

state!(AccountType, Miner);

impl Miner {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }
}

impl Delegated for Miner {
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
