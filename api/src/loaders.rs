use steel::*;

use crate::consts::*;
use crate::state::{Miner, MiningPool, MiningPoolRewardState};

pub trait AccountInfoLoader {
    fn is_mining_pool(&self) -> Result<&Self, ProgramError>;
    fn is_reward_state(&self, maker: &Pubkey, pool: &Pubkey) -> Result<&Self, ProgramError>;
    fn is_miner(&self, authority: &Pubkey, pool: &Pubkey) -> Result<&Self, ProgramError>;
    fn is_vault(&self, pool: &Pubkey, mint: &Pubkey) -> Result<&Self, ProgramError>;
}

impl AccountInfoLoader for AccountInfo<'_> {
    fn is_mining_pool(&self) -> Result<&Self, ProgramError> {
        let pool = self.as_account::<MiningPool>(&crate::ID)?;
        self.has_seeds(
            &[MINING_POOL, pool.maker.as_ref(), pool.mint.as_ref()],
            &crate::ID,
        )
    }

    fn is_reward_state(&self, maker: &Pubkey, pool: &Pubkey) -> Result<&Self, ProgramError> {
        self.has_seeds(&[MINING_POOL_REWARD, maker.as_ref(), pool.as_ref()], &crate::ID)?
            .is_type::<MiningPoolRewardState>(&crate::ID)
    }

    fn is_miner(&self, authority: &Pubkey, pool: &Pubkey) -> Result<&Self, ProgramError> {
        self.has_seeds(&[MINER, authority.as_ref(), pool.as_ref()], &crate::ID)?
            .is_type::<Miner>(&crate::ID)
    }

    fn is_vault(&self, pool: &Pubkey, mint: &Pubkey) -> Result<&Self, ProgramError> {
        self.has_address(&crate::pda::vault_address(*pool, *mint))
    }
}
