use steel::*;
use crate::consts::*;

pub fn mining_pool_pda(maker: Pubkey, mint: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINING_POOL, maker.as_ref(), mint.as_ref()], &crate::id())
}

pub fn reward_state_pda(maker: Pubkey, pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINING_POOL_REWARD, maker.as_ref(), pool.as_ref()], &crate::id())
}

pub fn miner_pda(authority: Pubkey, pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINER, authority.as_ref(), pool.as_ref()], &crate::id())
}

/// The pool's token vault: the associated token account owned by the pool PDA.
pub fn vault_address(pool: Pubkey, mint: Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(&pool, &mint)
}
