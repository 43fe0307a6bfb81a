use mor_api::prelude::*;
use steel::*;

use crate::host::TokenVault;

/// Open a pool: move `config.amount` from `source` into the vault and set up the pool and its
/// reward state. The records are returned to the caller to persist.
pub fn create_pool<V: TokenVault>(
    maker: Pubkey,
    mint: Pubkey,
    decimals: u64,
    config: &PoolConfig,
    vault: &mut V,
    source: &Pubkey,
) -> Result<(MiningPool, MiningPoolRewardState), ProgramError> {
    config.validate()?;

    check_condition(
        vault.balance_of(source)? >= config.amount,
        MorError::InsufficientFunds,
    )?;

    let (pool_address, pool_bump) = mining_pool_pda(maker, mint);
    let (_reward_address, reward_bump) = reward_state_pda(maker, pool_address);

    vault.transfer_in(source, config.amount)?;

    let pool = MiningPool {
        maker,
        mint,
        amount: config.amount,
        total_staked: 0,
        reward_per_epoch: config.reward_per_epoch,
        difficulty: config.difficulty,
        decimals,
        bump: pool_bump as u64,
    };

    let reward_state = MiningPoolRewardState {
        pool: pool_address,
        authority: maker,
        amount: config.reward_amount,
        total_issued: 0,
        bump: reward_bump as u64,
        delegation: Delegation::zeroed(),
    };

    Ok((pool, reward_state))
}

/// Top up the reward state. The tokens land in the vault and count towards both the pool and
/// the amount available for issuance.
pub fn fund_reward_state<V: TokenVault>(
    pool: &mut MiningPool,
    reward_state: &mut MiningPoolRewardState,
    vault: &mut V,
    source: &Pubkey,
    amount: u64,
) -> ProgramResult {
    let pool_amount = pool.amount
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    let reward_amount = reward_state.amount
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    check_condition(
        vault.balance_of(source)? >= amount,
        MorError::InsufficientFunds,
    )?;

    vault.transfer_in(source, amount)?;

    pool.amount = pool_amount;
    reward_state.amount = reward_amount;

    Ok(())
}

/// Take `amount` out of the reward state for issuance. Leaves the state untouched on failure.
pub fn debit_reward_state(
    reward_state: &mut MiningPoolRewardState,
    amount: u64,
) -> ProgramResult {
    reward_state.amount = reward_state.amount
        .checked_sub(amount)
        .ok_or(MorError::InsufficientRewardPool)?;

    Ok(())
}

/// Pay `amount` of accrued rewards out of the vault.
pub fn payout<V: TokenVault>(
    pool: &mut MiningPool,
    vault: &mut V,
    claimant: &Pubkey,
    amount: u64,
) -> ProgramResult {
    let vault_balance = vault.balance_of(&vault.address())?;

    if vault_balance < amount || pool.amount < amount {
        // Accrued rewards are always backed by the vault, so this is an accounting bug.
        solana_program::msg!(
            "vault cannot cover payout: amount={} pool={} vault={}",
            amount,
            pool.amount,
            vault_balance
        );
        return Err(MorError::InsufficientFunds.into());
    }

    vault.transfer_out(claimant, amount)?;
    pool.amount -= amount;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestVault {
        address: Pubkey,
        balances: HashMap<Pubkey, u64>,
    }

    impl TestVault {
        fn new() -> Self {
            Self { address: Pubkey::new_unique(), balances: HashMap::new() }
        }

        fn move_tokens(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> ProgramResult {
            let available = self.balances.get(&from).copied().unwrap_or(0);
            let remaining = available
                .checked_sub(amount)
                .ok_or(MorError::InsufficientFunds)?;

            self.balances.insert(from, remaining);
            *self.balances.entry(to).or_default() += amount;
            Ok(())
        }
    }

    impl TokenVault for TestVault {
        fn address(&self) -> Pubkey {
            self.address
        }

        fn balance_of(&self, account: &Pubkey) -> Result<u64, ProgramError> {
            Ok(self.balances.get(account).copied().unwrap_or(0))
        }

        fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> ProgramResult {
            self.move_tokens(*from, self.address, amount)
        }

        fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> ProgramResult {
            self.move_tokens(self.address, *to, amount)
        }
    }

    fn config(amount: u64, reward_amount: u64) -> PoolConfig {
        PoolConfig {
            amount,
            reward_amount,
            reward_per_epoch: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn test_create_pool() {
        let maker = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut vault = TestVault::new();
        vault.balances.insert(maker, 1_000);

        let (pool, reward_state) =
            create_pool(maker, mint, 0, &config(500, 200), &mut vault, &maker).unwrap();

        let (pool_address, pool_bump) = mining_pool_pda(maker, mint);
        assert_eq!(pool.amount, 500);
        assert_eq!(pool.bump, pool_bump as u64);
        assert_eq!(reward_state.pool, pool_address);
        assert_eq!(reward_state.amount, 200);
        assert_eq!(reward_state.authority, maker);
        assert_eq!(vault.balance_of(&vault.address()).unwrap(), 500);
        assert_eq!(vault.balance_of(&maker).unwrap(), 500);
    }

    #[test]
    fn test_create_pool_short_source() {
        let maker = Pubkey::new_unique();
        let mut vault = TestVault::new();
        vault.balances.insert(maker, 10);

        let result = create_pool(maker, Pubkey::new_unique(), 0, &config(500, 0), &mut vault, &maker);
        assert_eq!(result.err(), Some(MorError::InsufficientFunds.into()));
        assert_eq!(vault.balance_of(&vault.address()).unwrap(), 0);
    }

    #[test]
    fn test_fund_reward_state() {
        let maker = Pubkey::new_unique();
        let mut vault = TestVault::new();
        vault.balances.insert(maker, 1_000);

        let (mut pool, mut reward_state) =
            create_pool(maker, Pubkey::new_unique(), 0, &config(500, 0), &mut vault, &maker).unwrap();

        fund_reward_state(&mut pool, &mut reward_state, &mut vault, &maker, 300).unwrap();
        assert_eq!(pool.amount, 800);
        assert_eq!(reward_state.amount, 300);
        assert_eq!(vault.balance_of(&vault.address()).unwrap(), 800);

        assert_eq!(
            fund_reward_state(&mut pool, &mut reward_state, &mut vault, &maker, 300),
            Err(MorError::InsufficientFunds.into())
        );
        assert_eq!(pool.amount, 800);

        pool.amount = u64::MAX;
        assert_eq!(
            fund_reward_state(&mut pool, &mut reward_state, &mut vault, &maker, 1),
            Err(ProgramError::ArithmeticOverflow)
        );
        assert_eq!(reward_state.amount, 300);
    }

    #[test]
    fn test_debit_reward_state() {
        let mut reward_state = MiningPoolRewardState::zeroed();
        reward_state.amount = 5;

        debit_reward_state(&mut reward_state, 3).unwrap();
        assert_eq!(reward_state.amount, 2);

        assert_eq!(
            debit_reward_state(&mut reward_state, 3),
            Err(MorError::InsufficientRewardPool.into())
        );
        assert_eq!(reward_state.amount, 2);
    }

    #[test]
    fn test_payout_requires_backing() {
        let claimant = Pubkey::new_unique();
        let mut vault = TestVault::new();
        vault.balances.insert(vault.address, 10);

        let mut pool = MiningPool::zeroed();
        pool.amount = 10;

        payout(&mut pool, &mut vault, &claimant, 4).unwrap();
        assert_eq!(pool.amount, 6);
        assert_eq!(vault.balance_of(&claimant).unwrap(), 4);

        assert_eq!(
            payout(&mut pool, &mut vault, &claimant, 7),
            Err(MorError::InsufficientFunds.into())
        );
        assert_eq!(pool.amount, 6);
    }

    #[test]
    fn test_vault_refuses_overdraw() {
        let maker = Pubkey::new_unique();
        let mut vault = TestVault::new();
        vault.balances.insert(maker, 3);

        assert_eq!(
            vault.transfer_in(&maker, 4),
            Err(MorError::InsufficientFunds.into())
        );
        assert_eq!(
            vault.transfer_out(&maker, 1),
            Err(MorError::InsufficientFunds.into())
        );
        assert_eq!(vault.balance_of(&maker).unwrap(), 3);
        assert_eq!(vault.balance_of(&vault.address()).unwrap(), 0);
    }
}
