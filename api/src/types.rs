use steel::*;
use crate::consts::*;
use crate::error::MorError;
use crate::instruction::InitializePool;
use crate::utils::*;

/// What a claim does when the miner has nothing accrued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimPolicy {
    /// Succeed with a zero payout.
    Lenient,
    /// Fail with `NothingToClaim`.
    Strict,
}

/// Parameters a maker picks when opening a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Tokens moved from the maker into the vault.
    pub amount: u64,
    /// Part of `amount` set aside for issuance right away, 0 to fund it later.
    pub reward_amount: u64,
    pub reward_per_epoch: u64,
    /// Difficulty assigned to miners registering with the pool.
    pub difficulty: u64,
}

impl PoolConfig {
    pub fn validate(&self) -> ProgramResult {
        check_condition(
            (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty),
            MorError::InvalidDifficulty,
        )?;
        check_condition(self.reward_per_epoch > 0, MorError::InvalidConfig)?;
        check_condition(self.reward_amount <= self.amount, MorError::InvalidConfig)?;
        Ok(())
    }
}

impl From<&InitializePool> for PoolConfig {
    fn from(args: &InitializePool) -> Self {
        Self {
            amount: read_u64(&args.amount),
            reward_amount: read_u64(&args.reward_amount),
            reward_per_epoch: read_u64(&args.reward_per_epoch),
            difficulty: read_u64(&args.difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PoolConfig {
        PoolConfig {
            amount: 500,
            reward_amount: 400,
            reward_per_epoch: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert!(PoolConfig { reward_amount: 0, ..config() }.validate().is_ok());
        assert!(PoolConfig { difficulty: MAX_DIFFICULTY, ..config() }.validate().is_ok());
    }

    #[test]
    fn test_rejected_configs() {
        assert_eq!(
            PoolConfig { difficulty: 0, ..config() }.validate(),
            Err(MorError::InvalidDifficulty.into())
        );
        assert_eq!(
            PoolConfig { difficulty: MAX_DIFFICULTY + 1, ..config() }.validate(),
            Err(MorError::InvalidDifficulty.into())
        );
        assert_eq!(
            PoolConfig { reward_per_epoch: 0, ..config() }.validate(),
            Err(MorError::InvalidConfig.into())
        );
        assert_eq!(
            PoolConfig { reward_amount: 501, ..config() }.validate(),
            Err(MorError::InvalidConfig.into())
        );
    }
}
