#![allow(dead_code)]

use std::collections::HashMap;

use mor::host::{LedgerClock, TokenVault};
use mor::ledger::create_pool;
use mor::miner::initialize_miner;
use mor_api::prelude::*;
use rand::Rng;
use steel::*;

/// Token balances kept in memory. The vault is just another balance under its own address.
pub struct MemoryVault {
    pub address: Pubkey,
    pub balances: HashMap<Pubkey, u64>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            address: Pubkey::new_unique(),
            balances: HashMap::new(),
        }
    }

    pub fn mint_to(&mut self, account: &Pubkey, amount: u64) {
        *self.balances.entry(*account).or_default() += amount;
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn held(&self) -> u64 {
        self.balance(&self.address)
    }

    fn move_tokens(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> ProgramResult {
        let available = self.balance(&from);
        if available < amount {
            return Err(MorError::InsufficientFunds.into());
        }
        self.balances.insert(from, available - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }
}

impl TokenVault for MemoryVault {
    fn address(&self) -> Pubkey {
        self.address
    }

    fn balance_of(&self, account: &Pubkey) -> Result<u64, ProgramError> {
        Ok(self.balance(account))
    }

    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> ProgramResult {
        self.move_tokens(*from, self.address, amount)
    }

    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> ProgramResult {
        self.move_tokens(self.address, *to, amount)
    }
}

pub struct FixedClock {
    pub height: u64,
    pub timestamp: i64,
}

impl FixedClock {
    /// First slot of `epoch`.
    pub fn at_epoch(epoch: u64) -> Self {
        Self {
            height: epoch * EPOCH_LENGTH,
            timestamp: 1_700_000_000 + epoch as i64 * 60,
        }
    }
}

impl LedgerClock for FixedClock {
    fn height(&self) -> u64 {
        self.height
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

pub struct PoolFixture {
    pub maker: Pubkey,
    pub mint: Pubkey,
    pub pool_address: Pubkey,
    pub pool: MiningPool,
    pub reward_address: Pubkey,
    pub reward_state: MiningPoolRewardState,
    pub vault: MemoryVault,
}

impl PoolFixture {
    /// Vault balance matches the pool accounting.
    pub fn assert_backed(&self) {
        assert_eq!(self.vault.held(), self.pool.amount + self.pool.total_staked);
    }
}

pub fn setup_pool(config: PoolConfig, decimals: u64) -> PoolFixture {
    let maker = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    let mut vault = MemoryVault::new();
    vault.mint_to(&maker, config.amount);

    let (pool, reward_state) = create_pool(maker, mint, decimals, &config, &mut vault, &maker)
        .expect("pool creation failed");

    let (pool_address, _) = mining_pool_pda(maker, mint);
    let (reward_address, _) = reward_state_pda(maker, pool_address);

    PoolFixture {
        maker,
        mint,
        pool_address,
        pool,
        reward_address,
        reward_state,
        vault,
    }
}

pub fn default_pool() -> PoolFixture {
    setup_pool(
        PoolConfig {
            amount: 500,
            reward_amount: 500,
            reward_per_epoch: 1,
            difficulty: 1,
        },
        0,
    )
}

pub fn register_miner(fixture: &PoolFixture, authority: Pubkey) -> (Pubkey, Miner) {
    let (address, bump) = miner_pda(authority, fixture.pool_address);
    let mut miner = Miner::zeroed();

    initialize_miner(
        &mut miner,
        authority,
        fixture.pool_address,
        &fixture.pool,
        fixture.pool.difficulty,
        bump,
    )
    .expect("miner registration failed");

    (address, miner)
}

pub fn find_nonce(authority: &Pubkey, epoch: u64, difficulty: u64) -> u64 {
    let start = rand::thread_rng().gen_range(0..1_000_000);
    (start..u64::MAX)
        .find(|&nonce| verify_solution(authority, epoch, nonce, difficulty).unwrap())
        .expect("nonce space exhausted")
}

pub fn find_bad_nonce(authority: &Pubkey, epoch: u64, difficulty: u64) -> u64 {
    (0..u64::MAX)
        .find(|&nonce| !verify_solution(authority, epoch, nonce, difficulty).unwrap())
        .expect("nonce space exhausted")
}
