use steel::*;

use crate::{
    instruction::*,
    pda::*,
};

pub fn build_initialize_pool_ix(
    maker: Pubkey,
    mint: Pubkey,
    amount: u64,
    reward_amount: u64,
    reward_per_epoch: u64,
    difficulty: u64,
) -> Instruction {
    let (pool_address, _pool_bump) = mining_pool_pda(maker, mint);
    let (reward_address, _reward_bump) = reward_state_pda(maker, pool_address);
    let maker_ata = spl_associated_token_account::get_associated_token_address(&maker, &mint);
    let vault = vault_address(pool_address, mint);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(maker, true),
            AccountMeta::new(pool_address, false),
            AccountMeta::new(reward_address, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new(maker_ata, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(solana_program::system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: InitializePool {
            amount: amount.to_le_bytes(),
            reward_amount: reward_amount.to_le_bytes(),
            reward_per_epoch: reward_per_epoch.to_le_bytes(),
            difficulty: difficulty.to_le_bytes(),
        }.to_bytes(),
    }
}

pub fn build_fund_reward_state_ix(
    maker: Pubkey,
    mint: Pubkey,
    amount: u64,
) -> Instruction {
    let (pool_address, _pool_bump) = mining_pool_pda(maker, mint);
    let (reward_address, _reward_bump) = reward_state_pda(maker, pool_address);
    let maker_ata = spl_associated_token_account::get_associated_token_address(&maker, &mint);
    let vault = vault_address(pool_address, mint);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(maker, true),
            AccountMeta::new(pool_address, false),
            AccountMeta::new(reward_address, false),
            AccountMeta::new(maker_ata, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: FundRewardState {
            amount: amount.to_le_bytes(),
        }.to_bytes(),
    }
}

pub fn build_initialize_miner_ix(
    authority: Pubkey,
    pool: Pubkey,
) -> Instruction {
    let (miner_address, _miner_bump) = miner_pda(authority, pool);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(pool, false),
            AccountMeta::new(miner_address, false),
            AccountMeta::new_readonly(solana_program::system_program::ID, false),
        ],
        data: InitializeMiner {}.to_bytes(),
    }
}

/// Submit a nonce for `epoch`. Pass the rollup validator when the miner and reward state are
/// delegated; it has to co-sign the transaction.
pub fn build_submit_solution_ix(
    authority: Pubkey,
    pool: Pubkey,
    maker: Pubkey,
    nonce: u64,
    epoch: u64,
    validator: Option<Pubkey>,
) -> Instruction {
    let (miner_address, _miner_bump) = miner_pda(authority, pool);
    let (reward_address, _reward_bump) = reward_state_pda(maker, pool);

    let mut accounts = vec![
        AccountMeta::new(authority, true),
        AccountMeta::new_readonly(pool, false),
        AccountMeta::new(reward_address, false),
        AccountMeta::new(miner_address, false),
    ];

    if let Some(validator) = validator {
        accounts.push(AccountMeta::new_readonly(validator, true));
    }

    Instruction {
        program_id: crate::ID,
        accounts,
        data: SubmitSolution {
            nonce: nonce.to_le_bytes(),
            epoch: epoch.to_le_bytes(),
        }.to_bytes(),
    }
}

pub fn build_claim_ix(
    authority: Pubkey,
    pool: Pubkey,
    mint: Pubkey,
    recipient: Pubkey,
) -> Instruction {
    let (miner_address, _miner_bump) = miner_pda(authority, pool);
    let vault = vault_address(pool, mint);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(pool, false),
            AccountMeta::new(miner_address, false),
            AccountMeta::new(recipient, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: Claim {}.to_bytes(),
    }
}

pub fn build_stake_ix(
    authority: Pubkey,
    pool: Pubkey,
    mint: Pubkey,
    amount: u64,
) -> Instruction {
    let data = Stake {
        amount: amount.to_le_bytes(),
    }.to_bytes();

    build_stake_accounts_ix(authority, pool, mint, data)
}

pub fn build_unstake_ix(
    authority: Pubkey,
    pool: Pubkey,
    mint: Pubkey,
    amount: u64,
) -> Instruction {
    let data = Unstake {
        amount: amount.to_le_bytes(),
    }.to_bytes();

    build_stake_accounts_ix(authority, pool, mint, data)
}

fn build_stake_accounts_ix(
    authority: Pubkey,
    pool: Pubkey,
    mint: Pubkey,
    data: Vec<u8>,
) -> Instruction {
    let (miner_address, _miner_bump) = miner_pda(authority, pool);
    let authority_ata = spl_associated_token_account::get_associated_token_address(&authority, &mint);
    let vault = vault_address(pool, mint);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(pool, false),
            AccountMeta::new(miner_address, false),
            AccountMeta::new(authority_ata, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data,
    }
}

/// Request delegation of a miner or reward-state record to `validator`.
pub fn build_delegate_ix(
    payer: Pubkey,
    record: Pubkey,
    validator: Pubkey,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(payer, true),
            AccountMeta::new(record, false),
        ],
        data: Delegate {
            validator: validator.to_bytes(),
        }.to_bytes(),
    }
}

pub fn build_accept_delegation_ix(
    validator: Pubkey,
    record: Pubkey,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new_readonly(validator, true),
            AccountMeta::new(record, false),
        ],
        data: AcceptDelegation {}.to_bytes(),
    }
}

pub fn build_cancel_delegation_ix(
    payer: Pubkey,
    record: Pubkey,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(payer, true),
            AccountMeta::new(record, false),
        ],
        data: CancelDelegation {}.to_bytes(),
    }
}

pub fn build_undelegate_ix(
    payer: Pubkey,
    validator: Pubkey,
    record: Pubkey,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(payer, true),
            AccountMeta::new_readonly(validator, true),
            AccountMeta::new(record, false),
        ],
        data: Undelegate {}.to_bytes(),
    }
}

/// Finalize an undelegation on the base layer with the snapshot flushed from the rollup.
pub fn build_commit_ix(
    validator: Pubkey,
    record: Pubkey,
    commit_id: [u8; 32],
    snapshot: &[u8],
) -> Instruction {
    let state_hash = crate::challenge::compute_state_hash(snapshot);

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new_readonly(validator, true),
            AccountMeta::new(record, false),
        ],
        data: Commit {
            commit_id,
            state_hash,
        }.pack(snapshot),
    }
}
