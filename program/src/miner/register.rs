use mor_api::prelude::*;
use steel::*;

/// Set up a fresh miner record for `authority` in a pool.
pub fn initialize_miner(
    miner: &mut Miner,
    authority: Pubkey,
    pool_address: Pubkey,
    pool: &MiningPool,
    default_difficulty: u64,
    bump: u8,
) -> ProgramResult {
    check_condition(!miner.is_initialized(), MorError::AlreadyExists)?;
    check_condition(
        (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&default_difficulty),
        MorError::InvalidDifficulty,
    )?;

    *miner = Miner {
        authority,
        pool: pool_address,
        difficulty: default_difficulty,
        last_epoch_mined: NEVER_MINED,
        rewards: 0,
        multiplier: get_multiplier(0, pool.decimals),
        staked_amount: 0,
        last_staked_at: 0,
        total_rewards: 0,
        total_proofs: 0,
        bump: bump as u64,
        delegation: Delegation::zeroed(),
    };

    Ok(())
}

pub fn process_register(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    let [
        signer_info,
        pool_info,
        miner_info,
        system_program_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;

    let pool = pool_info
        .is_mining_pool()?
        .as_account::<MiningPool>(&mor_api::ID)?;

    check_condition(miner_info.data_is_empty(), MorError::AlreadyExists)?;

    let (miner_address, miner_bump) = miner_pda(*signer_info.key, *pool_info.key);

    miner_info
        .is_writable()?
        .has_address(&miner_address)?;

    system_program_info
        .is_program(&system_program::ID)?;

    create_program_account::<Miner>(
        miner_info,
        system_program_info,
        signer_info,
        &mor_api::ID,
        &[MINER, signer_info.key.as_ref(), pool_info.key.as_ref()],
    )?;

    let miner = miner_info.as_account_mut::<Miner>(&mor_api::ID)?;

    initialize_miner(
        miner,
        *signer_info.key,
        *pool_info.key,
        pool,
        pool.difficulty,
        miner_bump,
    )?;

    Ok(())
}
