use mor_api::prelude::*;
use steel::*;

use crate::delegation::authorize;
use crate::host::*;
use super::load_miner;

pub fn stake<V: TokenVault>(
    miner: &mut Miner,
    pool: &mut MiningPool,
    vault: &mut V,
    authority: &Pubkey,
    source: &Pubkey,
    amount: u64,
    timestamp: i64,
) -> ProgramResult {
    check_condition(authority.eq(&miner.authority), MorError::Unauthorized)?;
    authorize(miner, Layer::Base)?;
    check_condition(amount > 0, ProgramError::InvalidArgument)?;

    check_condition(
        vault.balance_of(source)? >= amount,
        MorError::InsufficientFunds,
    )?;

    let staked_amount = miner.staked_amount
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    let total_staked = pool.total_staked
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    vault.transfer_in(source, amount)?;

    miner.staked_amount  = staked_amount;
    miner.multiplier     = get_multiplier(staked_amount, pool.decimals);
    miner.last_staked_at = timestamp;
    pool.total_staked    = total_staked;

    Ok(())
}

pub fn unstake<V: TokenVault>(
    miner: &mut Miner,
    pool: &mut MiningPool,
    vault: &mut V,
    authority: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) -> ProgramResult {
    check_condition(authority.eq(&miner.authority), MorError::Unauthorized)?;
    authorize(miner, Layer::Base)?;
    check_condition(amount > 0, ProgramError::InvalidArgument)?;

    let staked_amount = miner.staked_amount
        .checked_sub(amount)
        .ok_or(MorError::InsufficientStake)?;

    // Stake is always backed by the vault.
    let total_staked = pool.total_staked
        .checked_sub(amount)
        .ok_or(MorError::InsufficientFunds)?;

    vault.transfer_out(destination, amount)?;

    miner.staked_amount = staked_amount;
    miner.multiplier    = get_multiplier(staked_amount, pool.decimals);
    pool.total_staked   = total_staked;

    Ok(())
}

pub fn process_stake(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let clock = SysvarClock::get()?;
    let args = Stake::try_from_bytes(data)?;

    with_stake_accounts(accounts, |miner, pool, vault, signer, token_account| {
        stake(
            miner,
            pool,
            vault,
            signer,
            token_account,
            read_u64(&args.amount),
            clock.timestamp(),
        )
    })
}

pub fn process_unstake(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let args = Unstake::try_from_bytes(data)?;

    with_stake_accounts(accounts, |miner, pool, vault, signer, token_account| {
        unstake(
            miner,
            pool,
            vault,
            signer,
            token_account,
            read_u64(&args.amount),
        )
    })
}

fn with_stake_accounts<F>(accounts: &[AccountInfo<'_>], f: F) -> ProgramResult
where
    F: FnOnce(&mut Miner, &mut MiningPool, &mut SplVault, &Pubkey, &Pubkey) -> ProgramResult,
{
    let [
        signer_info,
        pool_info,
        miner_info,
        signer_ata_info,
        vault_info,
        token_program_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;

    let pool = pool_info
        .is_writable()?
        .is_mining_pool()?
        .as_account_mut::<MiningPool>(&mor_api::ID)?;

    let miner = load_miner(miner_info, pool_info.key)?;

    signer_ata_info
        .is_writable()?
        .as_token_account()?
        .assert(|t| t.mint() == pool.mint)?
        .assert(|t| t.owner() == *signer_info.key)?;

    vault_info
        .is_writable()?
        .is_vault(pool_info.key, &pool.mint)?;

    token_program_info
        .is_program(&spl_token::ID)?;

    let mut vault = SplVault {
        pool_info,
        vault_info,
        counterparty_info: signer_ata_info,
        authority_info: signer_info,
        token_program_info,
        maker: pool.maker,
        mint: pool.mint,
    };

    f(miner, pool, &mut vault, signer_info.key, signer_ata_info.key)
}
