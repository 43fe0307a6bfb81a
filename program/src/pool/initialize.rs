use mor_api::prelude::*;
use steel::*;

use crate::host::SplVault;
use crate::ledger::create_pool;

pub fn process_initialize_pool(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let args = InitializePool::try_from_bytes(data)?;
    let [
        signer_info,
        pool_info,
        reward_info,
        mint_info,
        signer_ata_info,
        vault_info,
        system_program_info,
        token_program_info,
        associated_token_program_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;

    let maker = *signer_info.key;
    let mint = *mint_info.key;
    let config = PoolConfig::from(args);

    config.validate()?;

    pool_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[MINING_POOL, maker.as_ref(), mint.as_ref()], &mor_api::ID)?;

    reward_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[MINING_POOL_REWARD, maker.as_ref(), pool_info.key.as_ref()], &mor_api::ID)?;

    let decimals = mint_info.as_mint()?.decimals() as u64;

    signer_ata_info
        .is_writable()?
        .as_token_account()?
        .assert(|t| t.mint() == mint)?
        .assert(|t| t.owner() == maker)?;

    vault_info
        .is_empty()?
        .is_writable()?
        .is_vault(pool_info.key, &mint)?;

    system_program_info
        .is_program(&system_program::ID)?;
    token_program_info
        .is_program(&spl_token::ID)?;
    associated_token_program_info
        .is_program(&spl_associated_token_account::ID)?;

    create_program_account::<MiningPool>(
        pool_info,
        system_program_info,
        signer_info,
        &mor_api::ID,
        &[MINING_POOL, maker.as_ref(), mint.as_ref()],
    )?;

    create_program_account::<MiningPoolRewardState>(
        reward_info,
        system_program_info,
        signer_info,
        &mor_api::ID,
        &[MINING_POOL_REWARD, maker.as_ref(), pool_info.key.as_ref()],
    )?;

    // Vault owned by the pool PDA.
    create_associated_token_account(
        signer_info,
        pool_info,
        vault_info,
        mint_info,
        system_program_info,
        token_program_info,
        associated_token_program_info,
    )?;

    let mut vault = SplVault {
        pool_info,
        vault_info,
        counterparty_info: signer_ata_info,
        authority_info: signer_info,
        token_program_info,
        maker,
        mint,
    };

    let (pool, reward_state) = create_pool(
        maker,
        mint,
        decimals,
        &config,
        &mut vault,
        signer_ata_info.key,
    )?;

    *pool_info.as_account_mut::<MiningPool>(&mor_api::ID)? = pool;
    *reward_info.as_account_mut::<MiningPoolRewardState>(&mor_api::ID)? = reward_state;

    solana_program::msg!(
        "pool {} opened with {} tokens, {} for rewards",
        pool_info.key,
        config.amount,
        config.reward_amount
    );

    Ok(())
}
