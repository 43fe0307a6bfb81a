use mor_api::prelude::*;
use steel::*;

use crate::delegation::authorize;
use crate::host::SplVault;
use crate::ledger::fund_reward_state;

pub fn process_fund_reward_state(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let args = FundRewardState::try_from_bytes(data)?;
    let [
        signer_info,
        pool_info,
        reward_info,
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
        .as_account_mut::<MiningPool>(&mor_api::ID)?
        .assert_mut_err(
            |p| p.maker == *signer_info.key,
            MorError::Unauthorized.into(),
        )?;

    let reward_state = reward_info
        .is_writable()?
        .is_reward_state(&pool.maker, pool_info.key)?
        .as_account_mut::<MiningPoolRewardState>(&mor_api::ID)?;

    // Issuance balance is frozen while the rollup owns it.
    authorize(reward_state, Layer::Base)?;

    signer_ata_info
        .is_writable()?
        .as_token_account()?
        .assert(|t| t.mint() == pool.mint)?;

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

    fund_reward_state(
        pool,
        reward_state,
        &mut vault,
        signer_ata_info.key,
        read_u64(&args.amount),
    )?;

    Ok(())
}
