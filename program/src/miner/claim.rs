use mor_api::prelude::*;
use steel::*;

use crate::delegation::authorize;
use crate::host::*;
use crate::ledger::payout;
use super::load_miner;

/// Pay out everything the miner has accrued. Only on the base layer, where the vault lives.
pub fn claim<V: TokenVault>(
    miner: &mut Miner,
    miner_address: &Pubkey,
    pool: &mut MiningPool,
    vault: &mut V,
    authority: &Pubkey,
    recipient: &Pubkey,
    policy: ClaimPolicy,
) -> Result<u64, ProgramError> {
    check_condition(authority.eq(&miner.authority), MorError::Unauthorized)?;
    authorize(miner, Layer::Base)?;

    let amount = miner.rewards;

    if amount == 0 {
        return match policy {
            ClaimPolicy::Lenient => Ok(0),
            ClaimPolicy::Strict => Err(MorError::NothingToClaim.into()),
        };
    }

    payout(pool, vault, recipient, amount)?;
    miner.rewards = 0;

    ClaimEvent {
        miner: *miner_address,
        recipient: *recipient,
        amount,
    }
    .log();

    Ok(amount)
}

pub fn process_claim(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    let [
        signer_info,
        pool_info,
        miner_info,
        recipient_info,
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

    recipient_info
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
        counterparty_info: recipient_info,
        authority_info: signer_info,
        token_program_info,
        maker: pool.maker,
        mint: pool.mint,
    };

    claim(
        miner,
        miner_info.key,
        pool,
        &mut vault,
        signer_info.key,
        recipient_info.key,
        CLAIM_POLICY,
    )?;

    Ok(())
}
