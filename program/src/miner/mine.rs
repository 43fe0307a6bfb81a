use mor_api::prelude::*;
use steel::*;

use crate::delegation::authorize;
use crate::host::*;
use crate::ledger::debit_reward_state;
use super::load_miner;

/// A nonce claimed to solve the challenge of `epoch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    pub nonce: u64,
    pub epoch: u64,
}

/// Validate a solution and credit the miner. Either every field is updated or none is.
#[allow(clippy::too_many_arguments)]
pub fn submit_solution<C: LedgerClock>(
    miner: &mut Miner,
    miner_address: &Pubkey,
    reward_state: &mut MiningPoolRewardState,
    pool: &MiningPool,
    pool_address: &Pubkey,
    signer: &Pubkey,
    submission: Submission,
    clock: &C,
    layer: Layer,
) -> Result<u64, ProgramError> {
    check_condition(signer.eq(&miner.authority), MorError::Unauthorized)?;
    check_condition(miner.pool.eq(pool_address), ProgramError::InvalidAccountData)?;
    check_condition(reward_state.pool.eq(pool_address), ProgramError::InvalidAccountData)?;

    authorize(miner, layer)?;
    authorize(reward_state, layer)?;

    let current_epoch = clock.height() / EPOCH_LENGTH;

    check_condition(
        submission.epoch == current_epoch,
        MorError::EpochMismatch,
    )?;

    check_condition(
        submission.epoch > miner.last_epoch_mined,
        MorError::AlreadyMined,
    )?;

    check_condition(
        verify_solution(&miner.authority, submission.epoch, submission.nonce, miner.difficulty)?,
        MorError::InvalidSolution,
    )?;

    let reward = pool.reward_per_epoch
        .checked_mul(miner.multiplier)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    let rewards = miner.rewards
        .checked_add(reward)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    let total_rewards = miner.total_rewards
        .checked_add(reward)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    let total_issued = reward_state.total_issued
        .checked_add(reward)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    debit_reward_state(reward_state, reward)?;
    reward_state.total_issued = total_issued;

    miner.rewards          = rewards;
    miner.total_rewards    = total_rewards;
    miner.total_proofs     = miner.total_proofs.saturating_add(1);
    miner.last_epoch_mined = submission.epoch;

    MineEvent {
        miner: *miner_address,
        epoch: submission.epoch,
        reward,
        multiplier: miner.multiplier,
        remaining: reward_state.amount,
    }
    .log();

    Ok(reward)
}

pub fn process_submit_solution(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let clock = SysvarClock::get()?;
    let args = SubmitSolution::try_from_bytes(data)?;
    let [
        signer_info,
        pool_info,
        reward_info,
        miner_info,
        optional @ ..,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;

    let pool = pool_info
        .is_mining_pool()?
        .as_account::<MiningPool>(&mor_api::ID)?;

    let reward_state = reward_info
        .is_writable()?
        .is_reward_state(&pool.maker, pool_info.key)?
        .as_account_mut::<MiningPoolRewardState>(&mor_api::ID)?;

    let miner = load_miner(miner_info, pool_info.key)?;

    let cosigner = cosigner(optional.first())?;
    let layer = resolve_layer(miner, cosigner)?;

    let submission = Submission {
        nonce: read_u64(&args.nonce),
        epoch: read_u64(&args.epoch),
    };

    submit_solution(
        miner,
        miner_info.key,
        reward_state,
        pool,
        pool_info.key,
        signer_info.key,
        submission,
        &clock,
        layer,
    )?;

    Ok(())
}
