use mor_api::prelude::*;
use steel::*;

use super::{finalize_undelegation, undelegate, with_record, CommitProof};
use crate::host::*;

/// Executed on the rollup, co-signed by the validator holding the record.
pub fn process_undelegate(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    let height = SysvarClock::get()?.height();
    let [
        signer_info,
        validator_info,
        record_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    record_info.is_writable()?;

    let cosigner = cosigner(Some(validator_info))?;

    let commit_id = with_record!(record_info, |record| {
        let layer = resolve_layer(record, cosigner)?;
        undelegate(record, signer_info.key, record_info.key, height, layer)
    })?;

    solana_program::msg!(
        "undelegation of {} pending commitment {}",
        record_info.key,
        Pubkey::new_from_array(commit_id)
    );

    Ok(())
}

/// Base layer side of an undelegation, submitted by the validator with the flushed snapshot.
pub fn process_commit(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let commit = ParsedCommit::try_from_bytes(data)?;
    let [
        validator_info,
        record_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validator_info.is_signer()?;
    record_info.is_writable()?;

    let proof = CommitProof::from(&commit.header);

    with_record!(record_info, |record| {
        finalize_undelegation(
            record,
            record_info.key,
            &commit.snapshot,
            &proof,
            validator_info.key,
            Layer::Base,
        )
    })?;

    Ok(())
}
