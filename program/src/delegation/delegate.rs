use mor_api::prelude::*;
use steel::*;

use super::{accept_delegation, cancel_delegation, delegate, with_record};
use crate::host::*;

pub fn process_delegate(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    let height = SysvarClock::get()?.height();
    let args = Delegate::try_from_bytes(data)?;
    let [
        signer_info,
        record_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    record_info.is_writable()?;

    let validator = Pubkey::new_from_array(args.validator);

    with_record!(record_info, |record| {
        delegate(record, signer_info.key, validator, height, Layer::Base)
    })?;

    solana_program::msg!("delegation of {} requested to {}", record_info.key, validator);

    Ok(())
}

pub fn process_accept_delegation(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    let [
        validator_info,
        record_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validator_info.is_signer()?;
    record_info.is_writable()?;

    with_record!(record_info, |record| {
        let layer = resolve_layer(record, Some(validator_info.key))?;
        accept_delegation(record, layer)
    })?;

    Ok(())
}

pub fn process_cancel_delegation(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    let height = SysvarClock::get()?.height();
    let [
        signer_info,
        record_info,
    ] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    record_info.is_writable()?;

    with_record!(record_info, |record| {
        cancel_delegation(record, signer_info.key, height, Layer::Base)
    })?;

    solana_program::msg!("delegation of {} cancelled", record_info.key);

    Ok(())
}
