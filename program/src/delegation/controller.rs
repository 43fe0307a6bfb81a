use mor_api::prelude::*;
use steel::*;

/// Fails with `WrongOwner` unless `layer` currently holds write authority over the record.
pub fn authorize<R: Delegated>(record: &R, layer: Layer) -> ProgramResult {
    let owned = match (record.delegation().state()?, layer) {
        (DelegationState::BaseLayerOwned, Layer::Base) => true,
        (DelegationState::RollupOwned { validator }, Layer::Rollup(executor)) => validator == executor,
        _ => false,
    };

    check_condition(owned, MorError::WrongOwner)
}

/// Ask `validator` to take over the record. From here on the base layer refuses to mutate it.
pub fn delegate<R: Delegated>(
    record: &mut R,
    payer: &Pubkey,
    validator: Pubkey,
    height: u64,
    layer: Layer,
) -> ProgramResult {
    check_condition(layer == Layer::Base, MorError::WrongOwner)?;
    check_condition(
        record.delegation().state()? == DelegationState::BaseLayerOwned,
        MorError::WrongOwner,
    )?;
    check_condition(record.authority().eq(payer), MorError::Unauthorized)?;
    check_condition(validator != Pubkey::default(), ProgramError::InvalidArgument)?;

    let round = record
        .delegation()
        .round
        .checked_add(1)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    record.delegation_mut().round = round;
    record
        .delegation_mut()
        .set(DelegationState::DelegationRequested {
            validator,
            requested_at: height,
        });

    Ok(())
}

/// The requested validator takes write authority over the record.
pub fn accept_delegation<R: Delegated>(record: &mut R, layer: Layer) -> ProgramResult {
    let Layer::Rollup(executor) = layer else {
        return Err(MorError::WrongOwner.into());
    };

    match record.delegation().state()? {
        DelegationState::DelegationRequested { validator, .. } if validator == executor => {
            record
                .delegation_mut()
                .set(DelegationState::RollupOwned { validator });
            Ok(())
        }
        _ => Err(MorError::WrongOwner.into()),
    }
}

/// Return a request the validator never picked up to the base layer.
pub fn cancel_delegation<R: Delegated>(
    record: &mut R,
    payer: &Pubkey,
    height: u64,
    layer: Layer,
) -> ProgramResult {
    check_condition(layer == Layer::Base, MorError::WrongOwner)?;
    check_condition(record.authority().eq(payer), MorError::Unauthorized)?;

    let DelegationState::DelegationRequested { requested_at, .. } = record.delegation().state()? else {
        return Err(MorError::WrongOwner.into());
    };

    check_condition(
        height >= requested_at.saturating_add(DELEGATION_TIMEOUT),
        MorError::DelegationPending,
    )?;

    record.delegation_mut().set(DelegationState::BaseLayerOwned);

    Ok(())
}

/// Freeze the rollup copy of the record and name the commitment that will carry it back.
pub fn undelegate<R: Delegated>(
    record: &mut R,
    payer: &Pubkey,
    record_address: &Pubkey,
    height: u64,
    layer: Layer,
) -> Result<[u8; 32], ProgramError> {
    authorize(record, layer)?;

    let Layer::Rollup(validator) = layer else {
        return Err(MorError::WrongOwner.into());
    };

    check_condition(record.authority().eq(payer), MorError::Unauthorized)?;

    let commit_id = compute_commit_id(record_address, &validator, height);

    record
        .delegation_mut()
        .set(DelegationState::UndelegationRequested {
            validator,
            commit_id,
            requested_at: height,
        });

    Ok(commit_id)
}

/// What the validator presents to the base layer to finish an undelegation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitProof {
    pub commit_id: [u8; 32],
    pub state_hash: [u8; 32],
}

impl From<&Commit> for CommitProof {
    fn from(header: &Commit) -> Self {
        Self {
            commit_id: header.commit_id,
            state_hash: header.state_hash,
        }
    }
}

/// Replace the base copy of the record with the snapshot flushed from the rollup.
///
/// `snapshot` is the full account data of the rollup copy (discriminator included), which must
/// be frozen in `UndelegationRequested` under the commitment named by `proof`, taken in the
/// current delegation round, and keep the record's identity. On success the record is back on
/// the base layer, remembering `commit_id` as its last commitment.
pub fn finalize_undelegation<R>(
    record: &mut R,
    record_address: &Pubkey,
    snapshot: &[u8],
    proof: &CommitProof,
    submitter: &Pubkey,
    layer: Layer,
) -> Result<[u8; 32], ProgramError>
where
    R: Delegated + Discriminator + Pod,
{
    check_condition(layer == Layer::Base, MorError::WrongOwner)?;

    let (validator, pending) = match record.delegation().state()? {
        DelegationState::RollupOwned { validator } => (validator, None),
        DelegationState::UndelegationRequested { validator, commit_id, .. } => (validator, Some(commit_id)),
        _ => return Err(MorError::WrongOwner.into()),
    };

    check_condition(validator.eq(submitter), MorError::Unauthorized)?;

    // a commitment already applied to this record can't be applied again
    match pending {
        Some(commit_id) => check_condition(commit_id == proof.commit_id, MorError::InvalidCommitment)?,
        None => check_condition(
            record.delegation().commit_id != proof.commit_id,
            MorError::InvalidCommitment,
        )?,
    }

    check_condition(
        compute_state_hash(snapshot) == proof.state_hash,
        MorError::InvalidCommitment,
    )?;

    let flushed = read_snapshot::<R>(snapshot)?;

    match flushed.delegation().state()? {
        DelegationState::UndelegationRequested { validator: v, commit_id, .. }
            if v == validator && commit_id == proof.commit_id => {}
        _ => return Err(MorError::InvalidCommitment.into()),
    }

    check_condition(
        flushed.delegation().round == record.delegation().round,
        MorError::InvalidCommitment,
    )?;
    check_condition(
        flushed.authority() == record.authority()
            && flushed.pool() == record.pool()
            && flushed.bump() == record.bump(),
        MorError::InvalidCommitment,
    )?;

    *record = flushed;
    record.delegation_mut().set(DelegationState::BaseLayerOwned);

    CommitEvent {
        record: *record_address,
        validator,
        commit_id: proof.commit_id,
    }
    .log();

    Ok(proof.commit_id)
}

fn read_snapshot<R: Discriminator + Pod>(data: &[u8]) -> Result<R, ProgramError> {
    let body_len = core::mem::size_of::<R>();

    check_condition(data.len() == 8 + body_len, MorError::InvalidCommitment)?;
    check_condition(data[0] == R::discriminator(), MorError::InvalidCommitment)?;

    Ok(bytemuck::pod_read_unaligned::<R>(&data[8..]))
}
