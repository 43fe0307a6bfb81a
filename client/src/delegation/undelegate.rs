use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

/// Freeze `record` on the rollup and return the id of the commitment that will carry it back.
/// `rollup` must point at the validator's rollup endpoint.
pub async fn request_undelegation(
    rollup: &RpcClient,
    signer: &Keypair,
    validator: &Keypair,
    record: Pubkey,
) -> Result<(Signature, [u8; 32])> {
    let ix = build_undelegate_ix(signer.pubkey(), validator.pubkey(), record);

    let signature = submit_instructions(rollup, signer, &[validator], &[ix], 30_000)
        .await
        .map_err(|e| anyhow!("Failed to request undelegation of {}: {}", record, e))?;

    let data = get_account_data(rollup, &record).await?;
    let commit_id = match record_delegation(&data)?.state() {
        Ok(DelegationState::UndelegationRequested { commit_id, .. }) => commit_id,
        state => return Err(anyhow!("Record {} not frozen after undelegation: {:?}", record, state)),
    };

    Ok((signature, commit_id))
}
