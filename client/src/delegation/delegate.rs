use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

/// Ask `validator` to take over `record` (a miner or reward state owned by the signer).
pub async fn request_delegation(
    client: &RpcClient,
    signer: &Keypair,
    record: Pubkey,
    validator: Pubkey,
) -> Result<Signature> {
    let ix = build_delegate_ix(signer.pubkey(), record, validator);

    submit_instructions(client, signer, &[], &[ix], 30_000)
        .await
        .map_err(|e| anyhow!("Failed to request delegation of {}: {}", record, e))
}

/// Validator side: take ownership of a record whose delegation was requested to it.
pub async fn accept_delegation(
    client: &RpcClient,
    validator: &Keypair,
    record: Pubkey,
) -> Result<Signature> {
    let ix = build_accept_delegation_ix(validator.pubkey(), record);

    submit_instructions(client, validator, &[], &[ix], 30_000)
        .await
        .map_err(|e| anyhow!("Failed to accept delegation of {}: {}", record, e))
}

/// Withdraw a delegation request the validator never picked up.
pub async fn cancel_delegation(
    client: &RpcClient,
    signer: &Keypair,
    record: Pubkey,
) -> Result<Signature> {
    let ix = build_cancel_delegation_ix(signer.pubkey(), record);

    submit_instructions(client, signer, &[], &[ix], 30_000)
        .await
        .map_err(|e| anyhow!("Failed to cancel delegation of {}: {}", record, e))
}
