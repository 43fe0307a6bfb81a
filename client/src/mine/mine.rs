use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

/// Submit a solution for `epoch`. `validator` co-signs when the miner and reward state live on
/// the rollup, and `client` must then point at that rollup.
pub async fn submit_solution(
    client: &RpcClient,
    signer: &Keypair,
    pool: &MiningPool,
    pool_address: Pubkey,
    nonce: u64,
    epoch: u64,
    validator: Option<&Keypair>,
) -> Result<Signature> {
    let mine_ix = build_submit_solution_ix(
        signer.pubkey(),
        pool_address,
        pool.maker,
        nonce,
        epoch,
        validator.map(|v| v.pubkey()),
    );

    let cosigners: Vec<&Keypair> = validator.into_iter().collect();

    submit_instructions(client, signer, &cosigners, &[mine_ix], 100_000)
        .await
        .map_err(|e| anyhow!("Failed to submit solution: {}", e))
}

/// The epoch the ledger is in at `slot`.
pub fn epoch_at(slot: u64) -> u64 {
    slot / EPOCH_LENGTH
}
