use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

pub async fn register_miner(
    client: &RpcClient,
    signer: &Keypair,
    pool: Pubkey,
) -> Result<(Pubkey, Signature)> {
    let (miner_address, _bump) = miner_pda(signer.pubkey(), pool);
    let register_ix = build_initialize_miner_ix(signer.pubkey(), pool);

    let signature = submit_instructions(client, signer, &[], &[register_ix], 50_000)
        .await
        .map_err(|e| anyhow!("Failed to register miner: {}", e))?;

    Ok((miner_address, signature))
}
