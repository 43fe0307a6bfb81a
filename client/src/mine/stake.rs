use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

pub async fn stake(
    client: &RpcClient,
    signer: &Keypair,
    pool: &MiningPool,
    pool_address: Pubkey,
    amount: u64,
) -> Result<Signature> {
    let stake_ix = build_stake_ix(signer.pubkey(), pool_address, pool.mint, amount);

    submit_instructions(client, signer, &[], &[stake_ix], 50_000)
        .await
        .map_err(|e| anyhow!("Failed to stake: {}", e))
}

pub async fn unstake(
    client: &RpcClient,
    signer: &Keypair,
    pool: &MiningPool,
    pool_address: Pubkey,
    amount: u64,
) -> Result<Signature> {
    create_ata(client, signer, &signer.pubkey(), &pool.mint).await?;
    let unstake_ix = build_unstake_ix(signer.pubkey(), pool_address, pool.mint, amount);

    submit_instructions(client, signer, &[], &[unstake_ix], 50_000)
        .await
        .map_err(|e| anyhow!("Failed to unstake: {}", e))
}
