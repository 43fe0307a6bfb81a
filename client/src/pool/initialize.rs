use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

/// Open a pool for `mint`, funded from the signer's associated token account.
pub async fn initialize_pool(
    client: &RpcClient,
    signer: &Keypair,
    mint: Pubkey,
    config: PoolConfig,
) -> Result<(Pubkey, Signature)> {
    config
        .validate()
        .map_err(|e| anyhow!("Invalid pool config: {}", e))?;

    let (pool_address, _bump) = mining_pool_pda(signer.pubkey(), mint);

    let ix = build_initialize_pool_ix(
        signer.pubkey(),
        mint,
        config.amount,
        config.reward_amount,
        config.reward_per_epoch,
        config.difficulty,
    );

    let signature = submit_instructions(client, signer, &[], &[ix], 200_000)
        .await
        .map_err(|e| anyhow!("Failed to initialize pool: {}", e))?;

    Ok((pool_address, signature))
}
