use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

/// Claim accrued rewards into `recipient`'s associated token account, creating it if needed.
pub async fn claim_rewards(
    client: &RpcClient,
    signer: &Keypair,
    pool: &MiningPool,
    pool_address: Pubkey,
    recipient: Pubkey,
) -> Result<Signature> {
    let (recipient_ata, _) = create_ata(client, signer, &recipient, &pool.mint).await?;
    let claim_ix = build_claim_ix(signer.pubkey(), pool_address, pool.mint, recipient_ata);

    submit_instructions(client, signer, &[], &[claim_ix], 50_000)
        .await
        .map_err(|e| anyhow!("Failed to claim rewards: {}", e))
}
