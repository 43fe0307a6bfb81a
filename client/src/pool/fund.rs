use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use crate::utils::*;

pub async fn fund_reward_state(
    client: &RpcClient,
    signer: &Keypair,
    mint: Pubkey,
    amount: u64,
) -> Result<Signature> {
    let ix = build_fund_reward_state_ix(signer.pubkey(), mint, amount);

    submit_instructions(client, signer, &[], &[ix], 50_000)
        .await
        .map_err(|e| anyhow!("Failed to fund reward state: {}", e))
}
