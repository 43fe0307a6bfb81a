use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, signer::Signer};

use mor_api::prelude::*;
use mor_client as mor;

use crate::cli::{Cli, Commands};
use crate::commands::parse_pubkey;
use crate::log;

pub async fn handle_miner_commands(cli: Cli, client: RpcClient, payer: Keypair) -> Result<()> {
    log::print_divider();

    match cli.command {
        Commands::Register { pool } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;

            log::print_info("Registering miner...");

            let (miner_address, signature) = mor::register_miner(&client, &payer, pool_address).await?;

            log::print_section_header("Miner Registered");
            log::print_message(&format!("Address: {}", miner_address));
            log::print_message(&format!("Difficulty: {}", pool.difficulty));
            log::print_message(&format!("Signature: {}", signature));

            log::print_divider();
            log::print_info("Start mining with:");
            log::print_title(&format!("mor mine {}", pool_address));
            log::print_divider();
        }

        Commands::Claim { pool, recipient } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let recipient = match recipient {
                Some(recipient) => parse_pubkey(&recipient, "recipient")?,
                None => payer.pubkey(),
            };

            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;
            let (miner_address, _) = miner_pda(payer.pubkey(), pool_address);
            let (miner, _) = mor::get_miner_account(&client, &miner_address)
                .await
                .map_err(|e| anyhow!("Miner {} not found: {}", miner_address, e))?;

            log::print_info("Claiming rewards...");
            log::print_count(&format!("Accrued: {}", log::format_amount(miner.rewards, pool.decimals)));
            log::print_message(&format!("Recipient: {}", recipient));

            let signature = mor::claim_rewards(&client, &payer, &pool, pool_address, recipient).await?;

            log::print_section_header("Rewards Claimed");
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        Commands::Stake { pool, amount } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;

            log::print_info("Staking...");
            let signature = mor::stake(&client, &payer, &pool, pool_address, amount).await?;

            log::print_section_header("Staked");
            log::print_count(&format!("Amount: {}", log::format_amount(amount, pool.decimals)));
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        Commands::Unstake { pool, amount } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;

            log::print_info("Unstaking...");
            let signature = mor::unstake(&client, &payer, &pool, pool_address, amount).await?;

            log::print_section_header("Unstaked");
            log::print_count(&format!("Amount: {}", log::format_amount(amount, pool.decimals)));
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        _ => {}
    }

    Ok(())
}
