use anyhow::Result;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, signer::Signer};

use mor_api::prelude::*;
use mor_client as mor;

use crate::cli::{Cli, Commands};
use crate::commands::{confirm, parse_pubkey};
use crate::log;

pub async fn handle_pool_commands(cli: Cli, client: RpcClient, payer: Keypair) -> Result<()> {
    log::print_divider();

    match cli.command {
        Commands::InitializePool { mint, amount, reward_amount, reward_per_epoch, difficulty } => {
            let mint = parse_pubkey(&mint, "mint")?;
            let config = PoolConfig {
                amount,
                reward_amount,
                reward_per_epoch,
                difficulty,
            };

            log::print_info("Opening mining pool...");
            log::print_message(&format!("Mint: {}", mint));
            log::print_message(&format!("Amount: {}", amount));
            log::print_message(&format!("Reward Amount: {}", reward_amount));
            log::print_message(&format!("Reward Per Epoch: {}", reward_per_epoch));
            log::print_message(&format!("Difficulty: {}", difficulty));

            if !confirm("Move these tokens into the pool vault?")? {
                log::print_error("Pool initialization cancelled");
                return Ok(());
            }

            let (pool_address, signature) = mor::initialize_pool(&client, &payer, mint, config).await?;
            let (reward_address, _) = reward_state_pda(payer.pubkey(), pool_address);

            log::print_section_header("Pool Initialized");
            log::print_message(&format!("Pool: {}", pool_address));
            log::print_message(&format!("Reward State: {}", reward_address));
            log::print_message(&format!("Vault: {}", vault_address(pool_address, mint)));
            log::print_message(&format!("Signature: {}", signature));

            log::print_divider();
            log::print_info("More info:");
            log::print_title(&format!("mor info pool {}", pool_address));
            log::print_divider();
        }

        Commands::Fund { mint, amount } => {
            let mint = parse_pubkey(&mint, "mint")?;
            let (pool_address, _) = mining_pool_pda(payer.pubkey(), mint);

            log::print_info("Funding reward state...");
            log::print_message(&format!("Pool: {}", pool_address));
            log::print_message(&format!("Amount: {}", amount));

            if !confirm("Tokens in the reward state can only leave as miner rewards. Proceed?")? {
                log::print_error("Funding cancelled");
                return Ok(());
            }

            let signature = mor::fund_reward_state(&client, &payer, mint, amount).await?;

            log::print_section_header("Reward State Funded");
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        _ => {}
    }

    Ok(())
}
