use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, signer::Signer};
use tokio::time::Duration;

use mor_api::prelude::*;
use mor_client as mor;

use crate::cli::{Cli, Commands};
use crate::commands::parse_pubkey;
use crate::keypair::load_keypair;
use crate::log;

pub async fn handle_delegation_commands(
    cli: Cli,
    client: RpcClient,
    rollup: RpcClient,
    payer: Keypair,
) -> Result<()> {
    log::print_divider();

    match cli.command {
        Commands::Delegate { pool, validator, reward_state } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let validator = parse_pubkey(&validator, "validator")?;

            let record = if reward_state {
                let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;
                if pool.maker != payer.pubkey() {
                    return Err(anyhow!("Only the pool maker {} can delegate its reward state", pool.maker));
                }
                reward_state_pda(pool.maker, pool_address).0
            } else {
                miner_pda(payer.pubkey(), pool_address).0
            };

            log::print_info("Requesting delegation...");
            let signature = mor::request_delegation(&client, &payer, record, validator).await?;

            log::print_section_header("Delegation Requested");
            log::print_message(&format!("Record: {}", record));
            log::print_message(&format!("Validator: {}", validator));
            log::print_message(&format!("Signature: {}", signature));
            log::print_message(&format!(
                "The validator must accept within {} slots, or the request can be cancelled",
                DELEGATION_TIMEOUT
            ));
            log::print_divider();
        }

        Commands::Accept { record } => {
            let record = parse_pubkey(&record, "record")?;

            log::print_info("Accepting delegation...");
            let signature = mor::accept_delegation(&client, &payer, record).await?;

            log::print_section_header("Delegation Accepted");
            log::print_message(&format!("Record: {}", record));
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        Commands::CancelDelegation { record } => {
            let record = parse_pubkey(&record, "record")?;

            log::print_info("Cancelling delegation request...");
            let signature = mor::cancel_delegation(&client, &payer, record).await?;

            log::print_section_header("Delegation Cancelled");
            log::print_message(&format!("Signature: {}", signature));
            log::print_divider();
        }

        Commands::Undelegate { record, validator_keypair } => {
            let record = parse_pubkey(&record, "record")?;
            let validator = load_keypair(&validator_keypair)?;

            log::print_info("Requesting undelegation on the rollup...");
            let (signature, commit_id) =
                mor::request_undelegation(&rollup, &payer, &validator, record).await?;

            log::print_section_header("Undelegation Requested");
            log::print_message(&format!("Record: {}", record));
            log::print_message(&format!("Commitment: {}", mor::to_hex(&commit_id)));
            log::print_message(&format!("Signature: {}", signature));

            log::print_divider();
            log::print_info("The validator finishes it with:");
            log::print_title(&format!("mor commit {}", record));
            log::print_divider();
        }

        Commands::Commit { record, timeout } => {
            let record = parse_pubkey(&record, "record")?;

            log::print_info("Committing rollup state to the base layer...");
            let (signature, commit_id) =
                mor::commit_undelegation(&client, &rollup, &payer, record).await?;

            log::print_message(&format!("Signature: {}", signature));
            log::print_message("Waiting for the base layer...");

            match mor::wait_for_commitment(&client, record, commit_id, Duration::from_secs(timeout)).await {
                Ok(()) => {
                    log::print_section_header("Record Back On Base Layer");
                    log::print_message(&format!("Record: {}", record));
                    log::print_message(&format!("Commitment: {}", mor::to_hex(&commit_id)));
                }
                Err(e) => {
                    log::print_error(&format!("{}", e));
                }
            }
            log::print_divider();
        }

        _ => {}
    }

    Ok(())
}
