use anyhow::Result;
use solana_client::nonblocking::rpc_client::RpcClient;

use mor_api::prelude::*;
use mor_client as mor;

use crate::cli::InfoCommands;
use crate::commands::parse_pubkey;
use crate::log;

pub async fn handle_info_commands(command: InfoCommands, client: RpcClient) -> Result<()> {
    match command {
        InfoCommands::Pool { pool } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;

            log::print_section_header("Mining Pool");
            log::print_message(&format!("Address: {}", pool_address));
            log::print_message(&format!("Maker: {}", pool.maker));
            log::print_message(&format!("Mint: {}", pool.mint));
            log::print_message(&format!("Vault: {}", vault_address(pool_address, pool.mint)));
            log::print_count(&format!("Amount: {}", log::format_amount(pool.amount, pool.decimals)));
            log::print_count(&format!("Total Staked: {}", log::format_amount(pool.total_staked, pool.decimals)));
            log::print_count(&format!("Reward Per Epoch: {}", log::format_amount(pool.reward_per_epoch, pool.decimals)));
            log::print_message(&format!("Difficulty: {}", pool.difficulty));
            log::print_divider();
        }

        InfoCommands::Reward { pool } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;
            let (reward, reward_address) =
                mor::find_reward_state_account(&client, &pool, &pool_address).await?;

            log::print_section_header("Reward State");
            log::print_message(&format!("Address: {}", reward_address));
            log::print_message(&format!("Authority: {}", reward.authority));
            log::print_count(&format!("Available: {}", log::format_amount(reward.amount, pool.decimals)));
            log::print_count(&format!("Issued: {}", log::format_amount(reward.total_issued, pool.decimals)));
            print_delegation(&reward.delegation);
            log::print_divider();
        }

        InfoCommands::Miner { miner } => {
            let miner_address = parse_pubkey(&miner, "miner")?;
            let (miner, _) = mor::get_miner_account(&client, &miner_address).await?;

            log::print_section_header("Miner");
            log::print_message(&format!("Address: {}", miner_address));
            log::print_message(&format!("Authority: {}", miner.authority));
            log::print_message(&format!("Pool: {}", miner.pool));
            log::print_message(&format!("Difficulty: {}", miner.difficulty));
            match miner.last_epoch_mined {
                NEVER_MINED => log::print_message("Last Epoch Mined: never"),
                epoch => log::print_message(&format!("Last Epoch Mined: {}", epoch)),
            }
            log::print_count(&format!("Unclaimed Rewards: {}", miner.rewards));
            log::print_count(&format!("Total Rewards: {}", miner.total_rewards));
            log::print_count(&format!("Total Proofs: {}", miner.total_proofs));
            log::print_count(&format!("Staked: {}", miner.staked_amount));
            log::print_message(&format!("Multiplier: {}x", miner.multiplier));
            print_delegation(&miner.delegation);
            log::print_divider();
        }

        InfoCommands::Miners { pool } => {
            let pool_address = parse_pubkey(&pool, "pool")?;
            let miners = mor::list_pool_miners(&client, &pool_address).await?;

            log::print_section_header("Pool Miners");
            for (address, miner) in &miners {
                log::print_message(&format!(
                    "{} authority {} proofs {} rewards {}",
                    address, miner.authority, miner.total_proofs, miner.rewards
                ));
            }
            log::print_count(&format!("Miners: {}", miners.len()));
            log::print_divider();
        }
    }

    Ok(())
}

fn print_delegation(delegation: &Delegation) {
    match delegation.state() {
        Ok(DelegationState::BaseLayerOwned) => {
            log::print_message("Owner: base layer");
            if let Some(commit_id) = delegation.last_commit() {
                log::print_message(&format!("Last Commitment: {}", mor_client::to_hex(&commit_id)));
            }
        }
        Ok(DelegationState::DelegationRequested { validator, requested_at }) => {
            log::print_message(&format!("Owner: base layer, delegation to {} requested at slot {}", validator, requested_at));
        }
        Ok(DelegationState::RollupOwned { validator }) => {
            log::print_message(&format!("Owner: rollup ({})", validator));
        }
        Ok(DelegationState::UndelegationRequested { validator, commit_id, .. }) => {
            log::print_message(&format!(
                "Owner: rollup ({}), undelegating under {}",
                validator,
                mor_client::to_hex(&commit_id)
            ));
        }
        Err(e) => log::print_error(&format!("Invalid delegation tag: {}", e)),
    }
}
