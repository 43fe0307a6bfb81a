use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ::log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use tokio::{task, time::{sleep, Duration}};

use mor_api::prelude::*;
use mor_client as mor;

use crate::cli::{Cli, Commands};
use crate::commands::parse_pubkey;
use crate::keypair::load_keypair;
use crate::log;

// Approximate slot time, used to sleep until the next epoch.
const SLOT_MS: u64 = 400;

/// Where the miner record can currently be written.
enum Owner {
    Base,
    Rollup(Pubkey),
}

pub async fn handle_mine_command(
    cli: Cli,
    client: RpcClient,
    rollup: RpcClient,
    payer: Keypair,
) -> Result<()> {
    let Commands::Mine { pool, threads, validator_keypair } = cli.command else {
        return Ok(());
    };

    let pool_address = parse_pubkey(&pool, "pool")?;
    let validator = validator_keypair
        .as_ref()
        .map(|path: &PathBuf| load_keypair(path))
        .transpose()?;
    let threads = threads.unwrap_or_else(|| {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    });

    let (pool, _) = mor::get_pool_account(&client, &pool_address).await?;
    let (miner_address, _) = miner_pda(payer.pubkey(), pool_address);

    if mor::get_miner_account(&client, &miner_address).await.is_err() {
        log::print_message("Miner not registered, registering now...");
        mor::register_miner(&client, &payer, pool_address).await?;
    }

    log::print_divider();
    log::print_info("Starting miner...");
    log::print_message(&format!("Pool: {}", pool_address));
    log::print_message(&format!("Miner: {}", miner_address));
    log::print_message(&format!("Threads: {}", threads));
    log::print_divider();

    let cancel = Arc::new(AtomicBool::new(false));
    task::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
        }
    });

    while !cancel.load(Ordering::Relaxed) {
        let (miner, owner) = match locate_miner(&client, &rollup, &miner_address).await {
            Ok(found) => found,
            Err(e) => {
                log::print_error(&format!("{}", e));
                sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        let (layer_client, cosigner) = match owner {
            Owner::Base => (&client, None),
            Owner::Rollup(v) => match &validator {
                Some(kp) if kp.pubkey() == v => (&rollup, Some(kp)),
                _ => {
                    return Err(anyhow!(
                        "Miner is delegated to {}, pass its keypair with --validator-keypair",
                        v
                    ))
                }
            },
        };

        let slot = mor::get_slot(layer_client).await?;
        let epoch = mor::epoch_at(slot);

        if epoch == 0 || epoch <= miner.last_epoch_mined {
            let wait = (EPOCH_LENGTH - slot % EPOCH_LENGTH) * SLOT_MS;
            debug!("epoch {} already mined, sleeping {}ms", epoch, wait);
            sleep(Duration::from_millis(wait)).await;
            continue;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {wide_msg}")
                .map_err(|e| anyhow!("Failed to set progress style: {}", e))?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Solving epoch {} at difficulty {}...", epoch, miner.difficulty));

        let authority = payer.pubkey();
        let difficulty = miner.difficulty;
        let start = rand::random::<u64>();
        let solution = task::spawn_blocking({
            let cancel = cancel.clone();
            move || mor::solve(&authority, epoch, difficulty, threads, start, cancel)
        })
        .await?;

        let Some(solution) = solution else {
            pb.finish_and_clear();
            break;
        };

        pb.set_message(format!("Submitting nonce {}...", solution.nonce));

        match mor::submit_solution(
            layer_client,
            &payer,
            &pool,
            pool_address,
            solution.nonce,
            epoch,
            cosigner,
        )
        .await
        {
            Ok(signature) => {
                pb.finish_and_clear();
                log::print_message(&format!("Epoch {} mined: {}", epoch, signature));
                if let Ok((miner, _)) = mor::get_miner_account(layer_client, &miner_address).await {
                    log::print_count(&format!(
                        "Rewards: {} (multiplier {}x)",
                        log::format_amount(miner.rewards, pool.decimals),
                        miner.multiplier
                    ));
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                log::print_error(&format!("Epoch {} rejected: {}", epoch, e));
            }
        }
    }

    log::print_divider();
    log::print_info("Miner stopped");
    Ok(())
}

/// Read the miner from the rollup first, where it lives while delegated, then the base layer.
async fn locate_miner(
    base: &RpcClient,
    rollup: &RpcClient,
    miner_address: &Pubkey,
) -> Result<(Miner, Owner)> {
    if let Ok((miner, _)) = mor::get_miner_account(rollup, miner_address).await {
        if let Ok(DelegationState::RollupOwned { validator }) = miner.delegation.state() {
            return Ok((miner, Owner::Rollup(validator)));
        }
    }

    let (miner, _) = mor::get_miner_account(base, miner_address).await?;
    match miner.delegation.state() {
        Ok(DelegationState::BaseLayerOwned) => Ok((miner, Owner::Base)),
        Ok(state) => Err(anyhow!("Miner is in transit ({:?}), waiting", state.status())),
        Err(e) => Err(anyhow!("Corrupt delegation tag: {}", e)),
    }
}
