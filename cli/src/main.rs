mod cli;
mod keypair;
mod log;
mod commands;

use anyhow::Result;
use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signer::Signer;

use cli::{Cli, Commands};
use keypair::{load_keypair, get_keypair_path};
use commands::{delegation, info, mine, miner, pool};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_logger(cli.verbose);
    log::print_title("⛏ MOR");

    let rpc_url = cli.cluster.rpc_url();
    let rpc_client = RpcClient::new_with_commitment(rpc_url.clone(), CommitmentConfig::confirmed());
    let rollup_client = RpcClient::new_with_commitment(cli.rollup.clone(), CommitmentConfig::confirmed());

    if let Commands::Info { command } = cli.command {
        log::print_message(&format!("Connected to: {}", rpc_url));
        return info::handle_info_commands(command, rpc_client).await;
    }

    let keypair_path = get_keypair_path(cli.keypair_path.clone())?;
    let payer = match load_keypair(&keypair_path) {
        Ok(payer) => payer,
        Err(_) => {
            log::print_message(&format!("Keypair not found at {}.", keypair_path.display()));
            log::print_message("Creating a new keypair...");
            keypair::create_keypair(&keypair_path)?
        }
    };

    log::print_message(&format!(
        "Using keypair: {} from {}",
        payer.pubkey(),
        keypair_path.display()
    ));
    log::print_message(&format!("Connected to: {}", rpc_url));

    match cli.command {
        // Pool Commands

        Commands::InitializePool { .. } |
        Commands::Fund { .. } => {
            pool::handle_pool_commands(cli, rpc_client, payer).await?;
        }

        // Miner Commands

        Commands::Mine { .. } => {
            log::print_message(&format!("Rollup: {}", cli.rollup));
            mine::handle_mine_command(cli, rpc_client, rollup_client, payer).await?;
        }

        Commands::Register { .. } |
        Commands::Claim { .. } |
        Commands::Stake { .. } |
        Commands::Unstake { .. } => {
            miner::handle_miner_commands(cli, rpc_client, payer).await?;
        }

        // Delegation Commands

        Commands::Delegate { .. } |
        Commands::Accept { .. } |
        Commands::CancelDelegation { .. } |
        Commands::Undelegate { .. } |
        Commands::Commit { .. } => {
            delegation::handle_delegation_commands(cli, rpc_client, rollup_client, payer).await?;
        }

        Commands::Info { .. } => {}
    }

    Ok(())
}
