use clap::{Parser, Subcommand};
use std::str::FromStr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mor",
    about = "Mine tokens from pre-funded pools, on the base layer or a rollup.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'k', long = "keypair", global = true)]
    pub keypair_path: Option<PathBuf>,

    #[arg(
        short = 'u',
        long = "cluster",
        default_value = "l",
        global = true,
        help = "Cluster to use: l (localnet), m (mainnet), d (devnet), t (testnet),\n or a custom RPC URL"
    )]
    pub cluster: Cluster,

    #[arg(
        short = 'r',
        long = "rollup",
        default_value = "http://127.0.0.1:7799",
        global = true,
        help = "RPC URL of the rollup delegated records live on"
    )]
    pub rollup: String,

    #[arg(short = 'v', long = "verbose", help = "Print verbose output", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {

    // Pool Commands

    InitializePool {
        #[arg(help = "Mint of the token to mine")]
        mint: String,

        #[arg(help = "Tokens moved into the pool vault, in base units")]
        amount: u64,

        #[arg(long = "reward-amount", default_value_t = 0, help = "Part of the amount set aside for issuance right away")]
        reward_amount: u64,

        #[arg(long = "reward-per-epoch", default_value_t = 1, help = "Base reward for an accepted solution")]
        reward_per_epoch: u64,

        #[arg(short = 'd', long = "difficulty", default_value_t = 1, help = "Leading zero bytes required of a solution")]
        difficulty: u64,
    },
    Fund {
        #[arg(help = "Mint of the pool to fund")]
        mint: String,

        #[arg(help = "Tokens added to the reward state, in base units")]
        amount: u64,
    },

    // Miner Commands

    Register {
        #[arg(help = "Pool to mine from")]
        pool: String,
    },
    Mine {
        #[arg(help = "Pool to mine from")]
        pool: String,

        #[arg(short = 't', long = "threads", help = "Solver threads, defaults to all cores")]
        threads: Option<usize>,

        #[arg(long = "validator-keypair", help = "Rollup validator keypair. Mining on the rollup needs it: once the miner is delegated every submission must be co-signed by the validator")]
        validator_keypair: Option<PathBuf>,
    },
    Claim {
        #[arg(help = "Pool the rewards were earned in")]
        pool: String,

        #[arg(help = "Wallet receiving the rewards, defaults to the signer")]
        recipient: Option<String>,
    },
    Stake {
        #[arg(help = "Pool to stake into")]
        pool: String,

        #[arg(help = "Tokens to stake, in base units")]
        amount: u64,
    },
    Unstake {
        #[arg(help = "Pool to unstake from")]
        pool: String,

        #[arg(help = "Tokens to withdraw, in base units")]
        amount: u64,
    },

    // Delegation Commands

    Delegate {
        #[arg(help = "Pool the record belongs to")]
        pool: String,

        #[arg(help = "Rollup validator to delegate to")]
        validator: String,

        #[arg(long = "reward-state", help = "Delegate the pool's reward state instead of the signer's miner")]
        reward_state: bool,
    },
    Accept {
        #[arg(help = "Record whose delegation to accept, signed by the validator keypair")]
        record: String,
    },
    CancelDelegation {
        #[arg(help = "Record with a pending delegation request")]
        record: String,
    },
    Undelegate {
        #[arg(help = "Delegated record to bring back")]
        record: String,

        #[arg(long = "validator-keypair", help = "Rollup validator keypair co-signing the request")]
        validator_keypair: PathBuf,
    },
    Commit {
        #[arg(help = "Frozen record to flush to the base layer, signed by the validator keypair")]
        record: String,

        #[arg(long = "timeout", default_value_t = 60, help = "Seconds to wait for the base layer to reflect the commitment")]
        timeout: u64,
    },

    // Info Commands

    Info {
        #[command(subcommand)]
        command: InfoCommands,
    },
}

#[derive(Subcommand)]
pub enum InfoCommands {
    Pool {
        #[arg(help = "Pool account public key")]
        pool: String,
    },
    Reward {
        #[arg(help = "Pool whose reward state to show")]
        pool: String,
    },
    Miner {
        #[arg(help = "Miner account public key")]
        miner: String,
    },
    Miners {
        #[arg(help = "Pool whose miners to list")]
        pool: String,
    },
}

#[derive(Debug, Clone)]
pub enum Cluster {
    Localnet,
    Mainnet,
    Devnet,
    Testnet,
    Custom(String),
}

impl Cluster {
    pub fn rpc_url(&self) -> String {
        match self {
            Cluster::Localnet => "http://127.0.0.1:8899".to_string(),
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
            Cluster::Devnet => "https://api.devnet.solana.com".to_string(),
            Cluster::Testnet => "https://api.testnet.solana.com".to_string(),
            Cluster::Custom(url) => url.clone(),
        }
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l" => Ok(Cluster::Localnet),
            "m" => Ok(Cluster::Mainnet),
            "d" => Ok(Cluster::Devnet),
            "t" => Ok(Cluster::Testnet),
            s if s.starts_with("http://") || s.starts_with("https://") => Ok(Cluster::Custom(s.to_string())),
            _ => Err(format!(
                "Invalid cluster value: '{}'. Use l, m, d, t, or a valid RPC URL (http:// or https://)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_parsing() {
        assert_eq!(Cluster::from_str("d").unwrap().rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(
            Cluster::from_str("https://rpc.example.com").unwrap().rpc_url(),
            "https://rpc.example.com"
        );
        assert!(Cluster::from_str("x").is_err());
    }

    #[test]
    fn test_parse_mine() {
        let cli = Cli::try_parse_from(["mor", "-u", "d", "mine", "11111111111111111111111111111111", "-t", "4"]).unwrap();
        match cli.command {
            Commands::Mine { threads, validator_keypair, .. } => {
                assert_eq!(threads, Some(4));
                assert!(validator_keypair.is_none());
            }
            _ => panic!("expected mine"),
        }
        assert_eq!(cli.rollup, "http://127.0.0.1:7799");
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["mor", "info", "miners", "11111111111111111111111111111111"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { command: InfoCommands::Miners { .. } }));
    }

    #[test]
    fn test_mine_help_names_the_rollup_requirement() {
        use clap::CommandFactory;

        let command = Cli::command();
        let mine = command.find_subcommand("mine").unwrap();
        let help = mine
            .get_arguments()
            .find(|arg| arg.get_id() == "validator_keypair")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();

        assert!(help.contains("Mining on the rollup needs it"));
    }
}
