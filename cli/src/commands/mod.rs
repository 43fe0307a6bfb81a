pub mod pool;
pub mod miner;
pub mod mine;
pub mod delegation;
pub mod info;

use std::str::FromStr;
use anyhow::{anyhow, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use solana_sdk::pubkey::Pubkey;

pub(crate) fn parse_pubkey(value: &str, what: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|e| anyhow!("Invalid {} pubkey '{}': {}", what, value, e))
}

pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("→ {}", prompt))
        .default(false)
        .interact()
        .map_err(|e| anyhow!("Failed to get user input: {}", e))
}
