use anyhow::{anyhow, Result};
use log::debug;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcProgramAccountsConfig,
};
use solana_sdk::{
    account::Account,
    compute_budget::ComputeBudgetInstruction,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tokio::time::{sleep, Duration};

use crate::utils::{deserialize, serialize, retry, with_logs};

/// Initial backoff duration for retries (milliseconds).
const INITIAL_BACKOFF: u64 = 200;

/// Sends a transaction and returns its serialized signature.
pub async fn send_transaction(client: &RpcClient, tx: &Transaction) -> Result<Vec<u8>> {
    let signature: Signature = with_logs(client.send_transaction(tx).await)?;
    serialize(&signature)
}

/// Sends and confirms a transaction, returning its serialized signature.
pub async fn send_and_confirm_transaction(client: &RpcClient, tx: &Transaction) -> Result<Vec<u8>> {
    let signature: Signature = with_logs(client.send_and_confirm_transaction(tx).await)?;
    serialize(&signature)
}

/// Fetches the latest blockhash and returns it serialized.
pub async fn get_latest_blockhash(client: &RpcClient) -> Result<Vec<u8>> {
    let hash: Hash = client.get_latest_blockhash().await?;
    serialize(&hash)
}

/// Signs `instructions` with the payer plus any co-signers, prefixed with a compute limit, and
/// waits for confirmation.
pub async fn submit_instructions(
    client: &RpcClient,
    payer: &Keypair,
    cosigners: &[&Keypair],
    instructions: &[Instruction],
    compute_units: u32,
) -> Result<Signature> {
    let mut ixs = vec![ComputeBudgetInstruction::set_compute_unit_limit(compute_units)];
    ixs.extend_from_slice(instructions);

    let mut signers = vec![payer];
    signers.extend_from_slice(cosigners);

    let blockhash_bytes = get_latest_blockhash(client).await?;
    let recent_blockhash = deserialize(&blockhash_bytes)?;
    let tx = Transaction::new_signed_with_payer(
        &ixs,
        Some(&payer.pubkey()),
        signers.as_slice(),
        recent_blockhash,
    );

    let signature_bytes = send_and_confirm_transaction(client, &tx).await?;
    deserialize(&signature_bytes)
}

/// Sends a transaction with retry logic, returning its signature.
pub async fn send_with_retry(
    client: &RpcClient,
    instruction: &Instruction,
    payer: &Keypair,
    cosigners: &[&Keypair],
    max_retries: u32,
) -> Result<Signature> {
    let mut attempts = 0;
    let mut signers = vec![payer];
    signers.extend_from_slice(cosigners);

    loop {
        let blockhash_bytes = get_latest_blockhash(client).await?;
        let recent_blockhash = deserialize(&blockhash_bytes)?;

        let tx = Transaction::new_signed_with_payer(
            &[instruction.clone()],
            Some(&payer.pubkey()),
            signers.as_slice(),
            recent_blockhash,
        );

        let result = send_and_confirm_transaction(client, &tx)
            .await
            .and_then(|bytes| deserialize::<Signature>(&bytes));

        match result {
            Ok(signature) => return Ok(signature),
            Err(e) if attempts < max_retries => {
                attempts += 1;
                let delay_ms = INITIAL_BACKOFF * (1 << attempts);

                debug!(
                    "send_with_retry attempt {}/{}, waiting {}ms: {}",
                    attempts, max_retries, delay_ms, e
                );

                sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }
            Err(e) => {
                return Err(anyhow!(
                    "Failed to send transaction after {} attempts: {}",
                    max_retries,
                    e
                ))
            }
        }
    }
}

/// Fetches an account by address and returns its serialized data.
pub async fn get_account(client: &RpcClient, address: &Pubkey) -> Result<Vec<u8>> {
    let account: Account = client.get_account(address).await?;
    serialize(&account)
}

/// Fetches the raw data of an account, discriminator included.
pub async fn get_account_data(client: &RpcClient, address: &Pubkey) -> Result<Vec<u8>> {
    let account_bytes = get_account(client, address).await?;
    let account: Account = deserialize(&account_bytes)?;
    Ok(account.data)
}

/// Fetches program accounts with the given configuration.
pub async fn get_program_account(
    client: &RpcClient,
    config: RpcProgramAccountsConfig,
) -> Result<Vec<(Pubkey, Account)>> {
    client
        .get_program_accounts_with_config(&mor_api::ID, config)
        .await
        .map_err(|e| anyhow!("Failed to fetch program accounts: {}", e))
}

/// Fetches the current slot with retry logic.
pub async fn get_slot(client: &RpcClient) -> Result<u64> {
    retry(move || async move {
        client
            .get_slot()
            .await
            .map_err(|e| anyhow!("Failed to fetch current slot: {}", e))
    })
    .await
}
