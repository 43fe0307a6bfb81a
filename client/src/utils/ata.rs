use anyhow::{Result, anyhow};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::instruction::create_associated_token_account;

use crate::utils::{deserialize, get_latest_blockhash, send_and_confirm_transaction};

/// Make sure `owner` has an associated token account for `mint`, creating it with `payer`'s
/// lamports if needed. Returns the default signature when it already existed.
pub async fn create_ata(
    client: &RpcClient,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, Signature)> {
    let token_program_id = &spl_token::ID;
    let payer_pk         = payer.pubkey();

    let ata = spl_associated_token_account::get_associated_token_address_with_program_id(
        owner,
        mint,
        token_program_id,
    );

    // Check if ATA already exists
    if let Ok(account) = client.get_account(&ata).await {
        if account.owner == *token_program_id {
            return Ok((ata, Signature::default()));
        }
        return Err(anyhow!(
            "Account {} exists but is owned by {}, not the expected token program {}",
            ata, account.owner, token_program_id
        ));
    }

    match client.get_account(mint).await {
        Ok(account) if account.owner == *token_program_id => {}
        Ok(account) => {
            return Err(anyhow!("Mint {} is owned by {}, not the expected token program {}", mint, account.owner, token_program_id));
        }
        Err(e) => {
            return Err(anyhow!("Failed to fetch mint {}: {}", mint, e));
        }
    }

    let create_ata_ix = create_associated_token_account(&payer_pk, owner, mint, token_program_id);

    let blockhash_bytes = get_latest_blockhash(client).await?;
    let recent_blockhash = deserialize(&blockhash_bytes)?;
    let tx = Transaction::new_signed_with_payer(
        &[create_ata_ix],
        Some(&payer_pk),
        &[payer],
        recent_blockhash,
    );

    let signature_bytes = send_and_confirm_transaction(client, &tx)
        .await
        .map_err(|e| anyhow!("Failed to create ATA {} for mint {} and owner {}: {}", ata, mint, owner, e))?;
    let signature: Signature = deserialize(&signature_bytes)?;

    Ok((ata, signature))
}

/// Token balance of an associated token account, 0 if it does not exist.
pub async fn get_token_balance(client: &RpcClient, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
    let ata = spl_associated_token_account::get_associated_token_address(owner, mint);

    match client.get_token_account_balance(&ata).await {
        Ok(balance) => balance
            .amount
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid token amount for {}: {}", ata, e)),
        Err(_) => Ok(0),
    }
}
