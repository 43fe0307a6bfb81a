use std::time::{Duration, Instant};

use log::{debug, info};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_client::nonblocking::rpc_client::RpcClient;
use thiserror::Error;
use tokio::time::sleep;

use mor_api::prelude::*;
use crate::utils::*;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("record {0} is not awaiting undelegation on the rollup")]
    NotFrozen(Pubkey),

    #[error("record {record} is delegated to {expected}, not {validator}")]
    WrongValidator {
        record: Pubkey,
        expected: Pubkey,
        validator: Pubkey,
    },

    #[error("commitment for {0} not observed on the base layer in time")]
    Timeout(Pubkey),

    #[error(transparent)]
    Rpc(#[from] anyhow::Error),
}

/// Flush the frozen rollup copy of `record` to the base layer, signed by the validator.
/// Returns the commitment id the base layer now records.
pub async fn commit_undelegation(
    base: &RpcClient,
    rollup: &RpcClient,
    validator: &Keypair,
    record: Pubkey,
) -> Result<(Signature, [u8; 32]), CommitError> {
    let snapshot = get_account_data(rollup, &record).await?;

    let commit_id = match record_delegation(&snapshot)?.state() {
        Ok(DelegationState::UndelegationRequested { validator: v, commit_id, .. }) => {
            if v != validator.pubkey() {
                return Err(CommitError::WrongValidator {
                    record,
                    expected: v,
                    validator: validator.pubkey(),
                });
            }
            commit_id
        }
        _ => return Err(CommitError::NotFrozen(record)),
    };

    debug!(
        "committing {} ({} bytes, state hash {})",
        record,
        snapshot.len(),
        to_hex(&compute_state_hash(&snapshot))
    );

    let ix = build_commit_ix(validator.pubkey(), record, commit_id, &snapshot);
    let signature = send_with_retry(base, &ix, validator, &[], 3).await?;

    info!("committed {} as {}", record, to_hex(&commit_id));

    Ok((signature, commit_id))
}

/// Poll the base layer until `record` is back under base ownership with `commit_id` as its
/// last commitment.
pub async fn wait_for_commitment(
    base: &RpcClient,
    record: Pubkey,
    commit_id: [u8; 32],
    timeout: Duration,
) -> Result<(), CommitError> {
    let start = Instant::now();

    loop {
        if let Ok(data) = get_account_data(base, &record).await {
            if record_delegation(&data)?.last_commit() == Some(commit_id) {
                return Ok(());
            }
        }

        if start.elapsed() >= timeout {
            return Err(CommitError::Timeout(record));
        }

        sleep(POLL_INTERVAL).await;
    }
}
