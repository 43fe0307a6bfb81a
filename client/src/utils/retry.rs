use anyhow::{anyhow, Result};
use log::{debug, error};
use solana_client::{
    client_error::{ClientErrorKind, Result as ClientResult},
    rpc_response::RpcSimulateTransactionResult,
};

use solana_sdk::signature::Signature;
use tokio::time::Duration;

/// Backoff schedule for flaky RPC calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 8,
            initial_backoff: Duration::from_millis(200),
            timeout: Duration::from_secs(8),
        }
    }
}

/// Retry an async operation with the default policy.
pub async fn retry<F, Fut, T>(f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    retry_with(RetryPolicy::default(), f).await
}

/// Retry an async operation with exponential backoff. Each attempt is bounded by
/// `policy.timeout`.
pub async fn retry_with<F, Fut, T>(policy: RetryPolicy, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut backoff = policy.initial_backoff;
    let attempts = policy.max_retries.max(1);

    for attempt in 0..attempts {
        match tokio::time::timeout(policy.timeout, f()).await {
            Ok(Ok(result)) => {
                return Ok(result);
            }
            Ok(Err(e)) if attempt == attempts - 1 => {
                error!("Attempt {} failed with error: {:?}", attempt + 1, e);
                return Err(e);
            }
            Err(_) if attempt == attempts - 1 => {
                error!("Attempt {} timed out after {:?}", attempt + 1, policy.timeout);
                return Err(anyhow!("Retry failed"));
            }
            Ok(Err(e)) => {
                debug!("Attempt {} failed, retrying in {:?}: {}", attempt + 1, backoff, e);
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(_) => {
                debug!("Attempt {} timed out, retrying in {:?}", attempt + 1, backoff);
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }
    }

    Err(anyhow!("All retry attempts failed"))
}

/// Surface the simulation logs of a rejected transaction.
pub fn with_logs(res: ClientResult<Signature>) -> Result<Signature> {
    match res {
        Ok(signature) => Ok(signature),
        Err(e) => {
            if let ClientErrorKind::RpcError(
                solana_client::rpc_request::RpcError::RpcResponseError { data, .. },
            ) = e.kind()
            {
                if let solana_client::rpc_request::RpcResponseErrorData::SendTransactionPreflightFailure(
                    RpcSimulateTransactionResult { logs: Some(logs), .. }
                ) = data {
                    error!("Transaction simulation failed:");
                    for log in logs {
                        error!("  {}", log);
                    }
                }
            }
            Err(anyhow!("Transaction failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1),
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with(fast(), move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(anyhow!("flaky"))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = retry_with(fast(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("down"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
