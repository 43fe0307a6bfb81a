use anyhow::{Result, anyhow};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_account_decoder::UiAccountEncoding;
use solana_sdk::{pubkey::Pubkey, account::Account};
use mor_api::pda::{mining_pool_pda, reward_state_pda};
use mor_api::state::{AccountType, Delegation, Miner, MiningPool, MiningPoolRewardState};
use crate::utils::{get_account_data, get_program_account};

// Offset of `Miner::pool`: discriminator then authority.
const MINER_POOL_OFFSET: usize = 8 + 32;

pub async fn get_pool_account(client: &RpcClient, pool_address: &Pubkey) -> Result<(MiningPool, Pubkey)> {
    let data = get_account_data(client, pool_address).await?;
    let account = MiningPool::unpack_unaligned(&data)
        .map_err(|e| anyhow!("Failed to unpack pool account: {}", e))?;
    Ok((account, *pool_address))
}

pub async fn find_pool_account(client: &RpcClient, maker: &Pubkey, mint: &Pubkey) -> Result<(MiningPool, Pubkey)> {
    let (pool_address, _bump) = mining_pool_pda(*maker, *mint);
    get_pool_account(client, &pool_address).await
}

pub async fn get_reward_state_account(client: &RpcClient, reward_address: &Pubkey) -> Result<(MiningPoolRewardState, Pubkey)> {
    let data = get_account_data(client, reward_address).await?;
    let account = MiningPoolRewardState::unpack_unaligned(&data)
        .map_err(|e| anyhow!("Failed to unpack reward state account: {}", e))?;
    Ok((account, *reward_address))
}

/// The reward state of a pool, derived from the pool's maker.
pub async fn find_reward_state_account(client: &RpcClient, pool: &MiningPool, pool_address: &Pubkey) -> Result<(MiningPoolRewardState, Pubkey)> {
    let (reward_address, _bump) = reward_state_pda(pool.maker, *pool_address);
    get_reward_state_account(client, &reward_address).await
}

pub async fn get_miner_account(client: &RpcClient, miner_address: &Pubkey) -> Result<(Miner, Pubkey)> {
    let data = get_account_data(client, miner_address).await?;
    let account = Miner::unpack_unaligned(&data)
        .map_err(|e| anyhow!("Failed to unpack miner account: {}", e))?;
    Ok((account, *miner_address))
}

/// All miners registered with `pool`.
pub async fn list_pool_miners(client: &RpcClient, pool: &Pubkey) -> Result<Vec<(Pubkey, Miner)>> {
    let config = RpcProgramAccountsConfig {

        filters: Some(vec![
            RpcFilterType::DataSize(Miner::get_size() as u64),
            RpcFilterType::Memcmp(Memcmp::new(
                0, // discriminator
                MemcmpEncodedBytes::Base64(base64::encode([AccountType::Miner as u8])),
            )),
            RpcFilterType::Memcmp(Memcmp::new(
                MINER_POOL_OFFSET,
                MemcmpEncodedBytes::Base64(base64::encode(pool.to_bytes())),
            )),
        ]),

        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            data_slice: None,
            commitment: None,
            min_context_slot: None,
        },
        with_context: None,
        sort_results: true.into(),
    };

    let accounts: Vec<(Pubkey, Account)> = get_program_account(client, config).await?;

    accounts
        .into_iter()
        .map(|(address, account)| {
            Miner::unpack_unaligned(&account.data)
                .map(|miner| (address, miner))
                .map_err(|e| anyhow!("Failed to unpack miner account {}: {}", address, e))
        })
        .collect()
}

/// The delegation tag of a miner or reward-state record, given its raw data.
pub fn record_delegation(data: &[u8]) -> Result<Delegation> {
    let account_type = data
        .first()
        .copied()
        .and_then(|b| AccountType::try_from(b).ok())
        .ok_or_else(|| anyhow!("Unknown account type"))?;

    match account_type {
        AccountType::Miner => Miner::unpack_unaligned(data)
            .map(|miner| miner.delegation)
            .map_err(|e| anyhow!("Failed to unpack miner account: {}", e)),
        AccountType::MiningPoolRewardState => MiningPoolRewardState::unpack_unaligned(data)
            .map(|reward| reward.delegation)
            .map_err(|e| anyhow!("Failed to unpack reward state account: {}", e)),
        _ => Err(anyhow!("Account type {:?} cannot be delegated", account_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mor_api::state::DelegationState;
    use bytemuck::Zeroable;

    #[test]
    fn test_miner_pool_offset() {
        let mut miner = Miner::zeroed();
        miner.pool = Pubkey::new_unique();
        let data = miner.pack();
        assert_eq!(&data[MINER_POOL_OFFSET..MINER_POOL_OFFSET + 32], miner.pool.as_ref());
    }

    #[test]
    fn test_record_delegation() {
        let validator = Pubkey::new_unique();

        let mut miner = Miner::zeroed();
        miner.delegation.set(DelegationState::RollupOwned { validator });
        let delegation = record_delegation(&miner.pack()).unwrap();
        assert_eq!(delegation.state().unwrap(), DelegationState::RollupOwned { validator });

        let reward = MiningPoolRewardState::zeroed();
        let delegation = record_delegation(&reward.pack()).unwrap();
        assert_eq!(delegation.state().unwrap(), DelegationState::BaseLayerOwned);

        assert!(record_delegation(&MiningPool::zeroed().pack()).is_err());
        assert!(record_delegation(&[]).is_err());
    }
}
