pub mod utils;
use utils::*;

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Once;

use mor_api::prelude::*;
use solana_program::clock::Clock;
use solana_program::instruction::Instruction;
use solana_program::program_stubs::{set_syscall_stubs, SyscallStubs};
use steel::*;

const EPOCH: u64 = 10;

thread_local! {
    static HEIGHT: Cell<u64> = const { Cell::new(0) };
}

/// Serves the clock sysvar at the height set by the running test.
struct ClockStubs;

impl SyscallStubs for ClockStubs {
    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            slot: HEIGHT.with(Cell::get),
            unix_timestamp: 1_700_000_000,
            ..Clock::default()
        };

        unsafe { std::ptr::write_unaligned(var_addr as *mut Clock, clock) };
        solana_program::entrypoint::SUCCESS
    }
}

fn set_height(height: u64) {
    static STUBS: Once = Once::new();
    STUBS.call_once(|| {
        set_syscall_stubs(Box::new(ClockStubs));
    });

    HEIGHT.with(|cell| cell.set(height));
}

/// Program accounts of one layer, keyed by address. Data is kept 8-byte aligned so the
/// program can borrow records in place.
#[derive(Clone, Default)]
struct Ledger {
    accounts: HashMap<Pubkey, Vec<u64>>,
}

impl Ledger {
    fn store<T: Discriminator + Pod>(&mut self, address: Pubkey, record: &T) {
        let mut data = vec![0u64; 1 + std::mem::size_of::<T>() / 8];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut data);
        bytes[0] = T::discriminator();
        bytes[8..].copy_from_slice(bytemuck::bytes_of(record));

        self.accounts.insert(address, data);
    }

    fn raw(&self, address: &Pubkey) -> Vec<u8> {
        bytemuck::cast_slice(&self.accounts[address]).to_vec()
    }

    fn load<T: Pod>(&self, address: &Pubkey) -> T {
        bytemuck::pod_read_unaligned(&self.raw(address)[8..])
    }

    /// Run `ix` through the program entrypoint. Writes are kept only when it succeeds.
    fn execute(&mut self, ix: &Instruction) -> ProgramResult {
        let mut entries: Vec<(Pubkey, u64, Vec<u64>)> = ix
            .accounts
            .iter()
            .map(|meta| {
                let data = self.accounts.get(&meta.pubkey).cloned().unwrap_or_default();
                (meta.pubkey, 1_000_000, data)
            })
            .collect();

        let infos: Vec<AccountInfo> = entries
            .iter_mut()
            .zip(&ix.accounts)
            .map(|((key, lamports, data), meta)| {
                let owner = if data.is_empty() {
                    &solana_program::system_program::ID
                } else {
                    &mor_api::ID
                };

                AccountInfo::new(
                    key,
                    meta.is_signer,
                    meta.is_writable,
                    lamports,
                    bytemuck::cast_slice_mut(data.as_mut_slice()),
                    owner,
                    false,
                    0,
                )
            })
            .collect();

        let result = mor::process_instruction(&mor_api::ID, &infos, &ix.data);
        drop(infos);

        if result.is_ok() {
            for ((key, _, data), meta) in entries.into_iter().zip(&ix.accounts) {
                if meta.is_writable && !data.is_empty() {
                    self.accounts.insert(key, data);
                }
            }
        }

        result
    }
}

struct Setup {
    fixture: PoolFixture,
    authority: Pubkey,
    miner_address: Pubkey,
    ledger: Ledger,
}

fn setup() -> Setup {
    let fixture = default_pool();
    let authority = Pubkey::new_unique();
    let (miner_address, miner) = register_miner(&fixture, authority);

    let mut ledger = Ledger::default();
    ledger.store(fixture.pool_address, &fixture.pool);
    ledger.store(fixture.reward_address, &fixture.reward_state);
    ledger.store(miner_address, &miner);

    Setup {
        fixture,
        authority,
        miner_address,
        ledger,
    }
}

/// Delegate and accept `record` on the base ledger.
fn hand_over(ledger: &mut Ledger, payer: Pubkey, record: Pubkey, validator: Pubkey) {
    ledger.execute(&build_delegate_ix(payer, record, validator)).unwrap();
    ledger.execute(&build_accept_delegation_ix(validator, record)).unwrap();
}

/// Freeze `record` on the rollup and build the commit the validator relays to the base layer.
fn flush(rollup: &mut Ledger, payer: Pubkey, record: Pubkey, validator: Pubkey) -> Instruction {
    rollup.execute(&build_undelegate_ix(payer, validator, record)).unwrap();

    let snapshot = rollup.raw(&record);
    let commit_id = if snapshot[0] == Miner::discriminator() {
        rollup.load::<Miner>(&record).delegation.commit_id
    } else {
        rollup.load::<MiningPoolRewardState>(&record).delegation.commit_id
    };

    build_commit_ix(validator, record, commit_id, &snapshot)
}

#[test]
fn test_submit_solution_on_the_base_layer() {
    let Setup { fixture, authority, miner_address, mut ledger } = setup();
    set_height(EPOCH * EPOCH_LENGTH);

    let nonce = find_nonce(&authority, EPOCH, fixture.pool.difficulty);
    let mut ix = build_submit_solution_ix(authority, fixture.pool_address, fixture.maker, nonce, EPOCH, None);

    // unsigned submission
    ix.accounts[0].is_signer = false;
    assert_eq!(ledger.execute(&ix), Err(ProgramError::MissingRequiredSignature));

    ix.accounts[0].is_signer = true;
    ledger.execute(&ix).unwrap();

    let miner = ledger.load::<Miner>(&miner_address);
    assert_eq!(miner.rewards, 1);
    assert_eq!(miner.last_epoch_mined, EPOCH);
    assert_eq!(ledger.load::<MiningPoolRewardState>(&fixture.reward_address).amount, 499);

    // a co-signer that holds no delegation is refused
    let stranger = Pubkey::new_unique();
    let nonce = find_nonce(&authority, EPOCH + 1, fixture.pool.difficulty);
    set_height((EPOCH + 1) * EPOCH_LENGTH);
    let ix = build_submit_solution_ix(authority, fixture.pool_address, fixture.maker, nonce, EPOCH + 1, Some(stranger));
    assert_eq!(ledger.execute(&ix), Err(MorError::WrongOwner.into()));
}

#[test]
fn test_delegation_round_trip_through_the_entrypoint() {
    let Setup { fixture, authority, miner_address, ledger: mut base } = setup();
    let validator = Pubkey::new_unique();
    let reward_address = fixture.reward_address;

    set_height(EPOCH * EPOCH_LENGTH);
    hand_over(&mut base, authority, miner_address, validator);
    hand_over(&mut base, fixture.maker, reward_address, validator);

    // the rollup starts from the accepted copies
    let mut rollup = base.clone();

    let nonce = find_nonce(&authority, EPOCH, fixture.pool.difficulty);
    let ix = build_submit_solution_ix(authority, fixture.pool_address, fixture.maker, nonce, EPOCH, None);
    assert_eq!(base.execute(&ix), Err(MorError::WrongOwner.into()));

    let ix = build_submit_solution_ix(authority, fixture.pool_address, fixture.maker, nonce, EPOCH, Some(validator));
    rollup.execute(&ix).unwrap();

    set_height(EPOCH * EPOCH_LENGTH + 5);
    let commit_miner = flush(&mut rollup, authority, miner_address, validator);
    let commit_reward = flush(&mut rollup, fixture.maker, reward_address, validator);

    base.execute(&commit_miner).unwrap();
    base.execute(&commit_reward).unwrap();

    let miner = base.load::<Miner>(&miner_address);
    assert_eq!(miner.rewards, 1);
    assert_eq!(miner.delegation.state().unwrap(), DelegationState::BaseLayerOwned);

    let reward_state = base.load::<MiningPoolRewardState>(&reward_address);
    assert_eq!(reward_state.amount, 499);
    assert_eq!(reward_state.delegation.state().unwrap(), DelegationState::BaseLayerOwned);

    // the same commit can't land again, in this round or the next
    assert_eq!(base.execute(&commit_miner), Err(MorError::WrongOwner.into()));

    set_height((EPOCH + 1) * EPOCH_LENGTH);
    hand_over(&mut base, authority, miner_address, validator);
    assert_eq!(base.execute(&commit_miner), Err(MorError::InvalidCommitment.into()));
    assert_eq!(base.load::<Miner>(&miner_address).delegation.round, 2);
}

#[test]
fn test_commit_rejects_accounts_that_cannot_be_delegated() {
    let Setup { fixture, mut ledger, .. } = setup();
    let validator = Pubkey::new_unique();
    set_height(0);

    let snapshot = ledger.raw(&fixture.pool_address);
    let ix = build_commit_ix(validator, fixture.pool_address, [1; 32], &snapshot);
    assert_eq!(ledger.execute(&ix), Err(ProgramError::InvalidAccountData));

    let ix = build_delegate_ix(fixture.maker, fixture.pool_address, validator);
    assert_eq!(ledger.execute(&ix), Err(ProgramError::InvalidAccountData));
}

#[test]
fn test_commit_from_another_validator_is_unauthorized() {
    let Setup { authority, miner_address, ledger: mut base, .. } = setup();
    let validator = Pubkey::new_unique();
    set_height(EPOCH * EPOCH_LENGTH);

    hand_over(&mut base, authority, miner_address, validator);
    let mut rollup = base.clone();
    let commit = flush(&mut rollup, authority, miner_address, validator);

    let mut forged = commit.clone();
    let impostor = Pubkey::new_unique();
    forged.accounts[0].pubkey = impostor;
    assert_eq!(base.execute(&forged), Err(MorError::Unauthorized.into()));

    base.execute(&commit).unwrap();
}
