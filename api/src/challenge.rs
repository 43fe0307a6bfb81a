use sha3::{Digest, Sha3_256};
use steel::*;

use crate::consts::*;
use crate::error::MorError;

/// The puzzle a miner has to solve for an epoch: SHA3-256(authority || epoch_le).
///
/// No salt, so any node can re-derive it from public data.
pub fn compute_challenge(authority: &Pubkey, epoch: u64) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(authority.to_bytes());
    hasher.update(epoch.to_le_bytes());
    hasher.finalize().into()
}

/// SHA3-256(challenge || nonce_le)
pub fn compute_solution_hash(challenge: &[u8; 32], nonce: u64) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(challenge);
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}

/// True iff the first `difficulty` bytes of `hash` are zero.
pub fn meets_target(hash: &[u8; 32], difficulty: u64) -> Result<bool, ProgramError> {
    if difficulty > MAX_DIFFICULTY {
        return Err(MorError::InvalidDifficulty.into());
    }

    Ok(hash[..difficulty as usize].iter().all(|&b| b == 0))
}

/// Full check of a nonce for (authority, epoch) at the given difficulty.
pub fn verify_solution(
    authority: &Pubkey,
    epoch: u64,
    nonce: u64,
    difficulty: u64,
) -> Result<bool, ProgramError> {
    let challenge = compute_challenge(authority, epoch);
    let hash = compute_solution_hash(&challenge, nonce);
    meets_target(&hash, difficulty)
}

/// Identifies one undelegation request of `record` to `validator` made at `height`.
pub fn compute_commit_id(record: &Pubkey, validator: &Pubkey, height: u64) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(COMMIT);
    hasher.update(record.to_bytes());
    hasher.update(validator.to_bytes());
    hasher.update(height.to_le_bytes());
    hasher.finalize().into()
}

/// Digest of a full account snapshot (discriminator included).
pub fn compute_state_hash(account_data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(account_data).into()
}
