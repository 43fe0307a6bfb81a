use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

use log::debug;
use solana_sdk::pubkey::Pubkey;
use mor_api::prelude::*;

// How often a worker looks at the stop flag.
const CHECK_INTERVAL: u64 = 1 << 12;

/// A nonce that meets the difficulty for its challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u64,
    pub hash: [u8; 32],
}

/// Search nonces for (authority, epoch) at `difficulty` across `threads` workers. Worker `i`
/// tries `start + i`, `start + i + threads`, and so on. Returns `None` once `cancel` is set.
pub fn solve(
    authority: &Pubkey,
    epoch: u64,
    difficulty: u64,
    threads: usize,
    start: u64,
    cancel: Arc<AtomicBool>,
) -> Option<Solution> {
    let threads = threads.max(1);
    let challenge = compute_challenge(authority, epoch);
    let found = Arc::new(AtomicBool::new(false));
    let attempts = Arc::new(AtomicU64::new(0));
    let timer = Instant::now();

    let handles: Vec<_> = (0..threads as u64)
        .map(|i| {
            std::thread::spawn({
                let found = found.clone();
                let cancel = cancel.clone();
                let attempts = attempts.clone();
                move || {
                    let mut nonce = start.wrapping_add(i);
                    let mut tried = 0u64;

                    loop {
                        let hash = compute_solution_hash(&challenge, nonce);
                        tried += 1;

                        if matches!(meets_target(&hash, difficulty), Ok(true)) {
                            found.store(true, Ordering::Relaxed);
                            attempts.fetch_add(tried, Ordering::Relaxed);
                            return Some(Solution { nonce, hash });
                        }

                        if tried % CHECK_INTERVAL == 0
                            && (found.load(Ordering::Relaxed) || cancel.load(Ordering::Relaxed))
                        {
                            attempts.fetch_add(tried, Ordering::Relaxed);
                            return None;
                        }

                        nonce = nonce.wrapping_add(threads as u64);
                    }
                }
            })
        })
        .collect();

    let mut solution = None;
    for h in handles {
        if let Ok(Some(s)) = h.join() {
            solution.get_or_insert(s);
        }
    }

    debug!(
        "solver: epoch {} difficulty {} tried {} nonces in {:?}",
        epoch,
        difficulty,
        attempts.load(Ordering::Relaxed),
        timer.elapsed()
    );

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_solution_verifies() {
        let authority = Pubkey::new_unique();
        let start = rand::thread_rng().gen::<u64>();

        let solution = solve(&authority, 3, 1, 4, start, Arc::new(AtomicBool::new(false)))
            .expect("difficulty 1 is always reachable");

        assert!(verify_solution(&authority, 3, solution.nonce, 1).unwrap());
        assert_eq!(solution.hash[0], 0);
        assert_eq!(
            compute_solution_hash(&compute_challenge(&authority, 3), solution.nonce),
            solution.hash
        );
    }

    #[test]
    fn test_cancelled_search_stops() {
        let authority = Pubkey::new_unique();
        let cancel = Arc::new(AtomicBool::new(true));

        // unreachable target, only the cancel flag can end it
        assert_eq!(solve(&authority, 1, MAX_DIFFICULTY, 2, 0, cancel), None);
    }
}
