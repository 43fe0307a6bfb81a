use crate::consts::*;

// Staking multiplier by whole tokens staked. Tiered and linear within each tier so the bonus
// keeps growing with stake but flattens out, reaching the cap at 395 whole tokens.
//
//   whole tokens   bonus
//   0              0
//   1..=9          n / 2
//   10..=49        4 + (n - 10) / 2
//   50..=99        24 + (n - 50) / 3
//   100..          40 + (n - 100) / 5
//
// multiplier = BASE_MULTIPLIER + bonus, capped at MAX_MULTIPLIER.
#[inline(always)]
pub fn get_multiplier(staked_amount: u64, decimals: u64) -> u64 {
    let one_token = 10u64.checked_pow(decimals as u32).unwrap_or(u64::MAX);
    let whole = staked_amount / one_token;

    let bonus = match whole {
        0           => 0,
        1..=9       => whole / 2,
        10..=49     => 4 + (whole - 10) / 2,
        50..=99     => 24 + (whole - 50) / 3,
        _           => 40u64.saturating_add((whole - 100) / 5),
    };

    BASE_MULTIPLIER
        .saturating_add(bonus)
        .min(MAX_MULTIPLIER)
}
