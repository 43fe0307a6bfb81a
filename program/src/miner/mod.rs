pub mod register;
pub mod mine;
pub mod claim;
pub mod stake;

pub use register::*;
pub use mine::*;
pub use claim::*;
pub use stake::*;

use mor_api::prelude::*;
use steel::*;

/// Typed miner record behind `miner_info`, checked to be the PDA of its own authority in `pool`.
pub(crate) fn load_miner<'a>(
    miner_info: &'a AccountInfo<'_>,
    pool: &Pubkey,
) -> Result<&'a mut Miner, ProgramError> {
    let authority = miner_info
        .is_writable()?
        .as_account::<Miner>(&mor_api::ID)?
        .authority;

    miner_info
        .is_miner(&authority, pool)?
        .as_account_mut::<Miner>(&mor_api::ID)
}
