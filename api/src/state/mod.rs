mod delegation;
mod miner;
mod pool;
mod reward;

pub use delegation::*;
pub use miner::*;
pub use pool::*;
pub use reward::*;

use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum AccountType {
    Unknown = 0,
    MiningPool,
    Miner,
    MiningPoolRewardState,
}
