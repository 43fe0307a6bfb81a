use steel::*;

#[repr(u32)]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
pub enum MorError {
    #[error("Unknown error")]
    UnknownError = 0,

    #[error("Signer is not the authority of this account")]
    Unauthorized = 10,
    #[error("The account has already been initialized")]
    AlreadyExists = 11,

    #[error("A solution was already accepted for this epoch")]
    AlreadyMined = 20,
    #[error("The claimed epoch does not match the current epoch")]
    EpochMismatch = 21,
    #[error("The provided nonce does not satisfy the difficulty")]
    InvalidSolution = 22,
    #[error("Difficulty must be between 0 and 32 bytes")]
    InvalidDifficulty = 23,

    #[error("Insufficient token balance")]
    InsufficientFunds = 30,
    #[error("The reward pool cannot cover this reward")]
    InsufficientRewardPool = 31,
    #[error("Unstake amount exceeds the staked amount")]
    InsufficientStake = 32,
    #[error("No rewards available to claim")]
    NothingToClaim = 33,

    #[error("The executing layer does not own write authority over this account")]
    WrongOwner = 40,
    #[error("The commitment does not match the pending undelegation")]
    InvalidCommitment = 41,
    #[error("The delegation request has not timed out yet")]
    DelegationPending = 42,

    #[error("The pool configuration is invalid")]
    InvalidConfig = 50,
}

error!(MorError);
