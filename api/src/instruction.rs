use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum InstructionType {
    Unknown = 0,

    // Pool instructions
    InitializePool,
    FundRewardState,

    // Miner instructions
    InitializeMiner,
    SubmitSolution,
    Claim,
    Stake,
    Unstake,

    // Delegation instructions
    Delegate,
    AcceptDelegation,
    CancelDelegation,
    Undelegate,
    Commit,
}

instruction!(InstructionType, InitializePool);
instruction!(InstructionType, FundRewardState);

instruction!(InstructionType, InitializeMiner);
instruction!(InstructionType, SubmitSolution);
instruction!(InstructionType, Claim);
instruction!(InstructionType, Stake);
instruction!(InstructionType, Unstake);

instruction!(InstructionType, Delegate);
instruction!(InstructionType, AcceptDelegation);
instruction!(InstructionType, CancelDelegation);
instruction!(InstructionType, Undelegate);
instruction!(InstructionType, Commit);

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InitializePool {
    pub amount: [u8; 8],
    pub reward_amount: [u8; 8],
    pub reward_per_epoch: [u8; 8],
    pub difficulty: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FundRewardState {
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InitializeMiner {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SubmitSolution {
    pub nonce: [u8; 8],
    pub epoch: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Claim {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Stake {
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Unstake {
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Delegate {
    pub validator: [u8; 32],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AcceptDelegation {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CancelDelegation {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Undelegate {}

/// Commitment header, followed in the instruction data by the full account snapshot the
/// rollup flushed for the record.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Commit {
    pub commit_id: [u8; 32],
    pub state_hash: [u8; 32],
}

impl Commit {
    pub fn pack(&self, snapshot: &[u8]) -> Vec<u8> {
        let mut result = self.to_bytes();
        result.extend_from_slice(snapshot);
        result
    }
}

pub struct ParsedCommit {
    pub header: Commit,
    pub snapshot: Vec<u8>,
}

impl ParsedCommit {
    pub fn try_from_bytes(data: &[u8]) -> Result<Self, ProgramError> {
        let header_len = core::mem::size_of::<Commit>();
        if data.len() <= header_len {
            return Err(ProgramError::InvalidInstructionData);
        }

        let header = *Commit::try_from_bytes(&data[..header_len])?;
        let snapshot = data[header_len..].to_vec();

        Ok(Self {
            header,
            snapshot,
        })
    }
}
