#![allow(unexpected_cfgs)]

pub mod host;
pub mod ledger;
pub mod pool;
pub mod miner;
pub mod delegation;

use pool::*;
use miner::*;
use delegation::*;

use mor_api::instruction::*;
use steel::*;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let (ix, data) = parse_instruction(&mor_api::ID, program_id, data)?;

    match ix {
        // Pool instructions
        InstructionType::InitializePool => process_initialize_pool(accounts, data)?,
        InstructionType::FundRewardState => process_fund_reward_state(accounts, data)?,

        // Miner instructions
        InstructionType::InitializeMiner => process_register(accounts, data)?,
        InstructionType::SubmitSolution => process_submit_solution(accounts, data)?,
        InstructionType::Claim => process_claim(accounts, data)?,
        InstructionType::Stake => process_stake(accounts, data)?,
        InstructionType::Unstake => process_unstake(accounts, data)?,

        // Delegation instructions
        InstructionType::Delegate => process_delegate(accounts, data)?,
        InstructionType::AcceptDelegation => process_accept_delegation(accounts, data)?,
        InstructionType::CancelDelegation => process_cancel_delegation(accounts, data)?,
        InstructionType::Undelegate => process_undelegate(accounts, data)?,
        InstructionType::Commit => process_commit(accounts, data)?,

        _ => { return Err(ProgramError::InvalidInstructionData); }
    }

    Ok(())
}

entrypoint!(process_instruction);
