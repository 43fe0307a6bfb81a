use steel::*;
use crate::event;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum EventType {
    Unknown = 0,
    MineEvent,
    ClaimEvent,
    CommitEvent,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MineEvent {
    pub miner: Pubkey,
    pub epoch: u64,
    pub reward: u64,
    pub multiplier: u64,
    pub remaining: u64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ClaimEvent {
    pub miner: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CommitEvent {
    pub record: Pubkey,
    pub validator: Pubkey,
    pub commit_id: [u8; 32],
}

event!(EventType, MineEvent);
event!(EventType, ClaimEvent);
event!(EventType, CommitEvent);
