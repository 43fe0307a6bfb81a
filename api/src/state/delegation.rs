use steel::*;

/// Persisted delegation tag embedded in every record that can move to the rollup.
///
/// The raw fields are only ever read and written through [`DelegationState`], so a record
/// can't be owned by both layers at once. A zeroed tag is `BaseLayerOwned`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Delegation {
    pub status: u64,
    pub validator: Pubkey,

    /// Pending commitment while undelegating, last finalized commitment otherwise.
    pub commit_id: [u8; 32],

    pub requested_at: u64,

    /// Number of delegations requested over the record's life. A flushed snapshot is only
    /// accepted back into the round it was taken in.
    pub round: u64,
}

#[repr(u64)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum DelegationStatus {
    BaseLayerOwned = 0,
    DelegationRequested,
    RollupOwned,
    UndelegationRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelegationState {
    BaseLayerOwned,
    DelegationRequested {
        validator: Pubkey,
        requested_at: u64,
    },
    RollupOwned {
        validator: Pubkey,
    },
    UndelegationRequested {
        validator: Pubkey,
        commit_id: [u8; 32],
        requested_at: u64,
    },
}

impl DelegationState {
    pub fn status(&self) -> DelegationStatus {
        match self {
            DelegationState::BaseLayerOwned => DelegationStatus::BaseLayerOwned,
            DelegationState::DelegationRequested { .. } => DelegationStatus::DelegationRequested,
            DelegationState::RollupOwned { .. } => DelegationStatus::RollupOwned,
            DelegationState::UndelegationRequested { .. } => DelegationStatus::UndelegationRequested,
        }
    }
}

impl Delegation {
    pub fn state(&self) -> Result<DelegationState, ProgramError> {
        let status = DelegationStatus::try_from(self.status)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        Ok(match status {
            DelegationStatus::BaseLayerOwned => DelegationState::BaseLayerOwned,
            DelegationStatus::DelegationRequested => DelegationState::DelegationRequested {
                validator: self.validator,
                requested_at: self.requested_at,
            },
            DelegationStatus::RollupOwned => DelegationState::RollupOwned {
                validator: self.validator,
            },
            DelegationStatus::UndelegationRequested => DelegationState::UndelegationRequested {
                validator: self.validator,
                commit_id: self.commit_id,
                requested_at: self.requested_at,
            },
        })
    }

    /// Overwrite the tag. Moving to `BaseLayerOwned` keeps `commit_id`, which then names the
    /// last commitment the base layer accepted. `round` is never touched here.
    pub fn set(&mut self, state: DelegationState) {
        self.status = u64::from(state.status());

        match state {
            DelegationState::BaseLayerOwned => {
                self.validator = Pubkey::default();
                self.requested_at = 0;
            }
            DelegationState::DelegationRequested { validator, requested_at } => {
                self.validator = validator;
                self.requested_at = requested_at;
            }
            DelegationState::RollupOwned { validator } => {
                self.validator = validator;
            }
            DelegationState::UndelegationRequested { validator, commit_id, requested_at } => {
                self.validator = validator;
                self.commit_id = commit_id;
                self.requested_at = requested_at;
            }
        }
    }

    pub fn last_commit(&self) -> Option<[u8; 32]> {
        match self.state() {
            Ok(DelegationState::BaseLayerOwned) if self.commit_id != [0; 32] => Some(self.commit_id),
            _ => None,
        }
    }
}

/// Records whose write authority can be delegated to a rollup validator.
pub trait Delegated {
    /// The identity allowed to request delegation and undelegation.
    fn authority(&self) -> Pubkey;

    /// Pool the record belongs to. Part of the record's identity along with `authority` and
    /// `bump`; a commitment may never change any of them.
    fn pool(&self) -> Pubkey;
    fn bump(&self) -> u64;

    fn delegation(&self) -> &Delegation;
    fn delegation_mut(&mut self) -> &mut Delegation;
}

/// The execution domain an instruction runs in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Layer {
    Base,
    Rollup(Pubkey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_tag_is_base_layer_owned() {
        let delegation = Delegation::zeroed();
        assert_eq!(delegation.state().unwrap(), DelegationState::BaseLayerOwned);
        assert_eq!(delegation.last_commit(), None);
    }

    #[test]
    fn test_state_survives_the_raw_encoding() {
        let validator = Pubkey::new_unique();
        let states = [
            DelegationState::DelegationRequested { validator, requested_at: 42 },
            DelegationState::RollupOwned { validator },
            DelegationState::UndelegationRequested {
                validator,
                commit_id: [7; 32],
                requested_at: 99,
            },
            DelegationState::BaseLayerOwned,
        ];

        let mut delegation = Delegation::zeroed();
        for state in states {
            delegation.set(state);
            assert_eq!(delegation.state().unwrap(), state);
        }

        // the finalized undelegation is remembered once back on the base layer
        assert_eq!(delegation.last_commit(), Some([7; 32]));
        assert_eq!(delegation.validator, Pubkey::default());
    }

    #[test]
    fn test_set_leaves_round_alone() {
        let mut delegation = Delegation::zeroed();
        delegation.round = 3;

        delegation.set(DelegationState::RollupOwned { validator: Pubkey::new_unique() });
        delegation.set(DelegationState::BaseLayerOwned);
        assert_eq!(delegation.round, 3);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut delegation = Delegation::zeroed();
        delegation.status = 9;
        assert_eq!(delegation.state(), Err(ProgramError::InvalidAccountData));
    }
}
