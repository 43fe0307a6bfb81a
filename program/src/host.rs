use mor_api::prelude::*;
use steel::*;

/// Token custody of a pool. Everything the protocol moves in or out of a vault goes through
/// here, so the core never touches token program accounts directly.
pub trait TokenVault {
    /// Address of the vault token account.
    fn address(&self) -> Pubkey;

    fn balance_of(&self, account: &Pubkey) -> Result<u64, ProgramError>;

    /// Move `amount` from `from` into the vault.
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> ProgramResult;

    /// Move `amount` out of the vault to `to`.
    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> ProgramResult;
}

pub trait LedgerClock {
    fn height(&self) -> u64;
    fn timestamp(&self) -> i64;
}

pub struct SysvarClock(Clock);

impl SysvarClock {
    pub fn get() -> Result<Self, ProgramError> {
        Ok(Self(Clock::get()?))
    }
}

impl LedgerClock for SysvarClock {
    fn height(&self) -> u64 {
        self.0.slot
    }

    fn timestamp(&self) -> i64 {
        self.0.unix_timestamp
    }
}

/// A pool vault backed by the SPL token program. The vault is the associated token account of
/// the pool PDA, so outbound transfers are signed with the pool seeds. Transfers only ever
/// happen with the one `counterparty` token account supplied to the instruction.
pub struct SplVault<'a, 'info> {
    pub pool_info: &'a AccountInfo<'info>,
    pub vault_info: &'a AccountInfo<'info>,
    pub counterparty_info: &'a AccountInfo<'info>,
    pub authority_info: &'a AccountInfo<'info>,
    pub token_program_info: &'a AccountInfo<'info>,
    pub maker: Pubkey,
    pub mint: Pubkey,
}

impl SplVault<'_, '_> {
    fn check_counterparty(&self, account: &Pubkey) -> ProgramResult {
        check_condition(
            self.counterparty_info.key.eq(account),
            ProgramError::InvalidArgument,
        )
    }
}

impl TokenVault for SplVault<'_, '_> {
    fn address(&self) -> Pubkey {
        *self.vault_info.key
    }

    fn balance_of(&self, account: &Pubkey) -> Result<u64, ProgramError> {
        let info = if self.vault_info.key.eq(account) {
            self.vault_info
        } else {
            self.check_counterparty(account)?;
            self.counterparty_info
        };

        Ok(info.as_token_account()?.amount())
    }

    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> ProgramResult {
        self.check_counterparty(from)?;

        transfer(
            self.authority_info,
            self.counterparty_info,
            self.vault_info,
            self.token_program_info,
            amount,
        )
    }

    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> ProgramResult {
        self.check_counterparty(to)?;

        transfer_signed(
            self.pool_info,
            self.vault_info,
            self.counterparty_info,
            self.token_program_info,
            amount,
            &[MINING_POOL, self.maker.as_ref(), self.mint.as_ref()],
        )
    }
}

/// Work out which layer an instruction executes in from its optional co-signer. A co-signer
/// must be the validator named in the record's delegation tag, and turns the instruction into
/// a rollup instruction. Without one it runs on the base layer.
pub fn resolve_layer<R: Delegated>(record: &R, cosigner: Option<&Pubkey>) -> Result<Layer, ProgramError> {
    let Some(cosigner) = cosigner else {
        return Ok(Layer::Base);
    };

    let validator = match record.delegation().state()? {
        DelegationState::BaseLayerOwned => None,
        DelegationState::DelegationRequested { validator, .. }
        | DelegationState::RollupOwned { validator }
        | DelegationState::UndelegationRequested { validator, .. } => Some(validator),
    };

    match validator {
        Some(validator) if validator.eq(cosigner) => Ok(Layer::Rollup(validator)),
        _ => Err(MorError::WrongOwner.into()),
    }
}

/// The optional trailing co-signer of an instruction.
pub fn cosigner<'a, 'info>(
    info: Option<&'a AccountInfo<'info>>,
) -> Result<Option<&'a Pubkey>, ProgramError> {
    match info {
        Some(info) => {
            info.is_signer()?;
            Ok(Some(info.key))
        }
        None => Ok(None),
    }
}
