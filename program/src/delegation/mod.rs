pub mod controller;
pub mod delegate;
pub mod undelegate;

pub use controller::*;
pub use delegate::*;
pub use undelegate::*;

use mor_api::prelude::*;
use steel::*;

/// Run `$body` with `$record` bound to the typed record behind `$info`, whichever delegatable
/// account type it is.
macro_rules! with_record {
    ($info:expr, |$record:ident| $body:expr) => {{
        match crate::delegation::record_type($info)? {
            AccountType::Miner => {
                let $record = $info.as_account_mut::<Miner>(&mor_api::ID)?;
                $body
            }
            AccountType::MiningPoolRewardState => {
                let $record = $info.as_account_mut::<MiningPoolRewardState>(&mor_api::ID)?;
                $body
            }
            _ => Err(ProgramError::InvalidAccountData),
        }
    }};
}

pub(crate) use with_record;

pub(crate) fn record_type(info: &AccountInfo<'_>) -> Result<AccountType, ProgramError> {
    info.has_owner(&mor_api::ID)?;

    let data = info.try_borrow_data()?;
    let discriminator = *data.first().ok_or(ProgramError::InvalidAccountData)?;

    AccountType::try_from(discriminator).map_err(|_| ProgramError::InvalidAccountData)
}
