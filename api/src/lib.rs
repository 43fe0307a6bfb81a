pub mod consts;
pub mod error;
pub mod instruction;
pub mod sdk;
pub mod state;
pub mod pda;
pub mod utils;
pub mod challenge;
pub mod curve;
pub mod loaders;
pub mod event;
pub mod types;
mod macros;

pub use crate::consts::*;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::instruction::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
    pub use crate::pda::*;
    pub use crate::utils::*;
    pub use crate::challenge::*;
    pub use crate::curve::*;
    pub use crate::event::*;
    pub use crate::loaders::*;
    pub use crate::types::*;
}

use steel::*;

declare_id!("8BwLz8SvdFeT7qqd1nJFQMypTtuuWEpEEpVz6x6DA4Hm");
