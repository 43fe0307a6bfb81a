pub mod initialize;
pub mod fund;

pub use initialize::*;
pub use fund::*;
