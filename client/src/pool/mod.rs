mod initialize;
mod fund;

pub use initialize::*;
pub use fund::*;
