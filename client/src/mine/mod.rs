mod register;
mod solve;
mod mine;
mod claim;
mod stake;

pub use register::*;
pub use solve::*;
pub use mine::*;
pub use claim::*;
pub use stake::*;
