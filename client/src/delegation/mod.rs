mod delegate;
mod undelegate;
mod commit;

pub use delegate::*;
pub use undelegate::*;
pub use commit::*;
