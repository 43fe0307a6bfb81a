pub mod utils;
pub mod pool;
pub mod mine;
pub mod delegation;

pub use utils::*;
pub use pool::*;
pub use mine::*;
pub use delegation::*;
