mod account;
mod rpc;
mod io;
mod retry;
mod ata;

pub use account::*;
pub use rpc::*;
pub use io::*;
pub use retry::*;
pub use ata::*;
