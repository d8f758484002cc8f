pub mod common;
pub mod pagination;
pub mod spin_wheel;
pub mod wallet;

pub use common::*;
pub use pagination::*;
pub use spin_wheel::*;
pub use wallet::*;
