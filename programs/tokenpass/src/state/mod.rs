pub mod activity;
pub mod authority;
pub mod config;
pub mod group;
pub mod minter;
pub mod preset;
pub mod receipt;

pub use activity::*;
pub use authority::*;
pub use config::*;
pub use group::*;
pub use minter::*;
pub use preset::*;
pub use receipt::*;
