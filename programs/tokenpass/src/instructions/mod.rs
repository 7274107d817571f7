pub mod activity;
pub mod minter;
pub mod payment;
pub mod preset;
