pub mod add_authority;
pub mod create;
pub mod mint;
pub mod remove;
pub mod remove_authority;
