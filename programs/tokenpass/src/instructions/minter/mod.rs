pub mod add_authority;
pub mod create;
pub mod create_with_identity;
pub mod mint;
pub mod mint_with_identity;
pub mod remove;
pub mod remove_authority;
pub mod update_member;
