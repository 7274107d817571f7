use anchor_lang::prelude::*;

#[event]
pub struct MinterCreated {
    pub minter: Pubkey,
    pub group: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub authority: Pubkey,
    pub paid: bool,
    pub timestamp: i64,
}

#[event]
pub struct MinterRemoved {
    pub minter: Pubkey,
    pub mint: Pubkey,
    pub removed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct MemberMinted {
    pub minter: Pubkey,
    pub group: Pubkey,
    pub member: Pubkey,
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub group_size: u32,
    pub timestamp: i64,
}

#[event]
pub struct MemberMetadataUpdated {
    pub minter: Pubkey,
    pub mint: Pubkey,
    pub field: String,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityAdded {
    pub minter: Pubkey,
    pub new_authority: Pubkey,
    pub added_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityRemoved {
    pub minter: Pubkey,
    pub removed_authority: Pubkey,
    pub removed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PresetCreated {
    pub preset: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PresetAuthorityAdded {
    pub preset: Pubkey,
    pub new_authority: Pubkey,
    pub added_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PresetAuthorityRemoved {
    pub preset: Pubkey,
    pub removed_authority: Pubkey,
    pub removed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PresetMinted {
    pub preset: Pubkey,
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PresetRemoved {
    pub preset: Pubkey,
    pub mint: Pubkey,
    pub removed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PaymentPrepared {
    pub receipt: Pubkey,
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub payment_mint: Pubkey,
    pub amount: u64,
    pub expires_at: i64,
    pub timestamp: i64,
}

#[event]
pub struct ActivityCreated {
    pub activity: Pubkey,
    pub minter: Pubkey,
    pub mint: Pubkey,
    pub label: String,
    pub timestamp: i64,
}

#[event]
pub struct ActivityEntryAppended {
    pub activity: Pubkey,
    pub appended_by: Pubkey,
    pub entry_count: u32,
    pub timestamp: i64,
}
