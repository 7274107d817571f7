use anchor_lang::prelude::*;

#[error_code]
pub enum TokenPassError {
    #[msg("Account not owned by program")]
    InvalidAccountOwner,
    #[msg("Invalid fee payer")]
    InvalidFeePayer,
    #[msg("Account unauthorized to perform this action")]
    UnAuthorized,
    #[msg("Authority already exists")]
    AuthorityAlreadyExists,
    #[msg("Authority does not exist")]
    AuthorityNonExistant,
    #[msg("Cannot remove last remaining authority")]
    CannotRemoveSoloAuthority,
    #[msg("Invalid minter token account")]
    InvalidMinterTokenAccount,
    #[msg("Invalid minter name")]
    InvalidMinterName,
    #[msg("Invalid minter description")]
    InvalidMinterDescription,
    #[msg("Invalid minter image URL")]
    InvalidMinterImageURL,
    #[msg("Group reached max size")]
    MaxSizeReached,
    #[msg("Invalid mint account passed")]
    InvalidMint,
    #[msg("Token extensions program required")]
    InvalidTokenProgram,
    #[msg("Cannot remove minter of non-zero supply")]
    CannotRemoveNonZeroSupplyMinter,
    #[msg("Invalid preset name")]
    InvalidPresetName,
    #[msg("Invalid preset description")]
    InvalidPresetDescription,
    #[msg("Invalid preset image URL")]
    InvalidPresetImageURL,
    #[msg("Invalid preset token account")]
    InvalidPresetTokenAccount,
    #[msg("Cannot remove preset of non-zero supply")]
    CannotRemoveNonZeroSupplyPreset,
    #[msg("Invalid authority token account")]
    InvalidAuthorityTokenAccount,
    #[msg("Invalid group account")]
    InvalidGroup,
    #[msg("Invalid member account")]
    InvalidMember,
    #[msg("Invalid manager account")]
    InvalidManager,
    #[msg("Receipt does not match this payment configuration")]
    InvalidReceipt,
    #[msg("Receipt has expired")]
    ReceiptExpired,
    #[msg("Required identity verification is missing")]
    IdentityVerificationMissing,
    #[msg("Invalid token metadata configuration")]
    InvalidMetadata,
    #[msg("Invalid activity label")]
    InvalidActivityLabel,
    #[msg("Invalid activity entry")]
    InvalidActivityEntry,
    #[msg("Arithmetic overflow")]
    Overflow,
}
