use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
mod utils;

pub use instructions::activity::append::*;
pub use instructions::activity::create::*;
pub use instructions::minter::add_authority::*;
pub use instructions::minter::create::*;
pub use instructions::minter::create_with_identity::*;
pub use instructions::minter::mint::*;
pub use instructions::minter::mint_with_identity::*;
pub use instructions::minter::remove::*;
pub use instructions::minter::remove_authority::*;
pub use instructions::minter::update_member::*;
pub use instructions::payment::prepare::*;
pub use instructions::preset::add_authority::*;
pub use instructions::preset::create::*;
pub use instructions::preset::mint::*;
pub use instructions::preset::remove::*;
pub use instructions::preset::remove_authority::*;

declare_id!("GMLosUHMoHkteQWpzvhuw7W6azSiEoBwzK3ZhmSd5S31");

#[program]
pub mod tokenpass {
    use super::*;

    pub fn create_minter(
        ctx: Context<CreateMinter>,
        args: instructions::minter::create::CreateMinterArgs,
    ) -> Result<()> {
        instructions::minter::create::create(ctx, args)
    }

    pub fn create_minter_with_identity(
        ctx: Context<CreateMinterWithIdentity>,
        args: instructions::minter::create::CreateMinterArgs,
    ) -> Result<()> {
        instructions::minter::create_with_identity::create_with_identity(ctx, args)
    }

    pub fn mint_minter(
        ctx: Context<MintMinter>,
        args: instructions::minter::mint::MintMinterArgs,
    ) -> Result<()> {
        instructions::minter::mint::mint(ctx, args)
    }

    pub fn mint_minter_with_identity(
        ctx: Context<MintMinterWithIdentity>,
        args: instructions::minter::mint_with_identity::MintMinterWithIdentityArgs,
    ) -> Result<()> {
        instructions::minter::mint_with_identity::mint_with_identity(ctx, args)
    }

    pub fn add_authority(
        ctx: Context<AddAuthority>,
        args: instructions::minter::add_authority::AddAuthorityArgs,
    ) -> Result<()> {
        instructions::minter::add_authority::add_authority(ctx, args)
    }

    pub fn remove_authority(
        ctx: Context<RemoveAuthority>,
        args: instructions::minter::remove_authority::RemoveAuthorityArgs,
    ) -> Result<()> {
        instructions::minter::remove_authority::remove_authority(ctx, args)
    }

    pub fn remove_minter(
        ctx: Context<RemoveMinter>,
    ) -> Result<()> {
        instructions::minter::remove::remove(ctx)
    }

    pub fn update_member_metadata(
        ctx: Context<UpdateMemberMetadata>,
        args: instructions::minter::update_member::UpdateMemberMetadataArgs,
    ) -> Result<()> {
        instructions::minter::update_member::update_member(ctx, args)
    }

    pub fn create_preset(
        ctx: Context<CreatePreset>,
        args: instructions::preset::create::CreatePresetArgs,
    ) -> Result<()> {
        instructions::preset::create::create(ctx, args)
    }

    pub fn add_preset_authority(
        ctx: Context<AddPresetAuthority>,
        args: instructions::preset::add_authority::AddPresetAuthorityArgs,
    ) -> Result<()> {
        instructions::preset::add_authority::add_authority(ctx, args)
    }

    pub fn remove_preset_authority(
        ctx: Context<RemovePresetAuthority>,
        args: instructions::preset::remove_authority::RemovePresetAuthorityArgs,
    ) -> Result<()> {
        instructions::preset::remove_authority::remove_authority(ctx, args)
    }

    pub fn mint_preset(ctx: Context<MintPreset>) -> Result<()> {
        instructions::preset::mint::mint(ctx)
    }

    pub fn remove_preset(ctx: Context<RemovePreset>) -> Result<()> {
        instructions::preset::remove::remove(ctx)
    }

    pub fn prepare_for_payment(
        ctx: Context<PrepareForPayment>,
        args: instructions::payment::prepare::PrepareForPaymentArgs,
    ) -> Result<()> {
        instructions::payment::prepare::prepare(ctx, args)
    }

    pub fn create_activity(
        ctx: Context<CreateActivity>,
        args: instructions::activity::create::CreateActivityArgs,
    ) -> Result<()> {
        instructions::activity::create::create(ctx, args)
    }

    pub fn append_activity_entry(
        ctx: Context<AppendActivityEntry>,
        args: instructions::activity::append::AppendActivityEntryArgs,
    ) -> Result<()> {
        instructions::activity::append::append(ctx, args)
    }
}
