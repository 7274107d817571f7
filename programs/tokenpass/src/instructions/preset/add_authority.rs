use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PresetAuthorityAdded;
use crate::state::Preset;
use crate::utils::realloc_account;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct AddPresetAuthorityArgs {
    pub new_authority: Pubkey,
}

#[derive(Accounts)]
pub struct AddPresetAuthority<'info> {
    #[account(
        mut,
        seeds = [
            PREFIX,
            PRESET,
            preset.minter_config.mint.as_ref(),
            preset.name.as_bytes()
        ],
        bump = preset.bump,
        has_one = fee_payer @ TokenPassError::InvalidFeePayer,
        constraint = preset.has_authority(&authority.key()) @ TokenPassError::UnAuthorized,
    )]
    pub preset: Account<'info, Preset>,

    #[account(
        mut,
        constraint = fee_payer.key() != authority.key() @ TokenPassError::InvalidFeePayer
    )]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_authority(
    ctx: Context<AddPresetAuthority>,
    args: AddPresetAuthorityArgs,
) -> Result<()> {
    let preset = &mut ctx.accounts.preset;
    let preset_key = preset.key();
    let now = Clock::get()?.unix_timestamp;

    preset.add_authority(args.new_authority)?;

    realloc_account(
        preset.to_account_info(),
        Preset::size(
            &preset.authorities,
            &preset.minter_config.application_config,
            &preset.minter_config.metadata_config,
        ),
        ctx.accounts.fee_payer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;

    preset.validate()?;

    emit!(PresetAuthorityAdded {
        preset: preset_key,
        new_authority: args.new_authority,
        added_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
