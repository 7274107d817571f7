use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PresetAuthorityRemoved;
use crate::state::Preset;
use crate::utils::realloc_account;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct RemovePresetAuthorityArgs {
    pub removed_authority: Pubkey,
}

#[derive(Accounts)]
pub struct RemovePresetAuthority<'info> {
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

pub fn remove_authority(
    ctx: Context<RemovePresetAuthority>,
    args: RemovePresetAuthorityArgs,
) -> Result<()> {
    let preset = &mut ctx.accounts.preset;
    let preset_key = preset.key();
    let now = Clock::get()?.unix_timestamp;

    preset.remove_authority(&args.removed_authority)?;

    // Shrinks the ledger and refunds the freed rent to the fee payer.
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

    emit!(PresetAuthorityRemoved {
        preset: preset_key,
        removed_authority: args.removed_authority,
        removed_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
