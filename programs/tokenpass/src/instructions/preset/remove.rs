use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{close_account, CloseAccount, Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
    token_interface::Mint,
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PresetRemoved;
use crate::state::Preset;

#[derive(Accounts)]
pub struct RemovePreset<'info> {
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
        constraint = mint.key() == preset.minter_config.mint @ TokenPassError::InvalidMint,
        constraint = mint.supply == 0 @ TokenPassError::CannotRemoveNonZeroSupplyPreset,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    #[account(
        constraint = token_program.key() == TOKEN_EXTENSIONS_PROGRAM_ID @ TokenPassError::InvalidTokenProgram
    )]
    pub token_program: Program<'info, Token2022>,
}

pub fn remove(ctx: Context<RemovePreset>) -> Result<()> {
    let preset = &ctx.accounts.preset;
    let preset_key = preset.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    // The fee payer holds the close authority on the recorded mint.
    close_account(CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.mint.to_account_info(),
            destination: ctx.accounts.fee_payer.to_account_info(),
            authority: ctx.accounts.fee_payer.to_account_info(),
        },
    ))?;

    preset.close(ctx.accounts.fee_payer.to_account_info())?;

    emit!(PresetRemoved {
        preset: preset_key,
        mint: mint_key,
        removed_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
