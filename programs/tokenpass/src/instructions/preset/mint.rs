use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_2022::{mint_to, MintTo, Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
    token_interface::{Mint, TokenAccount},
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PresetMinted;
use crate::state::Preset;

#[derive(Accounts)]
pub struct MintPreset<'info> {
    #[account(
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
        mint::authority = fee_payer,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = fee_payer,
        associated_token::mint = mint,
        associated_token::authority = authority,
        associated_token::token_program = token_program,
    )]
    pub authority_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    #[account(
        constraint = token_program.key() == TOKEN_EXTENSIONS_PROGRAM_ID @ TokenPassError::InvalidTokenProgram
    )]
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn mint(ctx: Context<MintPreset>) -> Result<()> {
    let preset_key = ctx.accounts.preset.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    let amount = 10u64
        .checked_pow(u32::from(ctx.accounts.mint.decimals))
        .ok_or(TokenPassError::Overflow)?;

    mint_to(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.authority_token_account.to_account_info(),
                authority: ctx.accounts.fee_payer.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(PresetMinted {
        preset: preset_key,
        mint: mint_key,
        recipient: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
