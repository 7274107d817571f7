use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{close_account, CloseAccount, Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
    token_interface::Mint,
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::MinterRemoved;
use crate::state::{Group, Minter};

#[derive(Accounts)]
pub struct RemoveMinter<'info> {
    #[account(
        mut,
        seeds = [
            PREFIX,
            MINTER,
            minter.minter_config.mint.as_ref(),
            minter.name.as_bytes()
        ],
        bump = minter.bump,
        has_one = fee_payer @ TokenPassError::InvalidFeePayer,
        constraint = minter.has_authority(&authority.key()) @ TokenPassError::UnAuthorized,
    )]
    pub minter: Account<'info, Minter>,

    #[account(
        mut,
        close = fee_payer,
        constraint = group.key() == minter.group @ TokenPassError::InvalidGroup,
    )]
    pub group: Account<'info, Group>,

    #[account(
        mut,
        constraint = mint.key() == minter.minter_config.mint @ TokenPassError::InvalidMint,
        constraint = mint.supply == 0 @ TokenPassError::CannotRemoveNonZeroSupplyMinter,
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

pub fn remove(ctx: Context<RemoveMinter>) -> Result<()> {
    let minter = &ctx.accounts.minter;
    let minter_key = minter.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    let signer_seeds: &[&[&[u8]]] = &[&[
        PREFIX,
        MINTER,
        minter.minter_config.mint.as_ref(),
        minter.name.as_bytes(),
        &[minter.bump],
    ]];

    // The mint carries a close authority held by the minter PDA; its rent
    // also flows back to the fee payer.
    close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.mint.to_account_info(),
            destination: ctx.accounts.fee_payer.to_account_info(),
            authority: minter.to_account_info(),
        },
        signer_seeds,
    ))?;

    minter.close(ctx.accounts.fee_payer.to_account_info())?;

    emit!(MinterRemoved {
        minter: minter_key,
        mint: mint_key,
        removed_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
