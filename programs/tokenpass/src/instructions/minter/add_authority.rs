use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::AuthorityAdded;
use crate::state::Minter;
use crate::utils::realloc_account;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct AddAuthorityArgs {
    pub new_authority: Pubkey,
}

#[derive(Accounts)]
pub struct AddAuthority<'info> {
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
        constraint = fee_payer.key() != authority.key() @ TokenPassError::InvalidFeePayer
    )]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_authority(ctx: Context<AddAuthority>, args: AddAuthorityArgs) -> Result<()> {
    let minter = &mut ctx.accounts.minter;
    let minter_key = minter.key();
    let now = Clock::get()?.unix_timestamp;

    minter.add_authority(args.new_authority)?;

    realloc_account(
        minter.to_account_info(),
        Minter::size(
            &minter.authorities,
            &minter.minter_config.application_config,
            &minter.minter_config.metadata_config,
        ),
        ctx.accounts.fee_payer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;

    minter.validate()?;

    emit!(AuthorityAdded {
        minter: minter_key,
        new_authority: args.new_authority,
        added_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
