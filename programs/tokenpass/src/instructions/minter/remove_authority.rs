use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::AuthorityRemoved;
use crate::state::Minter;
use crate::utils::realloc_account;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct RemoveAuthorityArgs {
    pub removed_authority: Pubkey,
}

#[derive(Accounts)]
pub struct RemoveAuthority<'info> {
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

pub fn remove_authority(ctx: Context<RemoveAuthority>, args: RemoveAuthorityArgs) -> Result<()> {
    let minter = &mut ctx.accounts.minter;
    let minter_key = minter.key();
    let now = Clock::get()?.unix_timestamp;

    minter.remove_authority(&args.removed_authority)?;

    // Shrinks the ledger and refunds the freed rent to the fee payer.
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

    emit!(AuthorityRemoved {
        minter: minter_key,
        removed_authority: args.removed_authority,
        removed_by: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
