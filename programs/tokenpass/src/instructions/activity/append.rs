use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::ActivityEntryAppended;
use crate::state::{Activity, Entry, Minter};
use crate::utils::realloc_account;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct AppendActivityEntryArgs {
    pub timestamp: Option<i64>,
    pub message: String,
    pub url: Option<String>,
    pub points: Option<u64>,
}

#[derive(Accounts)]
pub struct AppendActivityEntry<'info> {
    #[account(
        mut,
        seeds = [
            PREFIX,
            ACTIVITY,
            activity.mint.as_ref(),
            activity.label.as_bytes()
        ],
        bump = activity.bump,
        has_one = fee_payer @ TokenPassError::InvalidFeePayer,
        has_one = minter @ TokenPassError::UnAuthorized,
    )]
    pub activity: Account<'info, Activity>,

    pub minter: Account<'info, Minter>,

    #[account(
        constraint = (authority.key() == activity.fee_payer
            || minter.has_authority(&authority.key())) @ TokenPassError::UnAuthorized,
    )]
    pub authority: Signer<'info>,

    #[account(mut)]
    pub fee_payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn append(ctx: Context<AppendActivityEntry>, args: AppendActivityEntryArgs) -> Result<()> {
    let activity = &mut ctx.accounts.activity;
    let activity_key = activity.key();
    let now = Clock::get()?.unix_timestamp;

    let entry = Entry {
        timestamp: args.timestamp.unwrap_or(now),
        message: args.message,
        url: args.url,
        points: args.points.unwrap_or(0),
    };

    let entry_count = activity.append(entry)?;

    realloc_account(
        activity.to_account_info(),
        Activity::size(&activity.entries),
        ctx.accounts.fee_payer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(ActivityEntryAppended {
        activity: activity_key,
        appended_by: ctx.accounts.authority.key(),
        entry_count,
        timestamp: now,
    });

    Ok(())
}
