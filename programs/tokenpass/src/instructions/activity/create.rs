use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::ActivityCreated;
use crate::state::{Activity, Group, Member, Minter};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateActivityArgs {
    pub label: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

#[derive(Accounts)]
#[instruction(args: CreateActivityArgs)]
pub struct CreateActivity<'info> {
    #[account(
        init,
        payer = fee_payer,
        space = Activity::size(&[]),
        seeds = [
            PREFIX,
            ACTIVITY,
            mint.key().as_ref(),
            args.label.as_bytes()
        ],
        bump
    )]
    pub activity: Account<'info, Activity>,

    #[account(
        seeds = [
            PREFIX,
            MINTER,
            minter.minter_config.mint.as_ref(),
            minter.name.as_bytes()
        ],
        bump = minter.bump,
        has_one = fee_payer @ TokenPassError::InvalidFeePayer,
        has_one = group @ TokenPassError::InvalidGroup,
        constraint = minter.has_authority(&authority.key()) @ TokenPassError::UnAuthorized,
    )]
    pub minter: Account<'info, Minter>,

    #[account(
        constraint = group.update_authority == minter.key() @ TokenPassError::UnAuthorized,
    )]
    pub group: Account<'info, Group>,

    #[account(
        constraint = member.group == group.key() @ TokenPassError::InvalidMember,
        constraint = member.mint == mint.key() @ TokenPassError::InvalidMember,
    )]
    pub member: Account<'info, Member>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create(ctx: Context<CreateActivity>, args: CreateActivityArgs) -> Result<()> {
    let activity = &mut ctx.accounts.activity;
    let activity_key = activity.key();
    let now = Clock::get()?.unix_timestamp;

    activity.set_inner(Activity {
        bump: ctx.bumps.activity,
        label: args.label.clone(),
        start_date: args.start_date.unwrap_or(now),
        end_date: args.end_date.unwrap_or(0),
        fee_payer: ctx.accounts.fee_payer.key(),
        minter: ctx.accounts.minter.key(),
        member: ctx.accounts.member.key(),
        mint: ctx.accounts.mint.key(),
        entries: vec![],
    });
    activity.validate()?;

    emit!(ActivityCreated {
        activity: activity_key,
        minter: ctx.accounts.minter.key(),
        mint: ctx.accounts.mint.key(),
        label: args.label,
        timestamp: now,
    });

    Ok(())
}
