use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
    token_interface::Mint,
};
use anchor_lang::solana_program::program::invoke_signed;
use spl_token_metadata_interface::instruction as metadata_instruction;
use spl_token_metadata_interface::state::Field;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::MemberMetadataUpdated;
use crate::state::{Group, Member, Minter};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateMemberMetadataArgs {
    pub field: String,
    pub new_value: String,
}

#[derive(Accounts)]
pub struct UpdateMemberMetadata<'info> {
    #[account(
        seeds = [
            PREFIX,
            MINTER,
            minter.minter_config.mint.as_ref(),
            minter.name.as_bytes()
        ],
        bump = minter.bump,
        constraint = minter.has_authority(&authority.key()) @ TokenPassError::UnAuthorized,
    )]
    pub minter: Account<'info, Minter>,

    #[account(
        constraint = group.key() == minter.group @ TokenPassError::InvalidGroup,
        constraint = group.update_authority == minter.key() @ TokenPassError::InvalidGroup,
    )]
    pub group: Account<'info, Group>,

    #[account(
        constraint = member.group == group.key() @ TokenPassError::InvalidMember,
        constraint = member.mint == mint.key() @ TokenPassError::InvalidMember,
    )]
    pub member: Account<'info, Member>,

    #[account(mut)]
    pub mint: InterfaceAccount<'info, Mint>,

    pub authority: Signer<'info>,

    #[account(
        constraint = token_program.key() == TOKEN_EXTENSIONS_PROGRAM_ID @ TokenPassError::InvalidTokenProgram
    )]
    pub token_program: Program<'info, Token2022>,
}

pub fn update_member(
    ctx: Context<UpdateMemberMetadata>,
    args: UpdateMemberMetadataArgs,
) -> Result<()> {
    let minter = &ctx.accounts.minter;
    let minter_key = minter.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    require!(
        !args.field.is_empty() && args.field.len() <= MAX_METADATA_PAIR_LEN,
        TokenPassError::InvalidMetadata
    );
    require!(
        args.new_value.len() <= MAX_METADATA_PAIR_LEN,
        TokenPassError::InvalidMetadata
    );

    let signer_seeds: &[&[&[u8]]] = &[&[
        PREFIX,
        MINTER,
        minter.minter_config.mint.as_ref(),
        minter.name.as_bytes(),
        &[minter.bump],
    ]];

    let update_ix = metadata_instruction::update_field(
        &ctx.accounts.token_program.key(),
        &mint_key,
        &minter_key,
        Field::Key(args.field.clone()),
        args.new_value,
    );
    invoke_signed(
        &update_ix,
        &[
            ctx.accounts.mint.to_account_info(),
            minter.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
        ],
        signer_seeds,
    )?;

    emit!(MemberMetadataUpdated {
        minter: minter_key,
        mint: mint_key,
        field: args.field,
        timestamp: now,
    });

    Ok(())
}
