use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{
        create as create_associated_token, get_associated_token_address_with_program_id,
        AssociatedToken, Create as CreateAssociatedToken,
    },
    token_2022::{mint_to, MintTo, Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::MemberMinted;
use crate::state::*;
use crate::utils::{initialize_token_mint, InitializeMintParams, PointerTarget};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct MintMinterArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub metadata: Option<Vec<[String; 2]>>,
}

#[derive(Accounts)]
pub struct MintMinter<'info> {
    #[account(
        seeds = [MANAGER],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,

    #[account(
        mut,
        seeds = [GROUP, group.mint.as_ref()],
        bump,
        constraint = group.key() == minter.group @ TokenPassError::InvalidGroup,
        constraint = group.update_authority == minter.key() @ TokenPassError::InvalidGroup,
    )]
    pub group: Account<'info, Group>,

    #[account(
        init,
        payer = fee_payer,
        space = Member::SIZE,
        seeds = [MEMBER, mint.key().as_ref()],
        bump
    )]
    pub member: Account<'info, Member>,

    #[account(
        seeds = [
            PREFIX,
            MINTER,
            minter.minter_config.mint.as_ref(),
            minter.name.as_bytes()
        ],
        bump = minter.bump,
        has_one = fee_payer @ TokenPassError::UnAuthorized,
        constraint = minter.has_authority(&authority.key()) @ TokenPassError::UnAuthorized,
    )]
    pub minter: Account<'info, Minter>,

    #[account(mut)]
    pub mint: Signer<'info>,

    pub recipient: SystemAccount<'info>,

    /// CHECK: Verified against the derived associated token address in the handler
    #[account(mut)]
    pub recipient_token_account: UncheckedAccount<'info>,

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

pub fn mint(ctx: Context<MintMinter>, args: MintMinterArgs) -> Result<()> {
    let minter = &ctx.accounts.minter;
    let member = &mut ctx.accounts.member;

    let minter_key = minter.key();
    let group_key = ctx.accounts.group.key();
    let member_key = member.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    minter
        .minter_config
        .application_config
        .assert_ungated()?;

    let index = ctx.accounts.group.record_mint()?;
    member.set_inner(Member {
        bump: ctx.bumps.member,
        group: group_key,
        mint: mint_key,
        index,
    });

    let metadata_config = MetadataConfig {
        name: args.name,
        symbol: args.symbol,
        uri: args.uri,
        metadata: args.metadata,
    };
    metadata_config.validate()?;

    let signer_seeds: &[&[&[u8]]] = &[&[
        PREFIX,
        MINTER,
        minter.minter_config.mint.as_ref(),
        minter.name.as_bytes(),
        &[minter.bump],
    ]];

    initialize_token_mint(InitializeMintParams {
        payer: ctx.accounts.fee_payer.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: minter.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        pointer: PointerTarget::Member(member_key),
        name: metadata_config.name.clone(),
        symbol: metadata_config.symbol.clone(),
        uri: metadata_config.uri.clone(),
        additional_metadata: metadata_config.additional_metadata(),
        interest_config: minter.minter_config.interest_config,
        transfer_fee_config: minter.minter_config.transfer_fee_config,
        signer_seeds,
    })?;

    let expected_recipient_token_account = get_associated_token_address_with_program_id(
        &ctx.accounts.recipient.key(),
        &mint_key,
        &ctx.accounts.token_program.key(),
    );
    require_keys_eq!(
        expected_recipient_token_account,
        ctx.accounts.recipient_token_account.key(),
        TokenPassError::InvalidAuthorityTokenAccount
    );

    create_associated_token(CpiContext::new(
        ctx.accounts.associated_token_program.to_account_info(),
        CreateAssociatedToken {
            payer: ctx.accounts.fee_payer.to_account_info(),
            associated_token: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.recipient.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
    ))?;

    mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.recipient_token_account.to_account_info(),
                authority: minter.to_account_info(),
            },
            signer_seeds,
        ),
        1,
    )?;

    emit!(MemberMinted {
        minter: minter_key,
        group: group_key,
        member: member_key,
        mint: mint_key,
        recipient: ctx.accounts.recipient.key(),
        group_size: index,
        timestamp: now,
    });

    Ok(())
}
