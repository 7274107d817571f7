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
use crate::events::MinterCreated;
use crate::state::*;
use crate::utils::{initialize_token_mint, InitializeMintParams, PointerTarget};

use super::create::CreateMinterArgs;

#[derive(Accounts)]
#[instruction(args: CreateMinterArgs)]
pub struct CreateMinterWithIdentity<'info> {
    #[account(
        init_if_needed,
        payer = fee_payer,
        space = Manager::SIZE,
        seeds = [MANAGER],
        bump
    )]
    pub manager: Account<'info, Manager>,

    #[account(
        init,
        payer = fee_payer,
        space = Group::SIZE,
        seeds = [GROUP, mint.key().as_ref()],
        bump
    )]
    pub group: Account<'info, Group>,

    #[account(
        init,
        payer = fee_payer,
        space = Minter::size(&[authority.key()], &args.application_config, &args.metadata_config),
        seeds = [
            PREFIX,
            MINTER,
            mint.key().as_ref(),
            args.name.as_bytes()
        ],
        bump
    )]
    pub minter: Account<'info, Minter>,

    /// Proof the operator paid the platform wallet fronting the rent;
    /// consulted, never closed.
    #[account(
        seeds = [
            PREFIX,
            RECEIPT,
            receipt.sender.as_ref(),
            receipt.receiver.as_ref(),
            receipt.payment_mint.as_ref()
        ],
        bump = receipt.bump,
        constraint = receipt.kind == ReceiptKind::Community @ TokenPassError::InvalidReceipt,
        constraint = receipt.sender == authority.key() @ TokenPassError::InvalidReceipt,
        constraint = receipt.receiver == fee_payer.key() @ TokenPassError::InvalidReceipt,
    )]
    pub receipt: Account<'info, Receipt>,

    /// CHECK: Verified against the derived associated token address in the handler
    #[account(mut)]
    pub minter_token_account: UncheckedAccount<'info>,

    #[account(mut)]
    pub mint: Signer<'info>,

    #[account(
        mut,
        constraint = fee_payer.key() != authority.key() @ TokenPassError::InvalidFeePayer
    )]
    pub fee_payer: Signer<'info>,
    pub authority: Signer<'info>,

    #[account(
        constraint = token_program.key() == TOKEN_EXTENSIONS_PROGRAM_ID @ TokenPassError::InvalidTokenProgram
    )]
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn create_with_identity(
    ctx: Context<CreateMinterWithIdentity>,
    args: CreateMinterArgs,
) -> Result<()> {
    let minter = &mut ctx.accounts.minter;
    let group = &mut ctx.accounts.group;

    let minter_key = minter.key();
    let group_key = group.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.manager.bump = ctx.bumps.manager;

    let CreateMinterArgs {
        name,
        description,
        image_url,
        max_size,
        payment_config,
        application_config,
        metadata_config,
        interest_config,
        transfer_fee_config,
    } = args;

    // The operator paid up front, so the minter's own payment terms go live
    // immediately with an on-chain expiry.
    let payment_config = {
        let config = payment_config.into_config(0);
        let expires_at = config.expiry_from(now)?;
        PaymentConfig {
            expires_at,
            ..config
        }
    };
    ctx.accounts.receipt.assert_covers(&payment_config, now)?;

    let application_config = ApplicationConfig {
        identities: application_config.identities,
        payment_config: PaymentConfig {
            expires_at: 0,
            ..application_config.payment_config
        },
    };

    minter.set_inner(Minter {
        bump: ctx.bumps.minter,
        group: group_key,
        name: name.clone(),
        description,
        image_url,
        fee_payer: ctx.accounts.fee_payer.key(),
        authorities: vec![ctx.accounts.authority.key()],
        payment_config,
        minter_config: MinterConfig {
            mint: mint_key,
            application_config,
            metadata_config: metadata_config.clone(),
            interest_config,
            transfer_fee_config,
        },
    });
    minter.validate()?;

    group.set_inner(Group {
        update_authority: minter_key,
        mint: mint_key,
        size: 0,
        max_size,
    });

    let signer_seeds: &[&[&[u8]]] = &[&[
        PREFIX,
        MINTER,
        mint_key.as_ref(),
        name.as_bytes(),
        &[minter.bump],
    ]];

    initialize_token_mint(InitializeMintParams {
        payer: ctx.accounts.fee_payer.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: minter.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        pointer: PointerTarget::Group(group_key),
        name: metadata_config.name.clone(),
        symbol: metadata_config.symbol.clone(),
        uri: metadata_config.uri.clone(),
        additional_metadata: metadata_config.additional_metadata(),
        interest_config,
        transfer_fee_config,
        signer_seeds,
    })?;

    let expected_minter_token_account = get_associated_token_address_with_program_id(
        &minter_key,
        &mint_key,
        &ctx.accounts.token_program.key(),
    );
    require_keys_eq!(
        expected_minter_token_account,
        ctx.accounts.minter_token_account.key(),
        TokenPassError::InvalidMinterTokenAccount
    );

    create_associated_token(CpiContext::new(
        ctx.accounts.associated_token_program.to_account_info(),
        CreateAssociatedToken {
            payer: ctx.accounts.fee_payer.to_account_info(),
            associated_token: ctx.accounts.minter_token_account.to_account_info(),
            authority: minter.to_account_info(),
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
                to: ctx.accounts.minter_token_account.to_account_info(),
                authority: minter.to_account_info(),
            },
            signer_seeds,
        ),
        1,
    )?;

    emit!(MinterCreated {
        minter: minter_key,
        group: group_key,
        mint: mint_key,
        name,
        authority: ctx.accounts.authority.key(),
        paid: true,
        timestamp: now,
    });

    Ok(())
}
