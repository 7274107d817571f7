use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PaymentPrepared;
use crate::state::{Receipt, ReceiptKind};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct PrepareForPaymentArgs {
    pub amount: u64,
    pub kind: ReceiptKind,
    pub days: u8,
    // Free tiers still leave a receipt; the transfer itself is skipped
    // unless explicitly requested.
    pub transfer_zero_amount: bool,
}

#[derive(Accounts)]
pub struct PrepareForPayment<'info> {
    #[account(
        init_if_needed,
        payer = fee_payer,
        space = Receipt::SIZE,
        seeds = [
            PREFIX,
            RECEIPT,
            sender.key().as_ref(),
            receiver.key().as_ref(),
            payment_mint.key().as_ref()
        ],
        bump
    )]
    pub receipt: Account<'info, Receipt>,

    pub sender: Signer<'info>,

    #[account(
        mut,
        token::mint = payment_mint,
        token::authority = sender,
        token::token_program = token_program,
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    pub receiver: SystemAccount<'info>,

    #[account(
        init_if_needed,
        payer = fee_payer,
        associated_token::mint = payment_mint,
        associated_token::authority = receiver,
        associated_token::token_program = token_program,
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    pub payment_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub fee_payer: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn prepare(ctx: Context<PrepareForPayment>, args: PrepareForPaymentArgs) -> Result<()> {
    let receipt = &mut ctx.accounts.receipt;
    let receipt_key = receipt.key();
    let now = Clock::get()?.unix_timestamp;

    let expires_at = now
        .checked_add(i64::from(args.days) * SECONDS_PER_DAY)
        .ok_or(TokenPassError::Overflow)?;

    if args.amount > 0 || args.transfer_zero_amount {
        transfer_checked(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.sender_token_account.to_account_info(),
                    mint: ctx.accounts.payment_mint.to_account_info(),
                    to: ctx.accounts.receiver_token_account.to_account_info(),
                    authority: ctx.accounts.sender.to_account_info(),
                },
            ),
            args.amount,
            ctx.accounts.payment_mint.decimals,
        )?;
    }

    // Repaying before expiry simply restarts the window.
    receipt.set_inner(Receipt {
        bump: ctx.bumps.receipt,
        kind: args.kind,
        created_at: now,
        expires_at,
        amount: args.amount,
        sender: ctx.accounts.sender.key(),
        receiver: ctx.accounts.receiver.key(),
        sender_token_account: ctx.accounts.sender_token_account.key(),
        receiver_token_account: ctx.accounts.receiver_token_account.key(),
        payment_mint: ctx.accounts.payment_mint.key(),
    });

    emit!(PaymentPrepared {
        receipt: receipt_key,
        sender: ctx.accounts.sender.key(),
        receiver: ctx.accounts.receiver.key(),
        payment_mint: ctx.accounts.payment_mint.key(),
        amount: args.amount,
        expires_at,
        timestamp: now,
    });

    Ok(())
}
