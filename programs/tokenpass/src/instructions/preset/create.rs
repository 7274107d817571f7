use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{Token2022, ID as TOKEN_EXTENSIONS_PROGRAM_ID},
    token_interface::Mint,
};

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::events::PresetCreated;
use crate::state::*;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreatePresetArgs {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub minter_config: MinterConfig,
}

#[derive(Accounts)]
#[instruction(args: CreatePresetArgs)]
pub struct CreatePreset<'info> {
    #[account(
        init,
        payer = fee_payer,
        space = Preset::size(
            &[authority.key()],
            &args.minter_config.application_config,
            &args.minter_config.metadata_config
        ),
        seeds = [
            PREFIX,
            PRESET,
            mint.key().as_ref(),
            args.name.as_bytes()
        ],
        bump
    )]
    pub preset: Account<'info, Preset>,

    /// Existing mint controlled by the fee payer; the preset only records it.
    #[account(
        constraint = mint.key() == args.minter_config.mint @ TokenPassError::InvalidMint,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

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
    pub system_program: Program<'info, System>,
}

pub fn create(ctx: Context<CreatePreset>, args: CreatePresetArgs) -> Result<()> {
    let preset = &mut ctx.accounts.preset;
    let preset_key = preset.key();
    let mint_key = ctx.accounts.mint.key();
    let now = Clock::get()?.unix_timestamp;

    let CreatePresetArgs {
        name,
        description,
        image_url,
        minter_config,
    } = args;

    let minter_config = MinterConfig {
        application_config: ApplicationConfig {
            identities: minter_config.application_config.identities,
            payment_config: PaymentConfig {
                expires_at: 0,
                ..minter_config.application_config.payment_config
            },
        },
        ..minter_config
    };

    preset.set_inner(Preset {
        bump: ctx.bumps.preset,
        name: name.clone(),
        description,
        image_url,
        fee_payer: ctx.accounts.fee_payer.key(),
        authorities: vec![ctx.accounts.authority.key()],
        minter_config,
    });
    preset.validate()?;

    emit!(PresetCreated {
        preset: preset_key,
        mint: mint_key,
        name,
        authority: ctx.accounts.authority.key(),
        timestamp: now,
    });

    Ok(())
}
