use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::{invoke, invoke_signed};
use anchor_lang::system_program;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{
        group_member_pointer, group_pointer, interest_bearing_mint, metadata_pointer,
        transfer_fee, ExtensionType,
    },
    instruction as token_2022_instruction,
    state::Mint as Token2022Mint,
};
use spl_pod::optional_keys::OptionalNonZeroPubkey;
use spl_token_metadata_interface::instruction as metadata_instruction;
use spl_token_metadata_interface::state::{Field, TokenMetadata};

use crate::constants::{MAX_NAME_LEN, MIN_NAME_LEN};
use crate::errors::TokenPassError;
use crate::id;
use crate::state::{InterestConfig, TransferFeeConfig};

pub fn is_valid_name(name: &str) -> bool {
    name.len() >= MIN_NAME_LEN && name.len() <= MAX_NAME_LEN
}

pub fn is_valid_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() || host.starts_with('.') || host.ends_with('.') {
        return false;
    }

    let host_ok = host == "localhost"
        || host.starts_with("localhost:")
        || (host.contains('.') && !host.contains(".."));

    host_ok && !rest.contains(char::is_whitespace)
}

/// Resizes a program-owned account, reconciling the rent delta with
/// `rent_payer`: growth is funded by an explicit system transfer before the
/// realloc, shrinkage refunds the freed deposit back to the payer.
pub fn realloc_account<'info>(
    account: AccountInfo<'info>,
    new_account_size: usize,
    rent_payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
) -> Result<()> {
    require_keys_eq!(*account.owner, id(), TokenPassError::InvalidAccountOwner);

    let current_account_size = account.data.borrow().len();
    if current_account_size == new_account_size {
        return Ok(());
    }

    let current_lamports = account.lamports();
    let rent_exempt_lamports = Rent::get()?.minimum_balance(new_account_size);

    if new_account_size > current_account_size {
        let lamports_diff = rent_exempt_lamports.saturating_sub(current_lamports);
        if lamports_diff > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program,
                    system_program::Transfer {
                        from: rent_payer.clone(),
                        to: account.clone(),
                    },
                ),
                lamports_diff,
            )?;
        }
        account.realloc(new_account_size, false)?;
    } else {
        account.realloc(new_account_size, false)?;
        let refund = current_lamports.saturating_sub(rent_exempt_lamports);
        if refund > 0 {
            **account.try_borrow_mut_lamports()? -= refund;
            **rent_payer.try_borrow_mut_lamports()? += refund;
        }
    }

    Ok(())
}

/// Whether a freshly created mint points at a group record or at a member
/// record of an existing group.
pub enum PointerTarget {
    Group(Pubkey),
    Member(Pubkey),
}

pub struct InitializeMintParams<'a, 'info> {
    pub payer: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    /// PDA acting as mint, freeze, close and metadata-update authority.
    pub authority: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub pointer: PointerTarget,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub additional_metadata: Vec<(String, String)>,
    pub interest_config: Option<InterestConfig>,
    pub transfer_fee_config: Option<TransferFeeConfig>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

/// Creates and fully configures a Token-2022 mint for the issuance engine:
/// non-transferable, close authority and metadata/group pointers held by the
/// authority PDA, optional interest-bearing and transfer-fee extensions,
/// then on-chain metadata. Decimals are always 0; issuance mints whole
/// units.
pub fn initialize_token_mint(params: InitializeMintParams) -> Result<()> {
    let token_program_id = params.token_program.key();
    let mint_key = params.mint.key();
    let authority_key = params.authority.key();

    let mut extensions = vec![
        ExtensionType::MintCloseAuthority,
        ExtensionType::NonTransferable,
        ExtensionType::MetadataPointer,
        match params.pointer {
            PointerTarget::Group(_) => ExtensionType::GroupPointer,
            PointerTarget::Member(_) => ExtensionType::GroupMemberPointer,
        },
    ];
    if params.interest_config.is_some() {
        extensions.push(ExtensionType::InterestBearingConfig);
    }
    if params.transfer_fee_config.is_some() {
        extensions.push(ExtensionType::TransferFeeConfig);
    }

    let token_metadata = TokenMetadata {
        update_authority: OptionalNonZeroPubkey::try_from(Some(authority_key))?,
        mint: mint_key,
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        uri: params.uri.clone(),
        additional_metadata: params.additional_metadata.clone(),
    };

    let mint_size = ExtensionType::try_calculate_account_len::<Token2022Mint>(&extensions)?;
    let metadata_size = token_metadata.tlv_size_of()?;
    // The account is sized for the mint alone; metadata TLV space is only
    // pre-funded, the token program reallocs when metadata is written.
    let rent_lamports = Rent::get()?.minimum_balance(mint_size + metadata_size);

    system_program::create_account(
        CpiContext::new(
            params.system_program.clone(),
            system_program::CreateAccount {
                from: params.payer.clone(),
                to: params.mint.clone(),
            },
        ),
        rent_lamports,
        mint_size as u64,
        &token_program_id,
    )?;

    let mint_and_program = [params.mint.clone(), params.token_program.clone()];

    let close_ix = token_2022_instruction::initialize_mint_close_authority(
        &token_program_id,
        &mint_key,
        Some(&authority_key),
    )?;
    invoke(&close_ix, &mint_and_program)?;

    let non_transferable_ix =
        token_2022_instruction::initialize_non_transferable_mint(&token_program_id, &mint_key)?;
    invoke(&non_transferable_ix, &mint_and_program)?;

    let metadata_pointer_ix = metadata_pointer::instruction::initialize(
        &token_program_id,
        &mint_key,
        Some(authority_key),
        Some(mint_key),
    )?;
    invoke(&metadata_pointer_ix, &mint_and_program)?;

    match params.pointer {
        PointerTarget::Group(group_key) => {
            let group_pointer_ix = group_pointer::instruction::initialize(
                &token_program_id,
                &mint_key,
                Some(authority_key),
                Some(group_key),
            )?;
            invoke(&group_pointer_ix, &mint_and_program)?;
        }
        PointerTarget::Member(member_key) => {
            let member_pointer_ix = group_member_pointer::instruction::initialize(
                &token_program_id,
                &mint_key,
                Some(authority_key),
                Some(member_key),
            )?;
            invoke(&member_pointer_ix, &mint_and_program)?;
        }
    }

    if let Some(interest_config) = params.interest_config {
        let interest_ix = interest_bearing_mint::instruction::initialize(
            &token_program_id,
            &mint_key,
            Some(authority_key),
            interest_config.rate,
        )?;
        invoke(&interest_ix, &mint_and_program)?;
    }

    if let Some(fee_config) = params.transfer_fee_config {
        let fee_ix = transfer_fee::instruction::initialize_transfer_fee_config(
            &token_program_id,
            &mint_key,
            Some(&authority_key),
            Some(&authority_key),
            fee_config.transfer_fee_basis_points,
            fee_config.max_fee_rate,
        )?;
        invoke(&fee_ix, &mint_and_program)?;
    }

    let init_mint_ix = token_2022_instruction::initialize_mint2(
        &token_program_id,
        &mint_key,
        &authority_key,
        Some(&authority_key),
        0,
    )?;
    invoke(&init_mint_ix, &mint_and_program)?;

    let metadata_accounts = [
        params.mint.clone(),
        params.authority.clone(),
        params.token_program.clone(),
    ];

    let init_metadata_ix = metadata_instruction::initialize(
        &token_program_id,
        &mint_key,
        &authority_key,
        &mint_key,
        &authority_key,
        params.name,
        params.symbol,
        params.uri,
    );
    invoke_signed(&init_metadata_ix, &metadata_accounts, params.signer_seeds)?;

    for (field, value) in params.additional_metadata {
        let update_ix = metadata_instruction::update_field(
            &token_program_id,
            &mint_key,
            &authority_key,
            Field::Key(field),
            value,
        );
        invoke_signed(&update_ix, &metadata_accounts, params.signer_seeds)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        assert!(is_valid_name("abc"));
        assert!(is_valid_name(&"a".repeat(MAX_NAME_LEN)));
        assert!(!is_valid_name("ab"));
        assert!(!is_valid_name(&"a".repeat(MAX_NAME_LEN + 1)));
    }

    #[test]
    fn accepts_common_urls() {
        assert!(is_valid_url("https://example.com/image.png"));
        assert!(is_valid_url("http://localhost:8899/img"));
        assert!(is_valid_url("https://cdn.example.co.uk/a/b/c"));
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(!is_valid_url("ftp://example.com/a.png"));
        assert!(!is_valid_url("example.com/a.png"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://noperiod/a.png"));
        assert!(!is_valid_url("https://bad..host/a.png"));
        assert!(!is_valid_url("https://.example.com/"));
        assert!(!is_valid_url("https://exa mple.com/a.png"));
    }
}
