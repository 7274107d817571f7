use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::state::*;
use crate::utils::{is_valid_name, is_valid_url};

#[account]
pub struct Minter {
    // Bump of the PDA
    pub bump: u8,
    // Group tracking issuance count and capacity
    pub group: Pubkey,
    // Name of the minter, part of its address
    pub name: String,
    // Description shown to applicants
    pub description: String,
    // Image URL of the minter
    pub image_url: String,
    // Designated fee payer for rent and resizes
    pub fee_payer: Pubkey,
    // Sorted authority ledger
    pub authorities: Vec<Pubkey>,
    // Pay-to-create terms, stamped with an expiry once paid
    pub payment_config: PaymentConfig,
    // Backing mint, metadata and extension configuration
    pub minter_config: MinterConfig,
}

impl Minter {
    pub fn size(
        authorities: &[Pubkey],
        application_config: &ApplicationConfig,
        metadata_config: &MetadataConfig,
    ) -> usize {
        8 + // anchor discriminator
        1 + // bump
        32 + // group
        4 + MAX_NAME_LEN + // name
        4 + MAX_DESCRIPTION_LEN + // description
        4 + MAX_IMAGE_URL_LEN + // image_url
        32 + // fee_payer
        4 + authorities.len() * 32 + // authorities
        PaymentConfig::SIZE + // payment_config
        MinterConfig::size(application_config, metadata_config) // minter_config
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            is_valid_name(&self.name),
            TokenPassError::InvalidMinterName
        );
        require!(
            self.description.len() > MIN_DESCRIPTION_LEN
                && self.description.len() <= MAX_DESCRIPTION_LEN,
            TokenPassError::InvalidMinterDescription
        );
        require!(
            is_valid_url(&self.image_url) && self.image_url.len() <= MAX_IMAGE_URL_LEN,
            TokenPassError::InvalidMinterImageURL
        );
        require!(
            !self.authorities.is_empty(),
            TokenPassError::CannotRemoveSoloAuthority
        );

        self.minter_config.validate()?;

        Ok(())
    }

    pub fn has_authority(&self, authority: &Pubkey) -> bool {
        is_authority(&self.authorities, authority)
    }

    pub fn add_authority(&mut self, new_authority: Pubkey) -> Result<()> {
        insert_authority(&mut self.authorities, new_authority)
    }

    pub fn remove_authority(&mut self, authority: &Pubkey) -> Result<()> {
        remove_authority(&mut self.authorities, authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minter() -> Minter {
        let payment_config = PaymentConfigArgs {
            amount: 100,
            price: 10_000_000,
            mint: Pubkey::new_unique(),
            days: 30,
        }
        .into_config(0);

        Minter {
            bump: 254,
            group: Pubkey::new_unique(),
            name: "business-visa".to_string(),
            description: "Pay-to-apply business credential".to_string(),
            image_url: "https://example.com/visa.png".to_string(),
            fee_payer: Pubkey::new_unique(),
            authorities: vec![Pubkey::new_from_array([7; 32])],
            payment_config: payment_config.clone(),
            minter_config: MinterConfig {
                mint: Pubkey::new_unique(),
                application_config: ApplicationConfig {
                    identities: vec![IdentityProvider::Discord],
                    payment_config,
                },
                metadata_config: MetadataConfig {
                    name: "Business Visa".to_string(),
                    symbol: "VISA".to_string(),
                    uri: "https://example.com/visa.json".to_string(),
                    metadata: None,
                },
                interest_config: None,
                transfer_fee_config: None,
            },
        }
    }

    #[test]
    fn valid_minter_passes() {
        assert!(minter().validate().is_ok());
    }

    #[test]
    fn name_bounds() {
        let mut minter = minter();
        minter.name = "ab".to_string();
        assert!(minter.validate().is_err());

        minter.name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(minter.validate().is_err());
    }

    #[test]
    fn description_bounds() {
        let mut minter = minter();
        minter.description = "too short".to_string();
        assert!(minter.validate().is_err());

        minter.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(minter.validate().is_err());
    }

    #[test]
    fn image_url_must_be_http() {
        let mut minter = minter();
        minter.image_url = "ftp://example.com/visa.png".to_string();
        assert!(minter.validate().is_err());
    }

    #[test]
    fn authority_ledger_round_trip() {
        let mut minter = minter();
        let second = Pubkey::new_from_array([9; 32]);

        minter.add_authority(second).unwrap();
        assert!(minter.add_authority(second).is_err());
        assert!(minter.has_authority(&second));

        minter.remove_authority(&second).unwrap();
        assert!(minter.remove_authority(&second).is_err());

        let solo = minter.authorities[0];
        assert!(minter.remove_authority(&solo).is_err());
        assert!(minter.has_authority(&solo));
    }

    #[test]
    fn size_grows_with_authorities() {
        let minter = minter();
        let base = Minter::size(
            &minter.authorities,
            &minter.minter_config.application_config,
            &minter.minter_config.metadata_config,
        );
        let two = [minter.authorities[0], Pubkey::new_unique()];
        let grown = Minter::size(
            &two,
            &minter.minter_config.application_config,
            &minter.minter_config.metadata_config,
        );
        assert_eq!(grown, base + 32);
    }
}
