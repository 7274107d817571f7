use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;
use crate::state::*;
use crate::utils::{is_valid_name, is_valid_url};

/// The lighter issuance flavor: same authority ledger and validation rules
/// as [`Minter`], but the backing mint is created and controlled by the
/// designated fee payer rather than by a program PDA.
#[account]
pub struct Preset {
    pub bump: u8,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub fee_payer: Pubkey,
    pub authorities: Vec<Pubkey>,
    pub minter_config: MinterConfig,
}

impl Preset {
    pub fn size(
        authorities: &[Pubkey],
        application_config: &ApplicationConfig,
        metadata_config: &MetadataConfig,
    ) -> usize {
        8 + // anchor discriminator
        1 + // bump
        4 + MAX_NAME_LEN + // name
        4 + MAX_DESCRIPTION_LEN + // description
        4 + MAX_IMAGE_URL_LEN + // image_url
        32 + // fee_payer
        4 + authorities.len() * 32 + // authorities
        MinterConfig::size(application_config, metadata_config) // minter_config
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            is_valid_name(&self.name),
            TokenPassError::InvalidPresetName
        );
        require!(
            self.description.len() > MIN_DESCRIPTION_LEN
                && self.description.len() <= MAX_DESCRIPTION_LEN,
            TokenPassError::InvalidPresetDescription
        );
        require!(
            is_valid_url(&self.image_url) && self.image_url.len() <= MAX_IMAGE_URL_LEN,
            TokenPassError::InvalidPresetImageURL
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

    fn preset() -> Preset {
        let payment_config = PaymentConfigArgs {
            amount: 1,
            price: 0,
            mint: Pubkey::new_unique(),
            days: 7,
        }
        .into_config(0);

        Preset {
            bump: 255,
            name: "community-pass".to_string(),
            description: "Free community membership pass".to_string(),
            image_url: "https://example.com/pass.png".to_string(),
            fee_payer: Pubkey::new_unique(),
            authorities: vec![Pubkey::new_unique()],
            minter_config: MinterConfig {
                mint: Pubkey::new_unique(),
                application_config: ApplicationConfig {
                    identities: vec![],
                    payment_config,
                },
                metadata_config: MetadataConfig {
                    name: "Community Pass".to_string(),
                    symbol: "PASS".to_string(),
                    uri: "https://example.com/pass.json".to_string(),
                    metadata: None,
                },
                interest_config: None,
                transfer_fee_config: None,
            },
        }
    }

    #[test]
    fn valid_preset_passes() {
        assert!(preset().validate().is_ok());
    }

    #[test]
    fn preset_name_bounds() {
        let mut preset = preset();
        preset.name = "xy".to_string();
        assert!(preset.validate().is_err());
    }

    #[test]
    fn preset_image_url_must_be_http() {
        let mut preset = preset();
        preset.image_url = "not-a-url".to_string();
        assert!(preset.validate().is_err());
    }

    #[test]
    fn preset_authority_ledger_round_trip() {
        let mut preset = preset();
        let second = Pubkey::new_from_array([9; 32]);

        preset.add_authority(second).unwrap();
        assert!(preset.add_authority(second).is_err());
        assert!(preset.has_authority(&second));

        preset.remove_authority(&second).unwrap();
        assert!(preset.remove_authority(&second).is_err());

        let solo = preset.authorities[0];
        assert!(preset.remove_authority(&solo).is_err());
        assert!(preset.has_authority(&solo));
    }
}
