use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    Discord = 0,
    GitHub = 1,
    Google = 2,
    Twitter = 3,
}

impl IdentityProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityProvider::Discord => "Discord",
            IdentityProvider::GitHub => "GitHub",
            IdentityProvider::Google => "Google",
            IdentityProvider::Twitter => "Twitter",
        }
    }
}

/// Pay-to-apply / pay-to-mint terms. `expires_at` is always computed
/// on-chain; clients supply the rest through [`PaymentConfigArgs`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PaymentConfig {
    pub amount: u16,
    pub price: u64,
    pub mint: Pubkey,
    pub days: u8,
    pub expires_at: i64,
}

impl PaymentConfig {
    pub const SIZE: usize = 2 + // amount
        8 + // price
        32 + // mint
        1 + // days
        8; // expires_at

    pub fn validity_window(&self) -> i64 {
        i64::from(self.days) * SECONDS_PER_DAY
    }

    pub fn expiry_from(&self, now: i64) -> Result<i64> {
        now.checked_add(self.validity_window())
            .ok_or_else(|| error!(TokenPassError::Overflow))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PaymentConfigArgs {
    pub amount: u16,
    pub price: u64,
    pub mint: Pubkey,
    pub days: u8,
}

impl PaymentConfigArgs {
    pub fn into_config(self, expires_at: i64) -> PaymentConfig {
        PaymentConfig {
            amount: self.amount,
            price: self.price,
            mint: self.mint,
            days: self.days,
            expires_at,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct MetadataConfig {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub metadata: Option<Vec<[String; 2]>>,
}

impl MetadataConfig {
    pub fn size(metadata: &Option<Vec<[String; 2]>>) -> usize {
        let metadata_size = metadata
            .as_ref()
            .map(|pairs| pairs.len() * (4 + MAX_METADATA_PAIR_LEN) * 2)
            .unwrap_or(0);

        4 + MAX_NAME_LEN + // name
        4 + MAX_SYMBOL_LEN + // symbol
        4 + MAX_URI_LEN + // uri
        1 + 4 + metadata_size // metadata
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            !self.name.is_empty() && self.name.len() <= MAX_NAME_LEN,
            TokenPassError::InvalidMetadata
        );
        require!(
            self.symbol.len() <= MAX_SYMBOL_LEN,
            TokenPassError::InvalidMetadata
        );
        require!(
            !self.uri.is_empty() && self.uri.len() <= MAX_URI_LEN,
            TokenPassError::InvalidMetadata
        );

        if let Some(pairs) = &self.metadata {
            for [field, value] in pairs {
                require!(
                    !field.is_empty() && field.len() <= MAX_METADATA_PAIR_LEN,
                    TokenPassError::InvalidMetadata
                );
                require!(
                    value.len() <= MAX_METADATA_PAIR_LEN,
                    TokenPassError::InvalidMetadata
                );
            }
        }

        Ok(())
    }

    pub fn additional_metadata(&self) -> Vec<(String, String)> {
        self.metadata
            .as_ref()
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|pair| (pair[0].clone(), pair[1].clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct InterestConfig {
    pub rate: i16,
}

impl InterestConfig {
    pub const SIZE: usize = 2; // rate
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct TransferFeeConfig {
    pub transfer_fee_basis_points: u16,
    pub max_fee_rate: u64,
}

impl TransferFeeConfig {
    pub const SIZE: usize = 2 + // transfer_fee_basis_points
        8; // max_fee_rate

    pub fn validate(&self) -> Result<()> {
        require!(
            self.transfer_fee_basis_points <= 10_000,
            TokenPassError::InvalidMetadata
        );
        Ok(())
    }
}

/// Requirements a member applicant must satisfy: verified identities plus
/// the per-mint payment terms.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ApplicationConfig {
    pub identities: Vec<IdentityProvider>,
    pub payment_config: PaymentConfig,
}

impl ApplicationConfig {
    pub fn size(identities: &[IdentityProvider]) -> usize {
        4 + identities.len() + // identities (unit enum, one byte each)
        PaymentConfig::SIZE // payment_config
    }

    pub fn validate(&self) -> Result<()> {
        for (index, identity) in self.identities.iter().enumerate() {
            require!(
                !self.identities[..index].contains(identity),
                TokenPassError::InvalidMetadata
            );
        }
        Ok(())
    }

    /// Providers demanded here must all appear in the attested set.
    pub fn check_identities(&self, attested: &[IdentityProvider]) -> Result<()> {
        for required in &self.identities {
            require!(
                attested.contains(required),
                TokenPassError::IdentityVerificationMissing
            );
        }
        Ok(())
    }

    /// A minter that demands identities or payment can only issue through
    /// the receipt-gated path.
    pub fn assert_ungated(&self) -> Result<()> {
        require!(
            self.identities.is_empty(),
            TokenPassError::IdentityVerificationMissing
        );
        require!(
            self.payment_config.price == 0,
            TokenPassError::InvalidReceipt
        );
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct MinterConfig {
    pub mint: Pubkey,
    pub application_config: ApplicationConfig,
    pub metadata_config: MetadataConfig,
    pub interest_config: Option<InterestConfig>,
    pub transfer_fee_config: Option<TransferFeeConfig>,
}

impl MinterConfig {
    pub fn size(
        application_config: &ApplicationConfig,
        metadata_config: &MetadataConfig,
    ) -> usize {
        32 + // mint
        ApplicationConfig::size(&application_config.identities) + // application_config
        MetadataConfig::size(&metadata_config.metadata) + // metadata_config
        1 + InterestConfig::SIZE + // interest_config
        1 + TransferFeeConfig::SIZE // transfer_fee_config
    }

    pub fn validate(&self) -> Result<()> {
        self.application_config.validate()?;
        self.metadata_config.validate()?;

        if let Some(transfer_fee_config) = &self.transfer_fee_config {
            transfer_fee_config.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_config() -> MetadataConfig {
        MetadataConfig {
            name: "Business Visa".to_string(),
            symbol: "VISA".to_string(),
            uri: "https://example.com/visa.json".to_string(),
            metadata: None,
        }
    }

    #[test]
    fn payment_expiry_is_days_after_now() {
        let config = PaymentConfigArgs {
            amount: 100,
            price: 10_000_000,
            mint: Pubkey::new_unique(),
            days: 30,
        }
        .into_config(0);

        let now = 1_700_000_000;
        assert_eq!(config.expiry_from(now).unwrap(), now + 30 * 86_400);
        assert_eq!(config.validity_window(), 30 * 86_400);
    }

    #[test]
    fn payment_expiry_overflow_is_an_error() {
        let mut config = PaymentConfigArgs {
            amount: 1,
            price: 0,
            mint: Pubkey::new_unique(),
            days: 1,
        }
        .into_config(0);
        config.days = u8::MAX;

        assert!(config.expiry_from(i64::MAX - 1).is_err());
    }

    #[test]
    fn metadata_bounds_are_enforced() {
        let mut config = metadata_config();
        assert!(config.validate().is_ok());

        config.name = "n".repeat(MAX_NAME_LEN + 1);
        assert!(config.validate().is_err());

        let mut config = metadata_config();
        config.metadata = Some(vec![[
            "k".repeat(MAX_METADATA_PAIR_LEN + 1),
            "v".to_string(),
        ]]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn transfer_fee_basis_points_are_bounded() {
        let config = TransferFeeConfig {
            transfer_fee_basis_points: 10_001,
            max_fee_rate: 100,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn identity_coverage_check() {
        let application_config = ApplicationConfig {
            identities: vec![IdentityProvider::Discord, IdentityProvider::GitHub],
            payment_config: PaymentConfigArgs {
                amount: 1,
                price: 0,
                mint: Pubkey::new_unique(),
                days: 1,
            }
            .into_config(0),
        };

        assert!(application_config
            .check_identities(&[IdentityProvider::GitHub, IdentityProvider::Discord])
            .is_ok());
        assert!(application_config
            .check_identities(&[IdentityProvider::Discord])
            .is_err());
    }

    #[test]
    fn gated_application_cannot_skip_the_receipt_path() {
        let mut application_config = ApplicationConfig {
            identities: vec![],
            payment_config: PaymentConfigArgs {
                amount: 1,
                price: 0,
                mint: Pubkey::new_unique(),
                days: 1,
            }
            .into_config(0),
        };
        assert!(application_config.assert_ungated().is_ok());

        application_config.identities = vec![IdentityProvider::Discord];
        assert!(application_config.assert_ungated().is_err());

        application_config.identities = vec![];
        application_config.payment_config.price = 10_000_000;
        assert!(application_config.assert_ungated().is_err());
    }

    #[test]
    fn duplicate_identity_requirements_are_rejected() {
        let application_config = ApplicationConfig {
            identities: vec![IdentityProvider::Google, IdentityProvider::Google],
            payment_config: PaymentConfigArgs {
                amount: 1,
                price: 0,
                mint: Pubkey::new_unique(),
                days: 1,
            }
            .into_config(0),
        };
        assert!(application_config.validate().is_err());
    }
}
