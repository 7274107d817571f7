use anchor_lang::prelude::*;

use crate::errors::TokenPassError;
use crate::state::PaymentConfig;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    // An applicant paying to mint a member token
    User = 0,
    // A community operator paying to create a minter
    Community = 1,
}

/// Proof that `sender` paid `amount` of `payment_mint` to `receiver`.
/// Unique per (sender, receiver, payment_mint); consulted, never consumed,
/// by gated instructions until `expires_at` passes. A fresh
/// `prepare_for_payment` overwrites the record and restarts the window.
#[account]
pub struct Receipt {
    pub bump: u8,
    pub kind: ReceiptKind,
    pub created_at: i64,
    pub expires_at: i64,
    pub amount: u64,
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub sender_token_account: Pubkey,
    pub receiver_token_account: Pubkey,
    pub payment_mint: Pubkey,
}

impl Receipt {
    pub const SIZE: usize = 8 + // anchor discriminator
        1 + // bump
        1 + // kind
        8 + // created_at
        8 + // expires_at
        8 + // amount
        32 + // sender
        32 + // receiver
        32 + // sender_token_account
        32 + // receiver_token_account
        32; // payment_mint

    pub fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at
    }

    /// A receipt authorizes a gated operation only while unexpired, for the
    /// configured price, and with a validity window matching the configured
    /// number of days (a payer cannot self-grant a longer window).
    pub fn assert_covers(&self, config: &PaymentConfig, now: i64) -> Result<()> {
        require!(self.is_fresh(now), TokenPassError::ReceiptExpired);
        require!(
            self.amount == config.price,
            TokenPassError::InvalidReceipt
        );
        require!(
            self.payment_mint == config.mint,
            TokenPassError::InvalidReceipt
        );
        require!(
            self.expires_at - self.created_at == config.validity_window(),
            TokenPassError::InvalidReceipt
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PaymentConfigArgs;

    const NOW: i64 = 1_700_000_000;

    fn receipt_and_config() -> (Receipt, PaymentConfig) {
        let payment_mint = Pubkey::new_unique();
        let config = PaymentConfigArgs {
            amount: 100,
            price: 10_000_000,
            mint: payment_mint,
            days: 30,
        }
        .into_config(0);

        let receipt = Receipt {
            bump: 253,
            kind: ReceiptKind::User,
            created_at: NOW,
            expires_at: NOW + 30 * 86_400,
            amount: 10_000_000,
            sender: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            sender_token_account: Pubkey::new_unique(),
            receiver_token_account: Pubkey::new_unique(),
            payment_mint,
        };

        (receipt, config)
    }

    #[test]
    fn fresh_receipt_authorizes_repeatedly() {
        let (receipt, config) = receipt_and_config();
        assert!(receipt.assert_covers(&config, NOW + 1).is_ok());
        // Still valid later in the window; not consumed by the first check.
        assert!(receipt.assert_covers(&config, NOW + 29 * 86_400).is_ok());
    }

    #[test]
    fn expired_receipt_is_rejected() {
        let (receipt, config) = receipt_and_config();
        assert!(receipt.assert_covers(&config, receipt.expires_at).is_err());
        assert!(!receipt.is_fresh(receipt.expires_at + 1));
    }

    #[test]
    fn wrong_price_is_rejected() {
        let (mut receipt, config) = receipt_and_config();
        receipt.amount = config.price - 1;
        assert!(receipt.assert_covers(&config, NOW + 1).is_err());
    }

    #[test]
    fn wrong_payment_mint_is_rejected() {
        let (mut receipt, config) = receipt_and_config();
        receipt.payment_mint = Pubkey::new_unique();
        assert!(receipt.assert_covers(&config, NOW + 1).is_err());
    }

    #[test]
    fn self_granted_longer_window_is_rejected() {
        let (mut receipt, config) = receipt_and_config();
        receipt.expires_at = receipt.created_at + 90 * 86_400;
        assert!(receipt.assert_covers(&config, NOW + 1).is_err());
    }
}
