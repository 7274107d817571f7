use anchor_lang::prelude::*;

use crate::errors::TokenPassError;

// Program-owned group bookkeeping until the token-group extensions are
// live; the mints point here via GroupPointer / GroupMemberPointer.

#[account]
pub struct Group {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub size: u32,
    pub max_size: u32,
}

impl Group {
    pub const SIZE: usize = 8 + // anchor discriminator
        32 + // update_authority
        32 + // mint
        4 + // size
        4; // max_size

    /// Reserves the next member slot. Size only ever moves up, and only
    /// through this guard.
    pub fn record_mint(&mut self) -> Result<u32> {
        require!(self.size < self.max_size, TokenPassError::MaxSizeReached);
        self.size += 1;
        Ok(self.size)
    }
}

#[account]
pub struct Member {
    pub bump: u8,
    pub group: Pubkey,
    pub mint: Pubkey,
    pub index: u32,
}

impl Member {
    pub const SIZE: usize = 8 + // anchor discriminator
        1 + // bump
        32 + // group
        32 + // mint
        4; // index
}

/// Singleton marker PDA under the `manager` seed; anchors the derivation
/// namespace shared with the group records.
#[account]
pub struct Manager {
    pub bump: u8,
}

impl Manager {
    pub const SIZE: usize = 8 + // anchor discriminator
        1; // bump
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_enforced() {
        let mut group = Group {
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            size: 0,
            max_size: 2,
        };

        assert_eq!(group.record_mint().unwrap(), 1);
        assert_eq!(group.record_mint().unwrap(), 2);
        assert_eq!(group.size, group.max_size);

        assert!(group.record_mint().is_err());
        assert_eq!(group.size, 2);
    }

    #[test]
    fn zero_capacity_group_never_mints() {
        let mut group = Group {
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            size: 0,
            max_size: 0,
        };
        assert!(group.record_mint().is_err());
    }
}
