//! The authority ledger is a sorted, duplicate-free list of signers allowed
//! to mutate a minter or preset. It is kept sorted so membership checks stay
//! a binary search and inserts preserve the no-duplicates invariant.

use anchor_lang::prelude::*;

use crate::errors::TokenPassError;

pub fn is_authority(authorities: &[Pubkey], key: &Pubkey) -> bool {
    authorities.binary_search(key).is_ok()
}

pub fn insert_authority(authorities: &mut Vec<Pubkey>, new_authority: Pubkey) -> Result<()> {
    match authorities.binary_search(&new_authority) {
        Ok(_) => err!(TokenPassError::AuthorityAlreadyExists),
        Err(index) => {
            authorities.insert(index, new_authority);
            Ok(())
        }
    }
}

pub fn remove_authority(authorities: &mut Vec<Pubkey>, authority: &Pubkey) -> Result<()> {
    require!(
        authorities.len() > 1,
        TokenPassError::CannotRemoveSoloAuthority
    );

    match authorities.binary_search(authority) {
        Ok(index) => {
            authorities.remove(index);
            Ok(())
        }
        Err(_) => err!(TokenPassError::AuthorityNonExistant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn insert_keeps_list_sorted_and_unique() {
        let mut authorities = vec![key(5)];
        insert_authority(&mut authorities, key(9)).unwrap();
        insert_authority(&mut authorities, key(1)).unwrap();

        assert_eq!(authorities, vec![key(1), key(5), key(9)]);
        assert!(is_authority(&authorities, &key(5)));
        assert!(!is_authority(&authorities, &key(7)));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut authorities = vec![key(5)];
        assert!(insert_authority(&mut authorities, key(5)).is_err());
        assert_eq!(authorities.len(), 1);
    }

    #[test]
    fn removing_missing_authority_is_rejected() {
        let mut authorities = vec![key(1), key(2)];
        assert!(remove_authority(&mut authorities, &key(9)).is_err());
        assert_eq!(authorities.len(), 2);
    }

    #[test]
    fn removing_last_authority_is_rejected() {
        let mut authorities = vec![key(1)];
        assert!(remove_authority(&mut authorities, &key(1)).is_err());
        assert_eq!(authorities, vec![key(1)]);
    }

    #[test]
    fn remove_then_readd_round_trips() {
        let mut authorities = vec![key(1), key(2), key(3)];
        remove_authority(&mut authorities, &key(2)).unwrap();
        assert_eq!(authorities, vec![key(1), key(3)]);
        insert_authority(&mut authorities, key(2)).unwrap();
        assert_eq!(authorities, vec![key(1), key(2), key(3)]);
    }
}
