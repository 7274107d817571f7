use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TokenPassError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct Entry {
    pub timestamp: i64,
    pub message: String,
    pub url: Option<String>,
    pub points: u64,
}

impl Entry {
    pub const SIZE: usize = 8 + // timestamp
        4 + MAX_ENTRY_MESSAGE_LEN + // message
        1 + 4 + MAX_ENTRY_URL_LEN + // url
        8; // points

    pub fn validate(&self) -> Result<()> {
        require!(
            !self.message.is_empty() && self.message.len() <= MAX_ENTRY_MESSAGE_LEN,
            TokenPassError::InvalidActivityEntry
        );
        if let Some(url) = &self.url {
            require!(
                url.len() <= MAX_ENTRY_URL_LEN,
                TokenPassError::InvalidActivityEntry
            );
        }
        Ok(())
    }
}

/// Append-only log of timestamped entries for one member token. One record
/// per (member mint, label); entries only ever grow.
#[account]
pub struct Activity {
    pub bump: u8,
    pub label: String,
    pub start_date: i64,
    // 0 means open-ended
    pub end_date: i64,
    pub fee_payer: Pubkey,
    pub minter: Pubkey,
    pub member: Pubkey,
    pub mint: Pubkey,
    pub entries: Vec<Entry>,
}

impl Activity {
    pub fn size(entries: &[Entry]) -> usize {
        8 + // anchor discriminator
        1 + // bump
        4 + MAX_LABEL_LEN + // label
        8 + // start_date
        8 + // end_date
        32 + // fee_payer
        32 + // minter
        32 + // member
        32 + // mint
        4 + entries.len() * Entry::SIZE // entries
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            !self.label.is_empty() && self.label.len() <= MAX_LABEL_LEN,
            TokenPassError::InvalidActivityLabel
        );
        for entry in &self.entries {
            entry.validate()?;
        }
        Ok(())
    }

    pub fn append(&mut self, entry: Entry) -> Result<u32> {
        entry.validate()?;
        self.entries.push(entry);
        u32::try_from(self.entries.len()).map_err(|_| error!(TokenPassError::Overflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> Activity {
        Activity {
            bump: 252,
            label: "q3-meetups".to_string(),
            start_date: 1_700_000_000,
            end_date: 0,
            fee_payer: Pubkey::new_unique(),
            minter: Pubkey::new_unique(),
            member: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            entries: vec![],
        }
    }

    fn entry(n: u64) -> Entry {
        Entry {
            timestamp: 1_700_000_000 + n as i64,
            message: format!("checked in #{n}"),
            url: None,
            points: n,
        }
    }

    #[test]
    fn entries_append_in_order() {
        let mut activity = activity();
        for n in 0..5 {
            let count = activity.append(entry(n)).unwrap();
            assert_eq!(count as usize, activity.entries.len());
        }

        assert_eq!(activity.entries.len(), 5);
        for (n, stored) in activity.entries.iter().enumerate() {
            assert_eq!(stored.points, n as u64);
        }
    }

    #[test]
    fn appending_never_disturbs_prior_entries() {
        let mut activity = activity();
        activity.append(entry(1)).unwrap();
        let first_message = activity.entries[0].message.clone();
        activity.append(entry(2)).unwrap();
        assert_eq!(activity.entries[0].message, first_message);
    }

    #[test]
    fn size_grows_linearly_with_entries() {
        let empty = Activity::size(&[]);
        let one = vec![entry(1)];
        let two = vec![entry(1), entry(2)];
        assert_eq!(Activity::size(&one), empty + Entry::SIZE);
        assert_eq!(Activity::size(&two), empty + 2 * Entry::SIZE);
    }

    #[test]
    fn oversized_entries_are_rejected() {
        let mut activity = activity();
        let mut bad = entry(1);
        bad.message = "m".repeat(MAX_ENTRY_MESSAGE_LEN + 1);
        assert!(activity.append(bad).is_err());
        assert!(activity.entries.is_empty());

        let mut bad = entry(2);
        bad.url = Some("u".repeat(MAX_ENTRY_URL_LEN + 1));
        assert!(activity.append(bad).is_err());
    }

    #[test]
    fn label_bounds() {
        let mut activity = activity();
        activity.label = "l".repeat(MAX_LABEL_LEN + 1);
        assert!(activity.validate().is_err());
    }
}
