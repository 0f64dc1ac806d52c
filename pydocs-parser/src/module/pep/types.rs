///! PEP status data types

use serde::{Deserialize, Serialize};

/// One data row of the PEP numerical index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepIndexRow {
    /// Status letter from the index, without the leading type letter ("" for drafts)
    pub short_status: String,
    /// Link to the PEP page as written in the index (may be relative or empty)
    pub href: String,
}

/// A PEP whose page status disagrees with its index status letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultWarning {
    /// Status found on the PEP page
    pub status: String,
    /// Status letter found in the index
    pub short_status: String,
    /// PEP page URL
    pub url: String,
}

/// Count of PEPs per full status, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

/// Everything one pass over the PEP index produced
#[derive(Debug, Clone, Default)]
pub struct PepSummary {
    pub tally: StatusTally,
    pub warnings: Vec<ResultWarning>,
    /// Number of index data rows processed
    pub processed: usize,
    /// Rows whose status letter is missing from the expected-status table
    pub unknown_codes: usize,
}
