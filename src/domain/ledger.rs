//! The inventory ledger, the single source of truth for committed entries.

use thiserror::Error;
use time::Date;

use super::ean::EanCode;
use super::entities::ProductEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Owns the sequence of committed entries in insertion order.
///
/// Admission is enforced upstream: an entry reaches the ledger only with a
/// validated EAN (by type) and a positive quantity. Persistence mirrors this
/// collection, never the reverse.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    entries: Vec<ProductEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a ledger from already-decoded snapshot entries.
    pub fn from_entries(entries: Vec<ProductEntry>) -> Self {
        for entry in &entries {
            assert!(entry.quantity >= 1, "ledger entries require quantity >= 1");
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: ProductEntry) {
        assert!(entry.quantity >= 1, "ledger entries require quantity >= 1");
        self.entries.push(entry);
    }

    /// Deletes exactly one entry; the relative order of the rest is kept.
    pub fn remove(&mut self, index: usize) -> Result<ProductEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Entries in insertion order.
    pub fn all(&self) -> &[ProductEntry] {
        &self.entries
    }

    /// Non-mutating view ordered by ascending expiry date.
    ///
    /// Entries without a date sort last; ties keep insertion order.
    pub fn sorted_by_expiry(&self) -> Vec<&ProductEntry> {
        let mut view: Vec<&ProductEntry> = self.entries.iter().collect();
        view.sort_by_key(|entry| match entry.expiry {
            Some(date) => (0u8, date),
            None => (1u8, Date::MIN),
        });
        view
    }

    /// Name of the most recent entry with this EAN, if any.
    ///
    /// A rescanned product keeps the name the user already confirmed instead
    /// of going back through the lookup chain.
    pub fn known_name(&self, ean: &EanCode) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| &entry.ean == ean)
            .map(|entry| entry.name.as_str())
    }
}
