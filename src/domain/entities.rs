use time::Date;

use super::ean::EanCode;
use super::expiry::{classify, UrgencyTier};

/// A committed inventory line: one product batch with its expiry date.
///
/// Entries are value objects. The same EAN may appear on several entries when
/// batches carry different expiry dates, and the ledger position is the only
/// identity an entry has; edits are modelled as delete + reinsert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductEntry {
    pub ean: EanCode,
    pub name: String,
    /// Calendar date without a time component; absent for legacy rows.
    pub expiry: Option<Date>,
    pub quantity: u32,
}

impl ProductEntry {
    /// Current urgency of this entry, recomputed against a reference day.
    pub fn urgency(&self, today: Date) -> UrgencyTier {
        classify(self.expiry, today)
    }
}
