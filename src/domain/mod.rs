//! Core logic for product entry and expiry tracking lives here.

pub mod ean;
pub mod entities;
pub mod expiry;
pub mod ledger;
pub mod resolve;
pub mod session;

pub use ean::{is_valid_ean13, EanCode, InvalidEan};
pub use entities::ProductEntry;
pub use expiry::{classify, UrgencyTier, CRITICAL_WINDOW_DAYS, WARNING_WINDOW_DAYS};
pub use ledger::{Ledger, LedgerError};
pub use resolve::{NameResolution, NameResolver, NameSource};
pub use session::{CommitError, ScanError, ScanSession, SessionState};
