//! Valida Fácil: perishable-stock tracking by EAN-13 barcode.
//!
//! The pipeline: validate a scanned code, resolve it to a product name
//! through an ordered fallback chain, record expiry date and quantity, and
//! keep a persisted ledger with expiry-sorted views and urgency warnings.

pub mod app;
pub mod domain;
pub mod infra;
pub mod util;
