//! The scan-session state machine: one scan-to-commit cycle at a time.

use thiserror::Error;
use time::Date;

use super::ean::{EanCode, InvalidEan};
use super::entities::ProductEntry;

/// Where the current cycle rests between inputs.
///
/// Validation and commit are transient steps; the machine never rests there
/// and moves straight on to the next resting state or reports an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    /// A code was submitted and rejected; the cycle waits for another one.
    AwaitingCode,
    /// Code validated; the resolution chain has not produced a name yet.
    Resolving,
    /// Name settled; the entry is constructible once the fields are filled.
    Ready,
    /// Both lookup sources came back empty; a manual name is required.
    AwaitingManualName,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    InvalidEan(#[from] InvalidEan),
    /// A half-entered cycle holds state; finish or cancel it first.
    #[error("a scan is already in progress")]
    SessionBusy,
}

/// Field-specific commit failures, reported in the fixed check order
/// EAN, expiry date, quantity, name.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    #[error("no validated EAN code on this session")]
    MissingEan,
    #[error("expiry date is required")]
    MissingExpiry,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("product name must not be empty")]
    MissingName,
}

/// One user scan-to-commit cycle.
///
/// Drives raw scanner output (or typed text) through validation and name
/// resolution into a committable [`ProductEntry`]. Only one cycle is live at
/// a time; submitting a new code mid-cycle is rejected rather than queued so
/// a half-entered item is never dropped silently.
#[derive(Debug, Default)]
pub struct ScanSession {
    state: SessionState,
    ean: Option<EanCode>,
    name: Option<String>,
    expiry: Option<Date>,
    quantity: Option<u32>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ean(&self) -> Option<&EanCode> {
        self.ean.as_ref()
    }

    /// Feeds a raw decoded string into the cycle and returns the validated
    /// code.
    ///
    /// An invalid code is discarded (no automatic retry) and the cycle rests
    /// at [`SessionState::AwaitingCode`] for the next submission.
    pub fn submit_code(&mut self, raw: &str) -> Result<EanCode, ScanError> {
        match self.state {
            SessionState::Idle | SessionState::AwaitingCode => {}
            _ => return Err(ScanError::SessionBusy),
        }
        self.state = SessionState::AwaitingCode;
        let ean = EanCode::parse(raw)?;
        self.ean = Some(ean.clone());
        self.state = SessionState::Resolving;
        Ok(ean)
    }

    /// Records a product name from any origin: resolver hit, known-name
    /// prefill or manual entry. Blank names are rejected.
    pub fn accept_name(&mut self, name: &str) -> Result<(), CommitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommitError::MissingName);
        }
        self.name = Some(name.to_owned());
        if matches!(
            self.state,
            SessionState::Resolving | SessionState::AwaitingManualName
        ) {
            self.state = SessionState::Ready;
        }
        Ok(())
    }

    /// Marks the resolution chain as exhausted; the cycle now blocks on a
    /// manually supplied name.
    pub fn note_unresolved(&mut self) {
        if self.state == SessionState::Resolving {
            self.state = SessionState::AwaitingManualName;
        }
    }

    pub fn set_expiry(&mut self, date: Date) {
        self.expiry = Some(date);
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = Some(quantity);
    }

    /// Abandons the cycle, discarding the EAN, name, expiry and quantity.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Builds the entry and resets the cycle.
    ///
    /// The four field checks are independent; the first failing one in the
    /// fixed order EAN, expiry, quantity, name is reported and the cycle
    /// keeps its state so the user can correct the field and resubmit.
    pub fn commit(&mut self) -> Result<ProductEntry, CommitError> {
        let Some(ean) = self.ean.clone() else {
            return Err(CommitError::MissingEan);
        };
        let Some(expiry) = self.expiry else {
            return Err(CommitError::MissingExpiry);
        };
        let quantity = self
            .quantity
            .filter(|quantity| *quantity >= 1)
            .ok_or(CommitError::InvalidQuantity)?;
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .ok_or(CommitError::MissingName)?;

        *self = Self::default();
        Ok(ProductEntry {
            ean,
            name,
            expiry: Some(expiry),
            quantity,
        })
    }
}
