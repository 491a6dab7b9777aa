//! Urgency classification for approaching expiry dates.

use time::Date;

/// Days left before a product is flagged as critical.
pub const CRITICAL_WINDOW_DAYS: i64 = 7;
/// Days left before a product is flagged as a warning.
pub const WARNING_WINDOW_DAYS: i64 = 30;

/// How urgently a product approaches its expiry date.
///
/// Derived on demand from the expiry date and a reference day, never stored;
/// the reference day advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyTier {
    Expired,
    Critical,
    Warning,
    Normal,
}

impl UrgencyTier {
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Expired => "EXPIRED",
            UrgencyTier::Critical => "critical",
            UrgencyTier::Warning => "warning",
            UrgencyTier::Normal => "ok",
        }
    }

    /// True for tiers worth alerting the user about.
    pub fn is_alerting(&self) -> bool {
        matches!(self, UrgencyTier::Expired | UrgencyTier::Critical)
    }
}

/// Classifies an expiry date against a reference day.
///
/// An entry without an expiry date is never alerted.
pub fn classify(expiry: Option<Date>, today: Date) -> UrgencyTier {
    let Some(expiry) = expiry else {
        return UrgencyTier::Normal;
    };
    let days_remaining = (expiry - today).whole_days();
    if days_remaining < 0 {
        UrgencyTier::Expired
    } else if days_remaining <= CRITICAL_WINDOW_DAYS {
        UrgencyTier::Critical
    } else if days_remaining <= WARNING_WINDOW_DAYS {
        UrgencyTier::Warning
    } else {
        UrgencyTier::Normal
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Duration;

    use super::*;

    const TODAY: Date = date!(2025 - 03 - 15);

    fn in_days(days: i64) -> Option<Date> {
        Some(TODAY + Duration::days(days))
    }

    #[test]
    fn yesterday_is_expired() {
        assert_eq!(classify(in_days(-1), TODAY), UrgencyTier::Expired);
    }

    #[test]
    fn today_and_near_dates_are_critical() {
        assert_eq!(classify(in_days(0), TODAY), UrgencyTier::Critical);
        assert_eq!(classify(in_days(5), TODAY), UrgencyTier::Critical);
    }

    #[test]
    fn critical_warning_boundary() {
        assert_eq!(classify(in_days(7), TODAY), UrgencyTier::Critical);
        assert_eq!(classify(in_days(8), TODAY), UrgencyTier::Warning);
    }

    #[test]
    fn warning_normal_boundary() {
        assert_eq!(classify(in_days(20), TODAY), UrgencyTier::Warning);
        assert_eq!(classify(in_days(30), TODAY), UrgencyTier::Warning);
        assert_eq!(classify(in_days(31), TODAY), UrgencyTier::Normal);
        assert_eq!(classify(in_days(45), TODAY), UrgencyTier::Normal);
    }

    #[test]
    fn missing_date_is_normal() {
        assert_eq!(classify(None, TODAY), UrgencyTier::Normal);
    }

    #[test]
    fn tiers_order_by_urgency() {
        assert!(UrgencyTier::Expired < UrgencyTier::Critical);
        assert!(UrgencyTier::Critical < UrgencyTier::Warning);
        assert!(UrgencyTier::Warning < UrgencyTier::Normal);
    }
}
