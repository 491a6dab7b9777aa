use time::macros::format_description;
use time::Date;

pub mod persistence;

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw.trim(), &format).ok()
}

/// Formats a calendar date as ISO `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> Option<String> {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format).ok()
}
