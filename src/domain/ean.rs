use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A validated EAN-13 barcode.
///
/// Values of this type always hold exactly 13 ASCII digits with a correct
/// check digit; the only way in is [`EanCode::parse`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EanCode(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid EAN-13 code: {code:?}")]
pub struct InvalidEan {
    pub code: String,
}

impl EanCode {
    /// Validates a raw decoded string (scanner output or typed text).
    ///
    /// Surrounding whitespace is stripped first; scanners commonly append a
    /// trailing newline to the decoded symbol value.
    pub fn parse(raw: &str) -> Result<Self, InvalidEan> {
        let code = raw.trim();
        if is_valid_ean13(code) {
            Ok(Self(code.to_owned()))
        } else {
            Err(InvalidEan {
                code: code.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EanCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EanCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// EAN-13 checksum validation.
///
/// Counting positions 0..=12 from the left, even positions weigh 1 and odd
/// positions weigh 3; the code is valid when the weighted sum is divisible
/// by 10. Anything that is not exactly 13 decimal digits is invalid.
pub fn is_valid_ean13(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let mut sum = 0u32;
    for i in (0..bytes.len()).rev() {
        let digit = u32::from(bytes[i] - b'0');
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_retail_codes() {
        assert!(is_valid_ean13("4006381333931"));
        assert!(is_valid_ean13("7891000100103"));
    }

    #[test]
    fn rejects_wrong_check_digit() {
        assert!(!is_valid_ean13("4006381333932"));
    }

    #[test]
    fn exactly_one_check_digit_is_accepted() {
        let accepted: Vec<char> = ('0'..='9')
            .filter(|digit| is_valid_ean13(&format!("400638133393{digit}")))
            .collect();
        assert_eq!(accepted, vec!['1']);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_ean13(""));
        assert!(!is_valid_ean13("400638133393"));
        assert!(!is_valid_ean13("40063813339310"));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_valid_ean13("40063813339a1"));
        assert!(!is_valid_ean13("4006 81333931"));
        assert!(!is_valid_ean13("４006381333931"));
    }

    #[test]
    fn parse_trims_scanner_whitespace() {
        let ean = EanCode::parse(" 4006381333931\n").expect("valid after trim");
        assert_eq!(ean.as_str(), "4006381333931");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(EanCode::parse("4006381333932").is_err());
    }

    #[test]
    fn deserialization_revalidates() {
        assert!(serde_json::from_str::<EanCode>("\"4006381333931\"").is_ok());
        assert!(serde_json::from_str::<EanCode>("\"4006381333932\"").is_err());
    }
}
