//! Whole-ledger snapshot persistence.
//!
//! The snapshot is read once at startup and rewritten after every mutation
//! (write-through). The in-memory ledger stays authoritative: a failed write
//! is surfaced to the caller, never rolled back. Loading is lenient; a
//! malformed quantity becomes 1 and a malformed date becomes "no expiry".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Error as SerdeError;

use crate::domain::{EanCode, Ledger, ProductEntry};
use crate::util::{format_iso_date, parse_iso_date};

const APP_QUALIFIER: &str = "br";
const APP_ORG: &str = "ValidaFacil";
const APP_NAME: &str = "ValidaFacil";
const LEDGER_FILENAME: &str = "ledger.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(LEDGER_FILENAME))
}

/// Loads the persisted ledger, or an empty one when no snapshot exists.
pub fn load_ledger() -> Ledger {
    match data_file() {
        Some(path) => load_ledger_from(&path),
        None => Ledger::new(),
    }
}

pub fn save_ledger(ledger: &Ledger) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_ledger_to(ledger, &path)
}

pub fn load_ledger_from(path: &Path) -> Ledger {
    let Ok(data) = fs::read_to_string(path) else {
        return Ledger::new();
    };
    let snapshot: LedgerSnapshot = match serde_json::from_str(&data) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "discarding unreadable ledger snapshot");
            return Ledger::new();
        }
    };
    let entries = snapshot
        .entries
        .into_iter()
        .filter_map(decode_entry)
        .collect();
    Ledger::from_entries(entries)
}

pub fn save_ledger_to(ledger: &Ledger, path: &Path) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let snapshot = LedgerSnapshot {
        entries: ledger.all().iter().map(SnapshotEntry::from_entry).collect(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerSnapshot {
    #[serde(default)]
    entries: Vec<SnapshotEntry>,
}

/// On-disk form of a ledger entry, ordered like the snapshot it came from.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    ean: String,
    #[serde(default)]
    name: String,
    /// ISO calendar date; anything unparseable loads as "no expiry".
    #[serde(default, deserialize_with = "lenient_date")]
    expiry: Option<String>,
    /// Malformed or non-positive quantities load as 1.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    quantity: u32,
}

impl SnapshotEntry {
    fn from_entry(entry: &ProductEntry) -> Self {
        Self {
            ean: entry.ean.to_string(),
            name: entry.name.clone(),
            expiry: entry.expiry.and_then(format_iso_date),
            quantity: entry.quantity,
        }
    }
}

fn default_quantity() -> u32 {
    1
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|quantity| u32::try_from(quantity).ok())
        .filter(|quantity| *quantity >= 1)
        .unwrap_or(1))
}

fn decode_entry(raw: SnapshotEntry) -> Option<ProductEntry> {
    let ean = match EanCode::parse(&raw.ean) {
        Ok(ean) => ean,
        Err(error) => {
            tracing::warn!(%error, "skipping ledger entry with an invalid EAN");
            return None;
        }
    };
    let name = raw.name.trim().to_owned();
    if name.is_empty() {
        tracing::warn!(%ean, "skipping ledger entry without a product name");
        return None;
    }
    let expiry = raw.expiry.as_deref().and_then(parse_iso_date);
    Some(ProductEntry {
        ean,
        name,
        expiry,
        quantity: raw.quantity,
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Date;

    use super::*;

    fn snapshot_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("ledger.json")
    }

    #[test]
    fn ledger_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = snapshot_path(&dir);

        let mut ledger = Ledger::new();
        ledger.append(ProductEntry {
            ean: EanCode::parse("4006381333931").expect("valid vector"),
            name: "Leite UHT".to_owned(),
            expiry: Some(date!(2025 - 03 - 01)),
            quantity: 2,
        });
        ledger.append(ProductEntry {
            ean: EanCode::parse("7891000100103").expect("valid vector"),
            name: "Achocolatado".to_owned(),
            expiry: None,
            quantity: 1,
        });

        save_ledger_to(&ledger, &path).expect("snapshot write");
        let restored = load_ledger_from(&path);

        assert_eq!(restored.all(), ledger.all());
    }

    #[test]
    fn missing_snapshot_loads_an_empty_ledger() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(load_ledger_from(&snapshot_path(&dir)).is_empty());
    }

    #[test]
    fn malformed_quantity_defaults_to_one() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = snapshot_path(&dir);
        fs::write(
            &path,
            r#"{"entries":[
                {"ean":"4006381333931","name":"a","quantity":"three"},
                {"ean":"7891000100103","name":"b","quantity":0},
                {"ean":"7891000053508","name":"c"}
            ]}"#,
        )
        .expect("test snapshot write");

        let ledger = load_ledger_from(&path);
        let quantities: Vec<u32> = ledger.all().iter().map(|e| e.quantity).collect();
        assert_eq!(quantities, vec![1, 1, 1]);
    }

    #[test]
    fn malformed_date_defaults_to_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = snapshot_path(&dir);
        fs::write(
            &path,
            r#"{"entries":[
                {"ean":"4006381333931","name":"a","expiry":"soon","quantity":1},
                {"ean":"7891000100103","name":"b","expiry":20250301,"quantity":1},
                {"ean":"7891000053508","name":"c","expiry":"2025-03-01","quantity":1}
            ]}"#,
        )
        .expect("test snapshot write");

        let ledger = load_ledger_from(&path);
        let dates: Vec<Option<Date>> = ledger.all().iter().map(|e| e.expiry).collect();
        assert_eq!(dates, vec![None, None, Some(date!(2025 - 03 - 01))]);
    }

    #[test]
    fn rows_failing_admission_are_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = snapshot_path(&dir);
        fs::write(
            &path,
            r#"{"entries":[
                {"ean":"4006381333932","name":"bad check digit","quantity":1},
                {"ean":"4006381333931","name":"   ","quantity":1},
                {"ean":"7891000100103","name":"kept","quantity":1}
            ]}"#,
        )
        .expect("test snapshot write");

        let ledger = load_ledger_from(&path);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.all()[0].name, "kept");
    }

    #[test]
    fn unreadable_snapshot_is_discarded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = snapshot_path(&dir);
        fs::write(&path, "not json").expect("test snapshot write");
        assert!(load_ledger_from(&path).is_empty());
    }
}
