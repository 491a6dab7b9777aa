//! Application wiring: ledger lifecycle, resolver chain and the interactive
//! scan loop.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use time::{Date, OffsetDateTime};

use crate::domain::{
    Ledger, LedgerError, NameResolution, NameResolver, ScanSession, SessionState,
    CRITICAL_WINDOW_DAYS,
};
use crate::infra::export::{self, ExportError};
use crate::infra::namegen::NameGenClient;
use crate::infra::off::OffClient;
use crate::util::{format_iso_date, parse_iso_date, persistence};

/// External scanner collaborator: yields a raw decoded symbol value, or
/// `None` on timeout/cancel. Camera acquisition lives behind this seam; the
/// CLI implementation reads typed codes from stdin.
pub trait CodeScanner {
    fn next_code(&mut self) -> Option<String>;
}

/// Reads codes typed on stdin; a blank line or EOF ends the scan run.
struct LineScanner;

impl CodeScanner for LineScanner {
    fn next_code(&mut self) -> Option<String> {
        read_line("EAN (blank to finish): ").ok().flatten()
    }
}

pub struct App {
    ledger: Ledger,
}

impl App {
    /// Rehydrates the ledger from the persisted snapshot.
    pub fn load() -> Self {
        Self {
            ledger: persistence::load_ledger(),
        }
    }

    /// Runs scan-to-commit cycles until the user stops submitting codes.
    pub async fn run_scan(&mut self) -> anyhow::Result<()> {
        let remote = OffClient::new().context("building product database client")?;
        let generative = NameGenClient::from_env().context("configuring generative naming")?;
        let resolver = NameResolver::new(remote, generative);
        let mut scanner = LineScanner;
        let mut session = ScanSession::new();

        'cycle: loop {
            let Some(code) = scanner.next_code() else {
                break;
            };
            let ean = match session.submit_code(&code) {
                Ok(ean) => ean,
                Err(error) => {
                    println!("  {error}");
                    continue;
                }
            };

            // A rescanned product keeps the name the user already confirmed.
            if let Some(known) = self.ledger.known_name(&ean).map(str::to_owned) {
                println!("  Known product: {known}");
                if session.accept_name(&known).is_err() {
                    session.note_unresolved();
                }
            } else {
                println!("  Looking up product name...");
                match resolver.resolve(&ean).await {
                    NameResolution::Found(name) => {
                        println!("  Product: {name}");
                        if session.accept_name(&name).is_err() {
                            session.note_unresolved();
                        }
                    }
                    NameResolution::NotFound => {
                        session.note_unresolved();
                        println!("  No name found for this code.");
                    }
                }
            }

            while session.state() == &SessionState::AwaitingManualName {
                let Some(name) = read_line("  Product name (blank to cancel): ")? else {
                    session.cancel();
                    println!("  Scan cancelled.");
                    continue 'cycle;
                };
                if session.accept_name(&name).is_err() {
                    println!("  Name must not be empty.");
                }
            }

            loop {
                let Some(raw) = read_line("  Expiry date YYYY-MM-DD (blank to cancel): ")? else {
                    session.cancel();
                    println!("  Scan cancelled.");
                    continue 'cycle;
                };
                match parse_iso_date(&raw) {
                    Some(date) => {
                        session.set_expiry(date);
                        break;
                    }
                    None => println!("  Not a valid calendar date."),
                }
            }

            loop {
                let Some(raw) = read_line("  Quantity (blank to cancel): ")? else {
                    session.cancel();
                    println!("  Scan cancelled.");
                    continue 'cycle;
                };
                match raw.parse::<u32>() {
                    Ok(quantity) if quantity >= 1 => {
                        session.set_quantity(quantity);
                        break;
                    }
                    _ => println!("  Quantity must be a positive whole number."),
                }
            }

            match session.commit() {
                Ok(entry) => {
                    println!(
                        "  Added {} x{} [{}]",
                        entry.name,
                        entry.quantity,
                        entry.urgency(today()).label()
                    );
                    self.ledger.append(entry);
                    self.flush();
                }
                Err(error) => println!("  Cannot add entry: {error}"),
            }
        }
        Ok(())
    }

    /// Prints the ledger in insertion order with per-entry urgency.
    pub fn print_list(&self) {
        if self.ledger.is_empty() {
            println!("No entries.");
            return;
        }
        let today = today();
        println!(
            "{:<4} {:<14} {:<28} {:>4} {:<12} {}",
            "#", "EAN", "Product", "Qty", "Expiry", "Status"
        );
        for (index, entry) in self.ledger.all().iter().enumerate() {
            let expiry = entry
                .expiry
                .and_then(format_iso_date)
                .unwrap_or_else(|| "-".to_owned());
            println!(
                "{:<4} {:<14} {:<28} {:>4} {:<12} {}",
                index,
                entry.ean,
                entry.name,
                entry.quantity,
                expiry,
                entry.urgency(today).label()
            );
        }
        let alerting = self
            .ledger
            .all()
            .iter()
            .filter(|entry| entry.urgency(today).is_alerting())
            .count();
        if alerting > 0 {
            println!("\n{alerting} item(s) expired or expiring within {CRITICAL_WINDOW_DAYS} days.");
        }
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<(), LedgerError> {
        let removed = self.ledger.remove(index)?;
        self.flush();
        println!("Removed {} ({})", removed.name, removed.ean);
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<(), ExportError> {
        export::export_to_path(&self.ledger, path)?;
        println!("Exported {} entries to {}", self.ledger.len(), path.display());
        Ok(())
    }

    /// Write-through flush after every mutation. The in-memory ledger stays
    /// authoritative when the write fails; the failure is surfaced, not
    /// swallowed.
    fn flush(&self) {
        if let Err(error) = persistence::save_ledger(&self.ledger) {
            tracing::warn!(%error, "write-through ledger flush failed");
            eprintln!("Warning: changes may not be saved ({error})");
        }
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    Ok(if line.is_empty() {
        None
    } else {
        Some(line.to_owned())
    })
}
