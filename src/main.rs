use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use valida_facil::app::App;

#[derive(Parser)]
#[command(
    name = "valida-facil",
    version,
    about = "Track perishable stock by EAN-13 barcode and expiry date"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan products interactively and commit them to the ledger
    Scan,
    /// Show the ledger with expiry warnings
    List,
    /// Delete one entry by its list index
    Remove { index: usize },
    /// Export the ledger to a CSV spreadsheet, ordered by expiry
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut app = App::load();
    match cli.command {
        Command::Scan => app.run_scan().await?,
        Command::List => app.print_list(),
        Command::Remove { index } => app.remove_entry(index)?,
        Command::Export { path } => app.export_csv(&path)?,
    }
    Ok(())
}
