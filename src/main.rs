use chrono::Utc;
use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use taxcalc::{Backend, Console, Session, auth, open_store, report, service};
use tracing::Level;

#[derive(Parser)]
#[command(name = "taxcalc")]
#[command(about = "Tax calculator - property and vehicle tax records with SQLite or in-memory storage")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    store_path: PathBuf,

    /// Where records are kept
    #[arg(short, long, value_enum, default_value_t = Backend::Sqlite)]
    backend: Backend,

    /// Log verbosity written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu session (default)
    Run,

    /// Print the tax summary and exit
    Summary {
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print every stored record as JSON and exit
    Export,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing; stdout belongs to the menus
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level)
        .init();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    if !auth::authenticate(&mut console)? {
        return Ok(());
    }

    let mut store = open_store(cli.backend, &cli.store_path).context("Failed to open record store")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut session = Session::new(store.as_mut(), console);
            session.run().context("Session aborted")?;
        }
        Commands::Summary { json } => {
            let summary = service::summary(store.as_ref())?;
            let out = console.out();
            if json {
                let value = json!({
                    "generated_at": Utc::now().to_rfc3339(),
                    "summary": summary,
                    "total_count": summary.total_count(),
                    "total_tax": summary.total_tax(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                report::write_summary(out, &summary)?;
            }
        }
        Commands::Export => {
            let records = service::all_records(store.as_ref())?;
            writeln!(console.out(), "{}", serde_json::to_string_pretty(&records)?)?;
        }
    }

    Ok(())
}
