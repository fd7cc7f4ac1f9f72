//! `poparse` - parse vendor purchase orders and proforma invoices from the
//! command line.
//!
//! Parsed results go to stdout (or `-o`); logs and progress go to stderr so
//! the JSON output can be piped straight into the persistence layer.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, clients, config, parse};

/// Extract line items and GST totals from vendor POs and proforma invoices
/// (xlsx, xls, ods, csv or text PDF)
#[derive(Parser)]
#[command(name = "poparse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output from the parsers (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file (default: <config dir>/poparse/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single spreadsheet, CSV or PDF document
    Parse(parse::ParseArgs),

    /// Parse every document matching a glob
    Batch(batch::BatchArgs),

    /// List configured client profiles
    Clients(clients::ClientsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

impl Cli {
    async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config.as_deref();
        match self.command {
            Commands::Parse(args) => parse::run(args, config_path).await,
            Commands::Batch(args) => batch::run(args, config_path).await,
            Commands::Clients(args) => clients::run(args, config_path).await,
            Commands::Config(args) => config::run(args, config_path).await,
        }
    }
}

/// Directive for the poparse crates at a given `-v` count. Dependencies
/// stay at `warn`.
fn log_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,poparse={level},poparse_core={level}")
}

/// Install the stderr subscriber. `RUST_LOG` overrides `-v` when set.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    cli.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_scopes_verbosity_to_poparse() {
        assert_eq!(log_directive(0), "warn,poparse=warn,poparse_core=warn");
        assert_eq!(log_directive(2), "warn,poparse=debug,poparse_core=debug");
        assert_eq!(log_directive(7), "warn,poparse=trace,poparse_core=trace");
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["poparse", "-vv", "clients"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Clients(_)));
    }
}
