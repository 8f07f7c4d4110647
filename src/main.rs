//! shoplist - Shopping List
//!
//! Reads commands from standard input and applies them to the saved shopping
//! list. Every change is written back to the local snapshot immediately.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;

use shoplist::application::App;
use shoplist::infrastructure::{Config, FileStore, SnapshotStore};
use shoplist::presentation::{InputHandler, Outcome, render_list};

/// Command line arguments. Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(name = "shoplist")]
#[command(about = "Keep a shopping list with a running total and a spending limit")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory the list is saved in
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Spending limit in pounds
    #[arg(short, long, value_name = "AMOUNT")]
    limit: Option<Decimal>,

    /// Address to put in the email link
    #[arg(short, long, value_name = "ADDRESS")]
    email: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the shoplist command.
///
/// Loads configuration, mounts the saved list, and processes commands until
/// `quit` or end of input, then saves the list one last time.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or standard input or
/// output fail.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(limit) = args.limit {
        config.spending_limit = limit;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(address) = args.email {
        config.email_recipient = Some(address);
    }
    config.validate()?;

    let store = FileStore::new(config.data_dir());
    info!(path = %store.path().display(), "using list snapshot");

    let mut app = App::mount(store, config.spending_limit());
    app.email_recipient = config.email_recipient.clone();

    let res = run_app(&mut app);
    app.unmount();
    res?;

    Ok(())
}

/// Main command loop.
///
/// # Errors
///
/// Returns an IO error if reading input or writing output fails.
fn run_app<S: SnapshotStore>(app: &mut App<S>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in render_list(app) {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout, "Type `help` for commands")?;

    for line in stdin.lock().lines() {
        match InputHandler::handle_line(app, &line?) {
            Outcome::Quit => break,
            Outcome::Continue(output) => {
                for line in output {
                    writeln!(stdout, "{line}")?;
                }
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("SHOPLIST_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("shoplist=debug")
        } else {
            EnvFilter::new("shoplist=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
