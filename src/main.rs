use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config = Config::load_or_create(args.common().home().path())?;
    let locale = config.resolve_locale(args.common().locale());
    debug!("Using locale {locale}");
    let mut store = config.open_store(locale)?;

    let _: () = match args.command() {
        Command::Add(add_args) => commands::add(&mut store, add_args.clone())?.print(),
        Command::Delete(delete_args) => commands::delete(&mut store, delete_args.clone())?.print(),
        Command::Update(update_args) => commands::update(&mut store, update_args.clone())?.print(),
        Command::List => commands::list(&store).print(),
        Command::Breakdown(breakdown_args) => {
            commands::breakdown(&mut store, breakdown_args.clone()).print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => {
            // Without RUST_LOG, only the library and the binary log at the requested level.
            EnvFilter::new(format!(
                "expense_tracker={},{}={}",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
