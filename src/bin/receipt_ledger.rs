use std::{fs::OpenOptions, io, path::Path, process::ExitCode, sync::Arc};

use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use receipt_ledger::{AlertType, Args, Config, LedgerStore, TerminalPrompt, run};

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_file);

    let config = Config::from_args(&args);

    let mut store = match LedgerStore::open(&config.db_path) {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Could not open the database at {:?}: {error}", config.db_path);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    let alert = run(
        args.command,
        &config,
        &mut store,
        TerminalPrompt::stdio(),
        &mut stdout,
    );

    let exit_code = match &alert {
        Some(alert) if alert.alert_type == AlertType::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    };

    if let Some(alert) = alert {
        eprintln!("{}", alert.to_ansi_string());
    }

    if let Err(error) = store.close() {
        tracing::error!("Could not close the database: {error}");
        return ExitCode::FAILURE;
    }

    exit_code
}

fn setup_logging(log_path: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(env_filter);

    let debug_log = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .with_filter(filter::LevelFilter::DEBUG),
        ),
        Err(error) => {
            eprintln!("Could not open the log file {log_path:?}: {error}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();
}
