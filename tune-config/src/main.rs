use clap::Parser;
use tracing::debug;

use tune_config::cli::{self, Args};
use tune_core::{tune_error, tune_error_hint, TuneError};
use tune_messages::{msg, MESSAGES};

fn main() {
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = tune_logging::init_subscriber();

    let args = Args::parse();
    debug!(version = env!("CARGO_PKG_VERSION"), "Starting engine-tune");

    if let Err(e) = cli::execute(args) {
        tune_error!("{}", msg!(MESSAGES.error_generic, error = format!("{:#}", e)));
        if e
            .downcast_ref::<TuneError>()
            .is_some_and(TuneError::is_permission_denied)
        {
            tune_error_hint!("{}", MESSAGES.readonly_hint);
        }
        std::process::exit(1);
    }
}
