use clap::{Parser, error::ErrorKind};
use dotenvy::dotenv;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_redirect_check::{Cli, run_check};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    // The report owns stdout and carries every failure; logging stays silent
    // unless RUST_LOG asks for it, and then goes to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let message = e.to_string();
            let message = message.trim_start_matches("error: ").trim_end();
            println!("✗ ERROR: Invalid configuration: {message}");
            return ExitCode::from(1);
        }
    };

    let config = cli.into_config();
    tracing::debug!("Running redirect check with {:?}", config);

    match run_check(&config, io::stdout().lock()).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!("Redirect check aborted: {}", e);
            ExitCode::from(1)
        }
    }
}
