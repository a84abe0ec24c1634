//! `vocalis` -- CLI binary for the acoustic classifier service.
//!
//! Provides the following subcommands:
//!
//! - `vocalis serve` -- Load the model artifacts and serve `POST /predict`.
//! - `vocalis check` -- Load the model artifacts and report whether they are usable.
//! - `vocalis predict` -- Run a single prediction offline.
//! - `vocalis features` -- List the expected feature order.

use clap::{Parser, Subcommand};

mod commands;

/// vocalis acoustic classifier CLI.
#[derive(Parser)]
#[command(name = "vocalis", about = "vocalis acoustic classifier service", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP prediction server.
    Serve(commands::serve::ServeArgs),

    /// Load the model artifacts and report their status.
    Check(commands::check::CheckArgs),

    /// Run one prediction without starting a server.
    Predict(commands::predict::PredictArgs),

    /// List the features the model expects, in order.
    Features,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    // Logs go to stderr so `predict` output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Check(args) => commands::check::run(args)?,
        Commands::Predict(args) => commands::predict::run(args)?,
        Commands::Features => commands::features::run(),
    }

    Ok(())
}
