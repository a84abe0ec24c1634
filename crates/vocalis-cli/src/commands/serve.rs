//! `vocalis serve` -- load the model and serve predictions over HTTP.
//!
//! # Lifecycle
//!
//! ```text
//! 1. Load config, apply flag overrides
//! 2. Load the model artifacts into a ModelStore (ready or unavailable)
//! 3. Bail out if fail-fast is set and loading failed
//! 4. Bind the listener and serve the router
//! 5. Wait for Ctrl+C, then drain in-flight requests and exit
//! ```
//!
//! # Example
//!
//! ```text
//! vocalis serve
//! vocalis serve --port 8080 --model models/svc.json --scaler models/scaler.json
//! vocalis serve --config vocalis.json --fail-fast
//! ```

use clap::Args;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vocalis_services::api::{ApiState, build_router};
use vocalis_services::{ModelStore, PredictionService};
use vocalis_types::config::ServerConfig;

use super::ArtifactArgs;

/// Arguments for the `vocalis serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Bind address (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Exit instead of serving when the artifacts fail to load.
    #[arg(long)]
    pub fail_fast: bool,
}

fn apply_server_overrides(server: &mut ServerConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        server.host = host.clone();
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if args.fail_fast {
        server.fail_fast = true;
    }
}

/// Run the `serve` command.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = args.artifacts.resolve()?;
    apply_server_overrides(&mut config.server, &args);

    let store = ModelStore::load(&config.artifacts);
    if let ModelStore::Unavailable { reason } = &store {
        if config.server.fail_fast {
            anyhow::bail!("model artifacts failed to load: {reason}");
        }
        warn!("serving without a model; every prediction will return an error");
    }

    let state = ApiState::new(PredictionService::new(store));
    let router = build_router(state, &config.server.cors_origins);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    info!(%addr, "prediction server listening; press Ctrl+C to stop");

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => warn!("failed to listen for Ctrl+C: {e}"),
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut server = ServerConfig::default();
        let args = ServeArgs {
            host: Some("127.0.0.1".into()),
            port: Some(8080),
            fail_fast: true,
            ..Default::default()
        };
        apply_server_overrides(&mut server, &args);
        assert_eq!(server.bind_addr(), "127.0.0.1:8080");
        assert!(server.fail_fast);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let mut server = ServerConfig {
            fail_fast: true,
            ..Default::default()
        };
        apply_server_overrides(&mut server, &ServeArgs::default());
        assert_eq!(server.bind_addr(), "0.0.0.0:5000");
        assert!(server.fail_fast);
    }

    #[tokio::test]
    async fn fail_fast_refuses_missing_artifacts() {
        let args = ServeArgs {
            artifacts: ArtifactArgs {
                config: None,
                model: Some("/nonexistent/vocalis/model.json".into()),
                scaler: Some("/nonexistent/vocalis/scaler.json".into()),
            },
            port: Some(0),
            fail_fast: true,
            ..Default::default()
        };
        let err = run(args).await.unwrap_err();
        assert!(err.to_string().contains("model artifacts failed to load"));
    }
}
