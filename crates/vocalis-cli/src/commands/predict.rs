//! `vocalis predict` -- run one prediction offline.
//!
//! Goes through the same [`PredictionService`] as the HTTP endpoint and
//! prints the JSON body the server would have returned.
//!
//! # Example
//!
//! ```text
//! vocalis predict --features '[119.99, 157.30, 74.99, ...]'
//! vocalis predict --input request.json
//! ```

use std::path::PathBuf;

use clap::Args;
use vocalis_services::{ModelStore, PredictionService};

use super::ArtifactArgs;

/// Arguments for the `vocalis predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Feature values as a JSON array.
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    pub features: Option<String>,

    /// File holding a request body (`{"features": [...]}`).
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Build the request body from the arguments.
fn request_body(args: &PredictArgs) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = &args.input {
        return std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()));
    }
    let raw = args.features.as_deref().unwrap_or("[]");
    let features: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("--features is not valid JSON: {e}"))?;
    Ok(serde_json::to_vec(&serde_json::json!({ "features": features }))?)
}

/// Run the `predict` command.
pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = args.artifacts.resolve()?;
    let body = request_body(&args)?;

    let service = PredictionService::new(ModelStore::load(&config.artifacts));
    match service.predict(&body) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.body())?);
            anyhow::bail!("prediction failed (status {})", e.status_code())
        }
    }
}
