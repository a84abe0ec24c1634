//! `vocalis check` -- load the model artifacts and report whether they are
//! usable, without starting a server.

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use vocalis_services::LoadedModel;
use vocalis_types::FEATURE_COUNT;
use vocalis_types::config::ArtifactsConfig;

use super::ArtifactArgs;

/// Arguments for the `vocalis check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Run the `check` command. Fails when either artifact does not load.
pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = args.artifacts.resolve()?;
    let model = LoadedModel::from_paths(&config.artifacts)
        .map_err(|e| anyhow::anyhow!("model artifacts are not usable: {e}"))?;
    println!("{}", summary_table(&config.artifacts, &model));
    Ok(())
}

fn summary_table(paths: &ArtifactsConfig, model: &LoadedModel) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["ARTIFACT", "PATH", "DETAIL"]);
    table.add_row([
        "classifier".to_string(),
        paths.model.display().to_string(),
        model.classifier_kind(),
    ]);
    table.add_row([
        "scaler".to_string(),
        paths.scaler.display().to_string(),
        format!("standard, {FEATURE_COUNT} features"),
    ]);
    table
}
