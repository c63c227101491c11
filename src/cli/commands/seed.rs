use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::{load_state, output_success};
use crate::cli::OutputFormat;
use crate::services::{SeedLoader, SeedOutcome};

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, help = "Seed file (JSON or YAML). Defaults to contents.{json,yaml,yml} under SEEDS_PATH")]
    pub file: Option<PathBuf>,
}

pub async fn handle(args: SeedArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = load_state().await?;

    let candidates = match &args.file {
        Some(path) => SeedLoader::load_file(path)?,
        None => SeedLoader::load_dir(&state.config.seed.path)?,
    };

    let outcomes = state.contents.seed(candidates).await?;
    let created = outcomes
        .iter()
        .filter(|o| matches!(o, SeedOutcome::Created(_)))
        .count();
    let updated = outcomes.len() - created;

    output_success(
        &output_format,
        &format!("Seeded {} contents ({} created, {} updated)", outcomes.len(), created, updated),
        Some(json!({ "created": created, "updated": updated })),
    )
}
