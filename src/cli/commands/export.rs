use anyhow::Context;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::{load_state, output_success};
use crate::cli::OutputFormat;
use crate::filter::ListQuery;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(long = "type", help = "Only export contents of this type")]
    pub content_type: Option<String>,

    #[arg(long, help = "Only export contents of this jurisdiction id")]
    pub jurisdiction: Option<String>,

    #[arg(long, help = "Write to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

pub async fn handle(args: ExportArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = load_state().await?;
    let query = ListQuery {
        content_type: args.content_type,
        jurisdiction: args.jurisdiction,
        ..Default::default()
    };
    let csv = state.contents.export_csv(&query).await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &csv).with_context(|| format!("failed to write {}", path.display()))?;
            output_success(
                &output_format,
                &format!("Exported contents to {}", path.display()),
                Some(json!({ "file": path.display().to_string() })),
            )
        }
        None => {
            print!("{}", csv);
            Ok(())
        }
    }
}
