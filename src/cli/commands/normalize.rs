use anyhow::Context;
use chrono::Utc;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::content::{derive_seed_criteria, normalize, validate};
use crate::database::models::{Content, ContentInput};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[arg(help = "JSON file holding a single content candidate")]
    pub file: PathBuf,
}

/// Dry run of the write path: defaults, normalization and validation, no store.
pub async fn handle(args: NormalizeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    config.validate()?;
    let locales = &config.content.locales;

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let input: ContentInput =
        serde_json::from_str(&raw).with_context(|| format!("invalid content in {}", args.file.display()))?;

    let criteria = derive_seed_criteria(&input, locales);
    let content = normalize(
        Content::from_input(input, &config.content.default_type, Utc::now()),
        locales,
    );
    let validation = validate(&content, &config.content);

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "content": content,
                    "criteria": criteria.to_json(locales),
                    "valid": validation.is_ok(),
                    "error": validation.as_ref().err().map(ToString::to_string),
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(&content)?);
            if let Err(e) = &validation {
                eprintln!("Invalid: {}", e);
            }
        }
    }
    Ok(())
}
