use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::SchemaService;

/// Schema only depends on configuration, so no store is opened.
pub async fn handle(_output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    config.validate()?;
    let schema = SchemaService::content_schema(&config.content);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
