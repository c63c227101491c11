use anyhow::Context;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Config and store selection shared with the server binary.
pub async fn load_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    if config.database.url.is_none() {
        eprintln!("Warning: DATABASE_URL is not set, working against an empty in-memory store");
    }
    AppState::from_config(config).await
}
