pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "content")]
#[command(about = "Majifix content CLI - seed, inspect and export localized content")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Upsert seed contents from SEEDS_PATH or a given file")]
    Seed(commands::seed::SeedArgs),

    #[command(about = "Print the content JSON schema")]
    Schema,

    #[command(about = "Export contents as CSV")]
    Export(commands::export::ExportArgs),

    #[command(about = "Print the normalized record for a JSON candidate")]
    Normalize(commands::normalize::NormalizeArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Seed(args) => commands::seed::handle(args, output_format).await,
        Commands::Schema => commands::schema::handle(output_format).await,
        Commands::Export(args) => commands::export::handle(args, output_format).await,
        Commands::Normalize(args) => commands::normalize::handle(args, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_filters() {
        let cli = Cli::parse_from(["content", "export", "--type", "FAQ", "--output", "out.csv"]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.content_type.as_deref(), Some("FAQ"));
                assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.csv")));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["content", "schema", "--json"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }
}
