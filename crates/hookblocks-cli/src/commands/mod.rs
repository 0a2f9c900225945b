//! CLI command definitions and dispatch.

pub mod cache;
pub mod config;
pub mod migrate;
pub mod records;
pub mod render;

use clap::{Parser, Subcommand};

use hookblocks_core::config::AppConfig;
use hookblocks_core::error::AppError;
use hookblocks_service::AppContext;

use crate::output::OutputFormat;

/// HookBlocks: content blocks bound to named hooks
#[derive(Debug, Parser)]
#[command(name = "hookblocks", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record management
    Records(records::RecordsArgs),
    /// Run a content render cycle and fire hooks
    Render(render::RenderArgs),
    /// Active-record snapshot management
    Cache(cache::CacheArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Apply database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Records(args) => {
                let ctx = build_context(config).await?;
                records::execute(args, &ctx, self.format).await
            }
            Commands::Render(args) => {
                let ctx = build_context(config).await?;
                render::execute(args, &ctx, self.format).await
            }
            Commands::Cache(args) => {
                let ctx = build_context(config).await?;
                cache::execute(args, &ctx, self.format).await
            }
            Commands::Config(args) => config::execute(args, &config, &self.config, self.format),
            Commands::Migrate => migrate::execute(&config).await,
        }
    }
}

/// Helper: wire the application context from configuration
async fn build_context(config: AppConfig) -> Result<AppContext, AppError> {
    AppContext::build(config).await
}
