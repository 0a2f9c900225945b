//! Configuration inspection commands.

use clap::{Args, Subcommand};

use hookblocks_core::config::AppConfig;
use hookblocks_core::error::AppError;
use hookblocks_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, defaults, and environment)
    Show,
    /// Check the configuration for values the runtime would reject
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.store.database.url = mask_password(&shown.store.database.url);
            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => {
                    output::print_kv("cache.provider", &shown.cache.provider);
                    output::print_kv(
                        "registry.snapshot_ttl",
                        &format!("{}s", shown.registry.snapshot_ttl_seconds),
                    );
                    output::print_kv(
                        "registry.notice_ttl",
                        &format!("{}s", shown.registry.notice_ttl_seconds),
                    );
                    output::print_kv(
                        "registry.priority",
                        &shown.registry.default_priority.to_string(),
                    );
                    output::print_kv("store.provider", &shown.store.provider);
                    output::print_kv(
                        "store.seed_file",
                        shown.store.seed_file.as_deref().unwrap_or("-"),
                    );
                    output::print_kv("store.database", &shown.store.database.url);
                    output::print_kv(
                        "logging",
                        &format!("{} ({})", shown.logging.level, shown.logging.format),
                    );
                }
            }
        }
        ConfigCommand::Validate => {
            let problems = validate(config);
            if problems.is_empty() {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
            } else {
                for problem in &problems {
                    output::print_error(problem);
                }
                return Err(AppError::configuration(format!(
                    "{} problem(s) in '{config_path}'",
                    problems.len()
                )));
            }
        }
    }

    Ok(())
}

/// Collect every value the runtime would refuse
fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if !matches!(config.cache.provider.as_str(), "memory" | "redis") {
        problems.push(format!("cache.provider '{}' is not memory or redis", config.cache.provider));
    }
    if !matches!(config.store.provider.as_str(), "memory" | "postgres") {
        problems.push(format!(
            "store.provider '{}' is not memory or postgres",
            config.store.provider
        ));
    }
    if config.registry.snapshot_ttl_seconds == 0 {
        problems.push("registry.snapshot_ttl_seconds must be positive".to_string());
    }
    if config.registry.notice_ttl_seconds == 0 {
        problems.push("registry.notice_ttl_seconds must be positive".to_string());
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        problems.push(format!("logging.format '{}' is not json or pretty", config.logging.format));
    }
    if let Some(seed) = &config.store.seed_file {
        if config.store.provider == "memory" && !std::path::Path::new(seed).exists() {
            problems.push(format!("store.seed_file '{seed}' does not exist"));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_unknown_providers_are_reported() {
        let mut config = AppConfig::default();
        config.cache.provider = "memcached".to_string();
        config.store.provider = "sqlite".to_string();
        config.registry.snapshot_ttl_seconds = 0;
        assert_eq!(validate(&config).len(), 3);
    }
}
