//! Config validation CLI tool
//!
//! Validates a GutWise prompts configuration file and reports any errors.

use gutwise_util::{default_config_path, format_duration};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a GutWise prompts configuration file.");
            eprintln!();
            eprintln!("Default config location: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match gutwise_config::load_config(&config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", gutwise_config::CURRENT_CONFIG_VERSION);
            println!("  Data directory: {}", config.store.data_dir.display());
            println!("  Prompts: {}", config.prompts.len());

            if !config.prompts.is_empty() {
                println!();
                println!("Prompts:");
                for prompt in &config.prompts {
                    let not_now = prompt
                        .not_now
                        .map(|d| format!(", not now {}", format_duration(d)))
                        .unwrap_or_default();
                    println!(
                        "  - {} ({}): every {}, dismiss {}{}",
                        prompt.id,
                        prompt.label,
                        format_duration(prompt.min_interval),
                        format_duration(prompt.default_dismiss),
                        not_now
                    );
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                gutwise_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                gutwise_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                gutwise_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                gutwise_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        gutwise_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
