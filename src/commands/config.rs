use owo_colors::OwoColorize;
use serde_json::json;

use crate::cli::OutputOptions;
use crate::commands::print_json;
use crate::config::Config;
use crate::error::{Result, TicketDeskError};

/// Show the effective configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    if output.json {
        return print_json(&json!({
            "page_size": config.page_size,
            "backend": config.backend,
            "config_file": path.to_string_lossy(),
            "config_file_exists": path.exists(),
        }));
    }

    let backend = &config.backend;
    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text.push_str(&format!("{}: {}\n\n", "page_size".cyan(), config.page_size));
    text.push_str(&format!("{}:\n", "backend".cyan()));
    text.push_str(&format!("  batch_delay_ms: {}\n", backend.batch_delay_ms));
    text.push_str(&format!("  single_delay_ms: {}\n", backend.single_delay_ms));
    text.push_str(&format!("  create_delay_ms: {}\n", backend.create_delay_ms));
    text.push_str(&format!("  timeout_ms: {}\n", backend.timeout_ms));
    text.push_str(&format!("  max_attempts: {}\n", backend.max_attempts));
    text.push_str(&format!("  base_backoff_ms: {}\n", backend.base_backoff_ms));
    text.push_str(&format!("  max_backoff_ms: {}\n\n", backend.max_backoff_ms));

    let location = if path.exists() {
        format!("Config file: {}", path.display())
    } else {
        format!("Config file: {} (not created, using defaults)", path.display())
    };
    text.push_str(&location.dimmed().to_string());

    println!("{text}");
    Ok(())
}

/// Write the default configuration to the config file
pub fn cmd_config_init(force: bool, output: OutputOptions) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        return Err(TicketDeskError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save()?;

    if output.json {
        print_json(&json!({ "config_file": path.to_string_lossy() }))
    } else {
        println!("Wrote default configuration to {}", path.display().cyan());
        Ok(())
    }
}
