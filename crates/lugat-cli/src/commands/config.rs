//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use lugat_core::Config;

use crate::output::{Output, OutputFormat};

const VALID_KEYS: &str = "data_dir, data_file, site_url, lookup_path, log_file, desktop_shortcut";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "data_file": config.data_file,
                    "site_url": config.site_url,
                    "lookup_path": config.lookup_path,
                    "log_file": config.log_file,
                    "desktop_shortcut": config.desktop_shortcut
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:         {}", config.data_dir.display());
            println!("  data_file:        {}", config.data_file);
            println!("  site_url:         {}", config.site_url);
            println!("  lookup_path:      {}", config.lookup_path);
            println!(
                "  log_file:         {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  desktop_shortcut: {}", config.desktop_shortcut);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "data_file" => {
            if value.trim().is_empty() {
                bail!("data_file cannot be empty");
            }
            config.data_file = value.to_string();
        }
        "site_url" => {
            url::Url::parse(value).with_context(|| format!("Invalid site_url: {}", value))?;
            config.site_url = value.trim_end_matches('/').to_string();
        }
        "lookup_path" => {
            config.lookup_path = format!("/{}/", value.trim_matches('/'));
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "desktop_shortcut" => {
            config.desktop_shortcut = value
                .parse()
                .context("Invalid value for desktop_shortcut. Use 'true' or 'false'.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }
    Ok(())
}
