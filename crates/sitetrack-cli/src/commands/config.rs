//! `config` subcommand: inspect and change settings

use anyhow::{bail, Context, Result};

use sitetrack_core::Config;

use crate::output::{Output, OutputFormat};

/// Print the active configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Could not load configuration")?;

    match output.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "config_file": Config::config_file_path(),
                "data_dir": config.data_dir,
                "log_file": config.log_file,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("SiteTrack Configuration");
            println!("  data_dir: {}", config.data_dir.display());
            match &config.log_file {
                Some(path) => println!("  log_file: {}", path.display()),
                None => println!("  log_file: (not set)"),
            }
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Change one configuration key and persist it
pub fn set(key: &str, value: &str, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Could not load configuration")?;

    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "log_file" => {
            // "none" or an empty value clears the override
            config.log_file = match value {
                "" | "none" => None,
                path => Some(path.into()),
            };
        }
        _ => {
            bail!("unknown configuration key '{key}' (expected data_dir or log_file)");
        }
    }

    config.save().context("Could not save configuration")?;

    output.success(&format!("{key} set to {value}"));

    Ok(())
}
