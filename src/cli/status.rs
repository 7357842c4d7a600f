//! Status command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "orgmap Configuration Status".bold());

    let path = Config::resolve_path(config_path)?;

    match Config::load_at(config_path) {
        Ok(config) => {
            println!("Config file: {}", path.display().to_string().cyan());
            println!();

            match &config.api_host {
                Some(host) => println!("{} Directory API host: {}", "✓".green(), host),
                None => {
                    println!("{} Directory API host not configured", "✗".red());
                    println!("  → Run 'orgmap init' or set ORGMAP_API_HOST");
                }
            }

            if config.api_key.is_some() {
                println!("{} API key configured", "✓".green());
            } else {
                println!("{} API key not configured", "✗".red());
                println!("  → Run 'orgmap init' to configure");
            }

            println!();
            if let Some(format) = &config.preferences.format {
                println!("Default format: {format}");
            }
            if config.preferences.flatten {
                println!("Hierarchy is flattened by default");
            }
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!(
                "{} No configuration found at {}",
                "✗".red(),
                path.display()
            );
            println!("  → Run 'orgmap init' to get started");
        }
        Err(err) => return Err(err),
    }

    Ok(())
}
