//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::client::DirectoryClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the directory API host and key, verifies access with a
/// single listing read, and saves the configuration.
pub async fn run(config_path: Option<&str>, api_host_flag: Option<String>) -> Result<()> {
    println!("{}", "Welcome to orgmap!".bold().green());
    println!("Let's point it at your organization directory API.\n");

    let existing = Config::load_at(config_path).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let suggested_host = api_host_flag.or_else(|| existing.api_host.clone());
    let mut host_prompt = Input::<String>::with_theme(&theme).with_prompt("Directory API host");
    if let Some(host) = suggested_host {
        host_prompt = host_prompt.default(host);
    }
    let api_host: String = host_prompt.interact_text()?;

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your API key")
        .interact()?;

    println!("\n{}", "Checking API access...".cyan());
    let client = DirectoryClient::new(api_host.clone(), api_key.clone())?;
    client
        .read("/orgs", &[("page".to_string(), "1".to_string())])
        .await?;
    println!("{}", "✓ Directory API reachable!".green());

    let config = Config {
        api_host: Some(api_host),
        api_key: Some(api_key),
        preferences: existing.preferences,
    };
    config.save_at(config_path)?;

    let path = Config::resolve_path(config_path)?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "orgmap status".cyan());
    println!(
        "  {} - Pull and score the organization forest",
        "orgmap ingest".cyan()
    );

    Ok(())
}
