//! Ingest command implementation

use std::time::Duration;

use indicatif::ProgressBar;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::DirectoryClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::org::{OrgTreeBuilder, flatten_forest};
use crate::output::json::{self, OrgEntry};
use crate::output::table;

/// Organization row for table display
#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "ORG ID")]
    id: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "PARENT")]
    parent: String,
    #[tabled(rename = "CHILDREN")]
    children: usize,
    #[tabled(rename = "ACCOUNTS")]
    accounts: usize,
    #[tabled(rename = "USERS")]
    users: usize,
    #[tabled(rename = "SCORE")]
    support_score: u64,
}

impl From<&OrgEntry> for OrgRow {
    fn from(entry: &OrgEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            kind: entry.kind.to_string(),
            parent: entry
                .parent
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            children: entry.children.len(),
            accounts: entry.accounts.len(),
            users: entry.users.len(),
            support_score: entry.support_score,
        }
    }
}

/// Run the ingest command
pub async fn run(
    format: OutputFormat,
    flatten: bool,
    api_host: Option<&str>,
    config_path: Option<&str>,
) -> Result<()> {
    let config = Config::load_at(config_path)?;
    config.validate_auth()?;

    let host = config.resolved_host(api_host)?;
    let api_key = config.api_key.clone().ok_or(ConfigError::MissingApiKey)?;

    let client = DirectoryClient::new(host, api_key)?;
    let builder = OrgTreeBuilder::new(client);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Ingesting organization directory...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = builder.build().await;
    spinner.finish_and_clear();
    let mut forest = outcome?;

    let should_flatten = flatten || config.preferences.flatten;
    if should_flatten {
        forest = flatten_forest(forest);
    }

    let entries = json::forest_to_entries(&forest);

    match format {
        OutputFormat::Table => {
            let rows: Vec<OrgRow> = entries.iter().map(OrgRow::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&entries)?);
        }
    }

    Ok(())
}
