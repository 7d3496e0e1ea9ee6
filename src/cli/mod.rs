//! CLI module for the organization setup wizard
//!
//! Provides subcommands for driving the wizard against a console admin API:
//! - `policy`: show the password rules derived from the server's policy
//! - `create`: create an organization and its first administrator

pub mod create;
pub mod policy;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::admin::{HttpAdminClient, HttpClient};
use crate::infrastructure::logging;

/// Organization setup - provision an organization and its first administrator
#[derive(Parser)]
#[command(name = "org-setup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Admin API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the password rules derived from the server's complexity policy
    Policy,

    /// Create an organization and its first administrator
    Create(create::CreateArgs),
}

/// Load configuration and install logging
fn init(api_url: Option<String>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(url) = api_url {
        config.admin_api.base_url = url;
    }

    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    Ok(config)
}

fn admin_client(config: &AppConfig) -> anyhow::Result<HttpAdminClient<HttpClient>> {
    let http = match config.admin_api.timeout() {
        Some(timeout) => HttpClient::with_timeout(timeout)?,
        None => HttpClient::new(),
    };

    let client = HttpAdminClient::new(http, &config.admin_api.base_url);

    Ok(match &config.admin_api.token {
        Some(token) => client.with_token(token),
        None => client,
    })
}

/// Run the selected subcommand
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = init(cli.api_url)?;

    match cli.command {
        Command::Policy => policy::run(&config).await,
        Command::Create(args) => create::run(&config, args).await,
    }
}
