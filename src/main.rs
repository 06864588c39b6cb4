//! Folio - A static site generator for Markdown blogs.

mod annotate;
mod build;
mod cli;
mod config;
mod content;
mod feed;
mod init;
mod logger;
mod pages;
mod render;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, plan_site, print_routes};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Routes { .. } => plan_site(&config).map(|site| print_routes(&site)),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    // Resolve paths once with defaults to find the config file
    let mut config = SiteConfig::default();
    config.update_with_cli(cli);

    if !cli.is_init() && config.config_path.exists() {
        config = SiteConfig::from_path(&config.config_path)?;
        config.update_with_cli(cli);
    }

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
