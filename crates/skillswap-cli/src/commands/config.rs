use anyhow::{Context, Result};
use colored::Colorize;
use skillswap_core::config::ClientConfig;
use skillswap_infrastructure::ConfigService;
use skillswap_infrastructure::config_service::API_URL_ENV;

pub fn show(service: &ConfigService, config: &ClientConfig) -> Result<()> {
    let path = service.config_path()?;
    let state = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("{}", format!("# {}{}", path.display(), state).bright_black());
    if std::env::var(API_URL_ENV).is_ok() {
        println!("{}", format!("# api_url overridden by {}", API_URL_ENV).bright_black());
    }
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

pub fn init(service: &ConfigService) -> Result<()> {
    let path = service.config_path()?;
    if path.exists() {
        println!("{}", format!("Config already exists: {}", path.display()).yellow());
        return Ok(());
    }
    let path = service.save_config(&ClientConfig::default())?;
    println!("{}", format!("Wrote {}", path.display()).green());
    Ok(())
}
