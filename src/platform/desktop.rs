// Desktop bootstrap: env_logger plus a properties file

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::app;
use crate::config::PidginConfig;

const DEFAULT_CONFIG_PATH: &str = "pidgin.properties";

/// Read tuning from the properties file (path overridable by the first CLI
/// argument) and start the game. Config errors exit the process.
pub fn run() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = PidginConfig::from_file(&config_path)
        .with_context(|| format!("loading config {config_path}"))?;

    app::run(config, PathBuf::from("assets"))
}
