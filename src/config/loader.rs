use std::{collections::HashMap, fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::defaults::AppConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../resources/config.toml")
}

/// Loads the configuration file, creating it with defaults on first run.
///
/// Environment variables prefixed with `WALLET_` override file values, with
/// `__` separating nesting levels (`WALLET_API__BASE_URL`).
pub fn load_configuration(path: &Path) -> Result<AppConfig> {
    load_with_environment(path, None)
}

fn load_with_environment(path: &Path, environment: Option<HashMap<String, String>>) -> Result<AppConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let cfg = Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            Environment::with_prefix("WALLET")
                .prefix_separator("_")
                .separator("__")
                .source(environment),
        )
        .build()
        .context("Could not build config")?;

    let config: AppConfig = cfg.try_deserialize().context("Invalid configuration")?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}
