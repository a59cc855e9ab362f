pub mod redacting_console_encoder;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::redacting_console_encoder::RedactingConsoleEncoderDeserializer;

/// Environment variable naming an external log4rs configuration file.
pub const LOG_CONFIG_ENV: &str = "WALLET_LOG_CONFIG";
const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Initializes logging.
///
/// Uses the file named by `WALLET_LOG_CONFIG`, else `log4rs.yml` in the
/// working directory, else the embedded defaults.
pub fn init_logging() -> Result<()> {
    let mut deserializers = Deserializers::default();
    deserializers.insert("redacting_console", RedactingConsoleEncoderDeserializer);

    let path = log_config_path(std::env::var_os(LOG_CONFIG_ENV));
    if path.exists() {
        log4rs::init_file(&path, deserializers)
            .with_context(|| format!("Failed to load logging configuration {}", path.display()))?;
        info!(path:% = path.display(); "Logging initialized from external configuration");
        return Ok(());
    }

    let config = embedded_config(&deserializers)?;
    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!(path:% = path.display(); "Logging initialized from embedded defaults (no external configuration found)");
    Ok(())
}

fn log_config_path(configured: Option<OsString>) -> PathBuf {
    configured
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_CONFIG))
}

fn embedded_config(deserializers: &Deserializers) -> Result<Config> {
    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(deserializers);
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {errors:?}"));
    }

    Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")
}

fn reveal_pii() -> bool {
    static REVEAL_PII_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_PII_CACHE.get_or_init(|| {
        std::env::var("REVEAL_PII")
            .map(|v| {
                let val = v.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false)
    })
}

/// Masks a string (like an email) showing only start and end characters.
/// If REVEAL_PII is true, returns the original string.
pub fn mask_string(s: &str) -> String {
    if reveal_pii() {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Returns a redacted placeholder for credentials.
/// If REVEAL_PII is true, returns the actual value.
pub fn mask_secret(secret: &str) -> String {
    if reveal_pii() {
        return secret.to_string();
    }

    "<REDACTED>".to_string()
}
