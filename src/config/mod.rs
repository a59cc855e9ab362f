//! Application configuration: TOML file, `WALLET_*` environment overrides
//! and command line overrides, in increasing order of precedence.

mod defaults;
mod loader;

pub use defaults::{ApiSettings, AppConfig, ConfigOverrides, CredentialSettings, RetrySettings};
pub use loader::{get_default_config, load_configuration, write_config_to};
