//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. An optional `otp.toml` / `otp.yaml` / `otp.json` file (or the path given)
//! 3. `OTP_`-prefixed environment variables, `__` separating nested keys
//!    (`OTP_DATABASE__URL`, `OTP_OTP__EXPIRES_MINUTES`, `OTP_MAIL__HOST`)
//!
//! A `.env` file is loaded into the environment first when present.

use config::{Config, Environment as EnvSource, File};
use otp_shared::AppConfig;
use tracing::debug;

use crate::InfrastructureError;

const DEFAULT_CONFIG_FILE: &str = "otp";

/// Load configuration from `otp.*` and the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    load_config_from(None)
}

/// Load configuration, reading `path` instead of the default `otp.*` file
///
/// An explicit path must exist; the default file is optional.
pub fn load_config_from(path: Option<&str>) -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config: AppConfig = Config::builder()
        .add_source(file)
        .add_source(
            EnvSource::with_prefix("OTP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .and_then(|built| built.try_deserialize())
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    debug!(
        table = %config.otp.table,
        "Loaded configuration"
    );

    Ok(config)
}
