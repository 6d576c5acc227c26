//! Runtime configuration loading.
//!
//! Precedence, lowest first: built-in defaults and the plain environment
//! variables read by `AppConfig::from_env`, then `config/<environment>.toml`,
//! then `RENTAL__*` variables (`RENTAL__SERVER__PORT=9000`).

use config::{Config, ConfigError, File};
use rent_shared::config::{AppConfig, Environment};

const ENV_PREFIX: &str = "RENTAL";

/// Layer file and prefixed environment sources over `base`
pub fn load_with_base(base: &AppConfig, config_dir: &str) -> Result<AppConfig, ConfigError> {
    let environment: Environment = base.environment;

    Config::builder()
        .add_source(Config::try_from(base)?)
        .add_source(File::with_name(&format!("{}/{}", config_dir, environment.as_str())).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        )
        .build()?
        .try_deserialize::<AppConfig>()
}

/// Load configuration for the server binary
///
/// ## Errors
/// Returns an error if a source cannot be read, the merged result does not
/// deserialize, or the configuration must not be used to start the server.
pub fn load() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = load_with_base(&AppConfig::from_env(), "config")?;

    let problems = config.startup_problems();
    if !problems.is_empty() {
        anyhow::bail!("Refusing to start: {}", problems.join("; "));
    }
    Ok(config)
}
