use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "flextime.toml";
const ENV_PREFIX: &str = "FLEXTIME";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ledger file; `-` or unset means stdin/stdout.
    pub file: Option<String>,
    pub log_level: String,
    pub customer_sort: Option<String>,
    pub entry_sort: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: None,
            log_level: "info".to_string(),
            customer_sort: None,
            entry_sort: None,
        }
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX));
        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if let Some(file) = &cli.file {
            settings.file = Some(file.clone());
        }
        if let Some(level) = &cli.log_level {
            settings.log_level = level.clone();
        }
        if cli.debug {
            settings.log_level = "debug".to_string();
        }

        Ok(settings)
    }

    pub fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or(flex::storage::STDIO_FILE_NAME)
    }
}
