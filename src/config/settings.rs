use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    command::CommandRunner,
    error::SettingsError,
    logging::{LogFormat, LoggingConfig},
};

/// Runtime settings of the `unzip-io` tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Directory for the log file; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    /// Fail on a non-zero exit of an external program.
    pub command_check: bool,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Defaults, then the optional settings file, then `UNZIP_*` variables.
    pub fn load_from(file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            // Значения по умолчанию
            .set_default("log_level", "info")?
            .set_default("log_format", "compact")?
            .set_default("command_check", true)?;

        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(true));
        }

        // Переменные окружения с префиксом UNZIP_
        let cfg = builder
            .add_source(Environment::with_prefix("UNZIP").try_parsing(true))
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.logging_config()
            .validate()
            .map_err(|e| SettingsError::Invalid {
                key: "log_level",
                reason: e.to_string(),
            })
    }

    /// Logging configuration derived from these settings.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig {
            level: self.log_level.to_lowercase(),
            ..LoggingConfig::default()
        };
        config.console.format = self.log_format;
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
            config.file_enabled = true;
        }
        config
    }

    pub fn command_runner(&self) -> CommandRunner {
        CommandRunner::new(self.command_check)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
            log_dir: None,
            command_check: true,
        }
    }
}
