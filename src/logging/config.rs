use std::{collections::BTreeMap, env, fs, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::LoggingError;

/// Формат строки лога.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Периодичность ротации файла лога.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Опции форматирования, общие для консоли и файла.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormatOptions {
    #[serde(default)]
    pub with_ansi: bool,
    #[serde(default = "default_true")]
    pub with_target: bool,
    #[serde(default)]
    pub with_thread_ids: bool,
    #[serde(default)]
    pub with_line_numbers: bool,
}

/// Вывод в консоль (stderr: stdout занят данными CLI).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "FormatOptions::console")]
    pub options: FormatOptions,
}

/// Вывод в файл через non-blocking writer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default = "FormatOptions::file")]
    pub options: FormatOptions,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Базовый уровень: trace/debug/info/warn/error/off
    #[serde(default = "default_level")]
    pub level: String,
    /// Уровни для отдельных модулей, например `unzip_io::command = "debug"`
    #[serde(default)]
    pub module_levels: BTreeMap<String, String>,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_true")]
    pub console_enabled: bool,
    #[serde(default)]
    pub file_enabled: bool,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub file: FileConfig,
}

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl FormatOptions {
    /// `with_ansi` здесь означает «можно»: консольный sink включает цвета
    /// только для терминала.
    pub fn console() -> Self {
        Self {
            with_ansi: true,
            with_target: true,
            with_thread_ids: false,
            with_line_numbers: false,
        }
    }

    pub fn file() -> Self {
        Self {
            with_ansi: false,
            with_target: true,
            with_thread_ids: true,
            with_line_numbers: true,
        }
    }
}

impl LoggingConfig {
    /// Переопределения из окружения: `UNZIP_LOG_LEVEL`, `UNZIP_LOG_FORMAT`,
    /// `UNZIP_LOG_DIR` (последняя включает файловый вывод).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("UNZIP_LOG_LEVEL") {
            self.level = level.to_lowercase();
        }
        if let Ok(format) = env::var("UNZIP_LOG_FORMAT") {
            if let Ok(format) = LogFormat::from_str(&format) {
                self.console.format = format;
            }
        }
        if let Ok(dir) = env::var("UNZIP_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
            self.file_enabled = true;
        }
    }

    /// Проверяет уровни и имя файла.
    pub fn validate(&self) -> Result<(), LoggingError> {
        check_level("level", &self.level)?;
        for (module, level) in &self.module_levels {
            if module.is_empty() {
                return Err(LoggingError::Invalid {
                    key: "module_levels",
                    reason: "empty module name".to_string(),
                });
            }
            check_level("module_levels", level)?;
        }
        if self.file_enabled && self.file.filename.trim().is_empty() {
            return Err(LoggingError::Invalid {
                key: "file.filename",
                reason: "file logging enabled without a file name".to_string(),
            });
        }
        Ok(())
    }

    /// Создаёт каталог для логов, если включён файловый вывод.
    pub fn ensure_log_dir(&self) -> Result<(), LoggingError> {
        if self.file_enabled && self.file.enabled {
            fs::create_dir_all(&self.log_dir).map_err(|source| LoggingError::LogDir {
                path: self.log_dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Директива для `EnvFilter`, например `info,unzip_io::command=debug`.
    pub fn build_filter_directive(&self) -> String {
        let mut directive = self.level.clone();
        for (module, level) in &self.module_levels {
            directive.push_str(&format!(",{module}={level}"));
        }
        directive
    }

    pub fn console_format(&self) -> LogFormat {
        self.console.format
    }
}

fn check_level(
    key: &'static str,
    level: &str,
) -> Result<(), LoggingError> {
    if LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(LoggingError::Invalid {
            key,
            reason: format!("unknown level {level:?}"),
        })
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::Invalid {
                key: "format",
                reason: format!("unknown log format {other:?}"),
            }),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: LogFormat::Compact,
            options: FormatOptions::console(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: default_filename(),
            format: LogFormat::Compact,
            rotation: Rotation::Daily,
            options: FormatOptions::file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            module_levels: BTreeMap::new(),
            log_dir: default_log_dir(),
            console_enabled: true,
            file_enabled: false,
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_filename() -> String {
    "unzip-io.log".to_string()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LoggingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_filter_directive(), "info");
        assert!(!cfg.file_enabled);
    }

    #[test]
    fn test_directive_with_module_levels() {
        let mut cfg = LoggingConfig::default();
        cfg.module_levels
            .insert("unzip_io::command".to_string(), "debug".to_string());
        cfg.module_levels
            .insert("unzip_io::fofn".to_string(), "warn".to_string());
        assert_eq!(
            cfg.build_filter_directive(),
            "info,unzip_io::command=debug,unzip_io::fofn=warn"
        );
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let cfg = LoggingConfig {
            level: "chatty".to_string(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_validate_rejects_empty_filename() {
        let mut cfg = LoggingConfig {
            file_enabled: true,
            ..Default::default()
        };
        cfg.file.filename = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    /// Переменные окружения перекрывают значения конфигурации.
    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("UNZIP_LOG_LEVEL", "DEBUG");
        env::set_var("UNZIP_LOG_FORMAT", "json");
        env::set_var("UNZIP_LOG_DIR", "/tmp/unzip-logs");

        let mut cfg = LoggingConfig::default();
        cfg.apply_env_overrides();

        env::remove_var("UNZIP_LOG_LEVEL");
        env::remove_var("UNZIP_LOG_FORMAT");
        env::remove_var("UNZIP_LOG_DIR");

        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.console.format, LogFormat::Json);
        assert_eq!(cfg.log_dir, PathBuf::from("/tmp/unzip-logs"));
        assert!(cfg.file_enabled);
    }

    #[test]
    fn test_ensure_log_dir_creates_when_file_enabled() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            file_enabled: true,
            log_dir: tmp.path().join("nested/logs"),
            ..Default::default()
        };
        cfg.ensure_log_dir().unwrap();
        assert!(cfg.log_dir.is_dir());
    }
}
