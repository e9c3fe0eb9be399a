use std::{any::Any, path::PathBuf};

use crate::{ErrorExt, StatusCode};

/// Ошибки проверки конфигурации пайплайна.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Ключ конфигурации должен указывать на каталог
    NotADirectory { key: String, path: PathBuf },
    /// Не найден обязательный внешний инструмент
    MissingTool { tool: String },
    /// Конфигурация не разбирается или неполна
    Invalid { reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::NotADirectory { key, path } => {
                write!(f, "Not a directory: {key}={:?}", path.display().to_string())
            }
            Self::MissingTool { tool } => write!(f, "Required tool not found: {tool}"),
            Self::Invalid { reason } => write!(f, "Invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ErrorExt for ConfigError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotADirectory { .. } => StatusCode::NotADirectory,
            Self::MissingTool { .. } => StatusCode::MissingTool,
            Self::Invalid { .. } => StatusCode::InvalidConfig,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
