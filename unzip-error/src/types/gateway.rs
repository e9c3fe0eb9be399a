use std::{any::Any, io, path::PathBuf};

use crate::{io_status, ErrorExt, StatusCode};

/// Ошибки чтения/записи значений через файл (`.msgpack` / `.json`).
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// Суффикс пути не соответствует ни одному формату
    UnsupportedFormat { path: PathBuf },
    /// Входной файл отсутствует
    NotFound { path: PathBuf },
    /// Содержимое не декодируется выбранным форматом
    Decode {
        path: PathBuf,
        format: &'static str,
        reason: String,
    },
    /// Значение не представимо в выбранном формате
    Encode {
        path: PathBuf,
        format: &'static str,
        reason: String,
    },
    /// Сбой файловой системы (права, диск заполнен и т.п.)
    Io {
        path: PathBuf,
        operation: &'static str,
        kind: io::ErrorKind,
        reason: String,
    },
}

impl GatewayError {
    /// Строит ошибку из `io::Error`; `NotFound` выделяется в отдельный
    /// вариант.
    pub fn from_io(
        path: impl Into<PathBuf>,
        operation: &'static str,
        err: &io::Error,
    ) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            kind => Self::Io {
                path,
                operation,
                kind,
                reason: err.to_string(),
            },
        }
    }

    /// Путь, к которому относится ошибка.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::UnsupportedFormat { path }
            | Self::NotFound { path }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => {
                write!(f, "Unknown extension for {:?}", path.display().to_string())
            }
            Self::NotFound { path } => write!(f, "No such file: {}", path.display()),
            Self::Decode {
                path,
                format,
                reason,
            } => write!(f, "Failed to decode {} as {format}: {reason}", path.display()),
            Self::Encode {
                path,
                format,
                reason,
            } => write!(
                f,
                "Failed to encode value for {} as {format}: {reason}",
                path.display()
            ),
            Self::Io {
                path,
                operation,
                reason,
                ..
            } => write!(f, "Failed to {operation} {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for GatewayError {}

impl ErrorExt for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedFormat { .. } => StatusCode::UnsupportedFormat,
            Self::NotFound { .. } => StatusCode::NotFound,
            Self::Decode { .. } => StatusCode::DecodingFailed,
            Self::Encode { .. } => StatusCode::EncodingFailed,
            Self::Io { kind, .. } => io_status(*kind),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn log_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("error_type", "gateway".to_string()),
            ("status_code", self.status_code().to_string()),
            ("path", self.path().display().to_string()),
        ];

        match self {
            Self::Decode { format, .. } | Self::Encode { format, .. } => {
                fields.push(("format", format.to_string()));
            }
            Self::Io { operation, .. } => {
                fields.push(("operation", operation.to_string()));
            }
            _ => {}
        }

        fields
    }
}
