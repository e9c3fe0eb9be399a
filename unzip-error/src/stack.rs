use std::{fmt, panic::Location, sync::Arc};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{ErrorExt, LogLevel, StatusCode};

/// Ошибка с цепочкой пояснений «что делали, когда сломалось».
///
/// Корневая ошибка хранится как `dyn ErrorExt`, пояснения добавляются
/// по мере подъёма через `?` (см. [`ResultExt`](crate::ResultExt)).
/// Клонирование дешёвое: оба поля за `Arc`.
#[derive(Clone)]
pub struct StackError {
    root: Arc<dyn ErrorExt>,
    frames: Arc<[ErrorContext]>,
}

/// Одно пояснение и место в коде, где оно добавлено.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub message: String,
    pub location: Option<&'static Location<'static>>,
}

impl fmt::Display for ErrorContext {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} ({}:{})", self.message, loc.file(), loc.line()),
            None => f.write_str(&self.message),
        }
    }
}

/// Машинно-читаемое описание ошибки для `--log-format json`.
#[cfg(feature = "serde")]
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: StatusCode,
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
}

impl StackError {
    #[track_caller]
    pub fn new<E: ErrorExt>(err: E) -> Self {
        Self {
            root: Arc::new(err),
            frames: Arc::from(Vec::new()),
        }
    }

    /// Добавляет пояснение; место вызова запоминается.
    #[track_caller]
    pub fn context(
        self,
        msg: impl Into<String>,
    ) -> Self {
        let frame = ErrorContext {
            message: msg.into(),
            location: Some(Location::caller()),
        };
        let frames: Vec<ErrorContext> = self.frames.iter().cloned().chain([frame]).collect();
        Self {
            root: self.root,
            frames: frames.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.root.status_code()
    }

    pub fn user_message(&self) -> String {
        self.root.user_message()
    }

    pub fn root(&self) -> &dyn ErrorExt {
        &*self.root
    }

    /// Пояснения от внутреннего к внешнему.
    pub fn contexts(&self) -> &[ErrorContext] {
        &self.frames
    }

    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        self.root.log_fields()
    }

    pub fn downcast_ref<T: ErrorExt>(&self) -> Option<&T> {
        self.root.as_any().downcast_ref()
    }

    pub fn is<T: ErrorExt>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    #[cfg(feature = "serde")]
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.status_code(),
            error_type: self.root.type_name(),
            message: self.user_message(),
            contexts: self.frames.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.status_code().log_level()
    }

    pub fn is_critical(&self) -> bool {
        self.status_code().is_critical()
    }

    /// Код завершения процесса (sysexits).
    pub fn exit_code(&self) -> u8 {
        self.status_code().exit_code()
    }
}

impl fmt::Debug for StackError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let frames: Vec<String> = self.frames.iter().map(ToString::to_string).collect();
        f.debug_struct("StackError")
            .field("root", &self.root.log_message())
            .field("status_code", &self.status_code())
            .field("contexts", &frames)
            .finish()
    }
}

/// `outer: inner: root`, внешнее пояснение первым.
impl fmt::Display for StackError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for frame in self.frames.iter().rev() {
            write!(f, "{}: ", frame.message)?;
        }
        write!(f, "{}", self.root)
    }
}

impl std::error::Error for StackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.root)
    }
}

impl<E: ErrorExt> From<E> for StackError {
    #[track_caller]
    fn from(e: E) -> Self {
        Self::new(e)
    }
}

impl From<StackError> for std::io::Error {
    fn from(e: StackError) -> Self {
        Self::other(e.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
