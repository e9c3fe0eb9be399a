//! Ошибки по подсистемам и [`GenericError`] для всего остального.

mod command;
mod config;
mod gateway;

use std::{any::Any, fmt, io};

pub use command::CommandError;
pub use config::ConfigError;
pub use gateway::GatewayError;

use crate::{ErrorExt, StackError, StatusCode};

/// Код и текст без отдельного типа; так приходят `bail!(code, ..)` и
/// голые `io::Error`.
#[derive(Debug, Clone)]
pub struct GenericError {
    code: StatusCode,
    message: String,
}

impl GenericError {
    pub fn new(
        code: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenericError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GenericError {}

impl ErrorExt for GenericError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Код статуса для вида ошибки ввода-вывода.
pub fn io_status(kind: io::ErrorKind) -> StatusCode {
    use io::ErrorKind as K;

    match kind {
        K::NotFound => StatusCode::NotFound,
        K::PermissionDenied => StatusCode::PermissionDenied,
        K::AlreadyExists => StatusCode::AlreadyExists,
        K::NotADirectory => StatusCode::NotADirectory,
        K::UnexpectedEof => StatusCode::UnexpectedEof,
        K::Interrupted => StatusCode::Interrupted,
        K::InvalidData => StatusCode::InvalidData,
        _ => StatusCode::Io,
    }
}

impl From<io::Error> for StackError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        Self::new(GenericError::new(io_status(err.kind()), err.to_string()))
    }
}
