use std::any::Any;

use crate::{ErrorExt, StatusCode};

/// Ошибки запуска внешних программ.
#[derive(Debug, Clone)]
pub enum CommandError {
    /// Программа завершилась с ненулевым кодом (или по сигналу, `code =
    /// None`)
    ExternalCommandFailed { command: String, code: Option<i32> },
    /// Программу не удалось запустить
    SpawnFailed { command: String, reason: String },
}

impl std::fmt::Display for CommandError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::ExternalCommandFailed {
                command,
                code: Some(code),
            } => write!(f, "Call {command:?} returned {code}."),
            Self::ExternalCommandFailed {
                command,
                code: None,
            } => write!(f, "Call {command:?} was terminated by a signal."),
            Self::SpawnFailed { command, reason } => {
                write!(f, "Failed to start {command:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl ErrorExt for CommandError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ExternalCommandFailed { .. } => StatusCode::CommandFailed,
            Self::SpawnFailed { .. } => StatusCode::SpawnFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn log_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("error_type", "command".to_string()),
            ("status_code", self.status_code().to_string()),
        ];
        match self {
            Self::ExternalCommandFailed { command, code } => {
                fields.push(("command", command.clone()));
                if let Some(code) = code {
                    fields.push(("exit_code", code.to_string()));
                }
            }
            Self::SpawnFailed { command, .. } => fields.push(("command", command.clone())),
        }
        fields
    }
}
