//! Запуск внешних программ явным списком аргументов, без shell.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tracing::{debug, info, warn};

use crate::error::{CommandError, UnzipResult};

/// Запускает программы и проверяет код возврата.
///
/// В режиме `check` ненулевой код превращается в
/// [`CommandError::ExternalCommandFailed`]; в режиме `nocheck` он только
/// логируется как warning и возвращается в [`CommandOutput`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRunner {
    nocheck: bool,
    current_dir: Option<PathBuf>,
}

/// Результат завершённой программы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub program: String,
    pub args: Vec<String>,
    /// `None`, если процесс убит сигналом.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandRunner {
    pub fn new(check: bool) -> Self {
        Self {
            nocheck: !check,
            current_dir: None,
        }
    }

    pub fn checked() -> Self {
        Self::new(true)
    }

    pub fn nocheck() -> Self {
        Self::new(false)
    }

    /// Рабочая директория дочерних процессов.
    pub fn with_current_dir<P: Into<PathBuf>>(
        mut self,
        dir: P,
    ) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn is_checked(&self) -> bool {
        !self.nocheck
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Запускает `program` с `args` и ждёт завершения; stdout и stderr
    /// собираются целиком.
    pub fn run<I, S>(
        &self,
        program: impl AsRef<OsStr>,
        args: I,
    ) -> UnzipResult<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command_line = render(program, &args);
        info!("$({command_line})");

        let mut cmd = Command::new(program);
        cmd.args(&args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let Output {
            status,
            stdout,
            stderr,
        } = cmd.output().map_err(|e| CommandError::SpawnFailed {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

        let code = status.code();
        if status.success() {
            debug!("Call {command_line:?} returned 0.");
        } else {
            let err = CommandError::ExternalCommandFailed {
                command: command_line,
                code,
            };
            warn!("{err}");
            if !self.nocheck {
                return Err(err.into());
            }
        }

        Ok(CommandOutput {
            program: program.to_string_lossy().into_owned(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
            code,
            stdout,
            stderr,
        })
    }
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout как текст (невалидный UTF-8 заменяется).
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Командная строка для логов; аргументы с пробелами берутся в кавычки.
fn render(
    program: &OsStr,
    args: &[OsString],
) -> String {
    std::iter::once(program)
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| {
            let part = part.to_string_lossy();
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("{part:?}")
            } else {
                part.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::StatusCode, logging::test_support::capture_logs};

    #[test]
    fn test_success_captures_stdout() {
        let (out, logs) =
            capture_logs(|| CommandRunner::checked().run("sh", ["-c", "echo hello"]).unwrap());

        assert!(out.success());
        assert_eq!(out.stdout_str(), "hello\n");
        assert_eq!(out.program, "sh");
        assert_eq!(out.args, ["-c", "echo hello"]);
        assert!(logs.contains("$(sh -c \"echo hello\")"), "logs: {logs}");
        assert!(logs.contains("returned 0."));
    }

    #[test]
    fn test_nonzero_exit_checked_fails() {
        let err = CommandRunner::checked()
            .run("sh", ["-c", "exit 1"])
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CommandFailed);
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::ExternalCommandFailed { code: Some(1), .. })
        ));
    }

    #[test]
    fn test_nonzero_exit_nocheck_warns() {
        let (out, logs) =
            capture_logs(|| CommandRunner::nocheck().run("sh", ["-c", "exit 3"]).unwrap());

        assert_eq!(out.code, Some(3));
        assert!(!out.success());
        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("returned 3."));
    }

    #[test]
    fn test_stderr_is_captured() {
        let out = CommandRunner::nocheck()
            .run("sh", ["-c", "echo oops >&2; exit 2"])
            .unwrap();
        assert_eq!(out.stderr_str(), "oops\n");
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let err = CommandRunner::nocheck()
            .run("definitely-not-a-real-tool-xyz", std::iter::empty::<&str>())
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SpawnFailed);
    }

    #[test]
    fn test_arguments_are_not_shell_expanded() {
        let out = CommandRunner::checked()
            .run("echo", ["$HOME", "a;b"])
            .unwrap();
        assert_eq!(out.stdout_str(), "$HOME a;b\n");
    }

    #[test]
    fn test_current_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = CommandRunner::checked().with_current_dir(tmp.path());
        assert_eq!(runner.current_dir(), Some(tmp.path()));

        let out = runner.run("pwd", std::iter::empty::<&str>()).unwrap();
        let printed = std::fs::canonicalize(out.stdout_str().trim()).unwrap();
        assert_eq!(printed, std::fs::canonicalize(tmp.path()).unwrap());
    }

    #[test]
    fn test_render_quotes_whitespace() {
        let args = [OsString::from("-c"), OsString::from("exit 1"), OsString::new()];
        assert_eq!(render(OsStr::new("sh"), &args), "sh -c \"exit 1\" \"\"");
    }
}
