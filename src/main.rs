//! CLI `unzip-io`
//!
//! Утилиты вокруг pipeline-файлов: конвертация `.json` <-> `.msgpack`,
//! проверка конфигурации, чтение FOFN, проверка выходных файлов и запуск
//! внешних программ с проверкой кода возврата.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use unzip_io::{
    config::{validate_config, PipelineConfig, Settings, ToolValidator},
    error::{LogLevel, SettingsError, StackError},
    exists_and_not_empty, init_logging,
    logging::LogFormat,
    read_fofn, CommandRunner, Gateway, LogContext, LoggingHandle,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("UNZIP_GIT_COMMIT"),
    "\nbuilt:  ",
    env!("UNZIP_BUILD_TIME"),
);

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "unzip-io")]
#[command(version = env!("CARGO_PKG_VERSION"), long_version = LONG_VERSION)]
#[command(about = "Serialization, FOFN and process helpers for the unzip pipeline", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Файл настроек (toml/json/yaml)
    #[arg(
        short,
        long,
        global = true,
        env = "UNZIP_SETTINGS",
        help = "Settings file; UNZIP_* variables override it"
    )]
    settings: Option<PathBuf>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
    /// Подавить большинство логов (только warn/error)
    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Log warnings and errors only"
    )]
    quiet: bool,
    /// Формат логов
    #[arg(long, global = true, value_enum, help = "Log line format")]
    log_format: Option<LogFormatArg>,
    /// Подкоманда для выполнения
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Подкоманды CLI
#[derive(Subcommand)]
enum Commands {
    /// Прочитать файл и записать в другой (формат по суффиксу)
    Convert {
        #[arg(help = "Input .json or .msgpack file")]
        input: PathBuf,
        #[arg(help = "Output .json or .msgpack file; parent directories are created")]
        output: PathBuf,
    },
    /// Проверить smrt_bin и внешние инструменты
    #[command(name = "validate-config")]
    ValidateConfig {
        #[arg(help = "Pipeline config (.json or .msgpack) with a smrt_bin key")]
        path: PathBuf,
        #[arg(
            long,
            help = "Search path for tools, in $PATH syntax (defaults to $PATH)"
        )]
        search_path: Option<String>,
    },
    /// Напечатать абсолютные пути из FOFN
    Fofn {
        #[arg(help = "File of file names")]
        path: PathBuf,
    },
    /// Код 0, если файл существует и не пуст
    Check {
        #[arg(help = "File to check")]
        path: PathBuf,
    },
    /// Запустить программу с проверкой кода возврата
    Run {
        #[arg(long, help = "Log a non-zero exit as a warning instead of failing")]
        nocheck: bool,
        #[arg(required = true, help = "Program to run")]
        program: String,
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            help = "Arguments, passed as-is"
        )]
        args: Vec<String>,
    },
}

/// Точка входа в CLI
fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(78);
        }
    };

    let logging = match init_logging(settings.logging_config()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(70);
        }
    };

    let code = match handle_command(&cli, &settings) {
        Ok(code) => {
            debug!(code, "Command finished");
            ExitCode::from(code)
        }
        Err(e) => report(&e, settings.log_format),
    };

    shutdown(logging);
    code
}

fn load_settings(cli: &Cli) -> Result<Settings, SettingsError> {
    let mut settings = Settings::load_from(cli.settings.as_deref())?;
    if cli.quiet {
        settings.log_level = "warn".to_string();
    } else if cli.verbose {
        settings.log_level = "debug".to_string();
    }
    if let Some(format) = cli.log_format {
        settings.log_format = format.into();
    }
    Ok(settings)
}

/// Обработчик выполнения команд; возвращает код завершения.
fn handle_command(
    cli: &Cli,
    settings: &Settings,
) -> Result<u8> {
    let gateway = Gateway::new(LogContext::new("cli"));

    match &cli.command {
        Commands::Convert { input, output } => {
            let value = gateway
                .read(input)
                .with_context(|| format!("convert: reading {}", input.display()))?;
            gateway
                .write(output, &value)
                .with_context(|| format!("convert: writing {}", output.display()))?;
            Ok(0)
        }
        Commands::ValidateConfig { path, search_path } => {
            let config = PipelineConfig::load(&gateway, path)?;
            let tools = match search_path {
                Some(var) => ToolValidator::from_path_var(var),
                None => ToolValidator::from_env(),
            };
            let found = validate_config(&config, Some(path.as_path()), &tools)?;
            let mut stdout = io::stdout().lock();
            for tool in found {
                writeln!(stdout, "{}", tool.display())?;
            }
            Ok(0)
        }
        Commands::Fofn { path } => {
            let paths = read_fofn(path)?;
            let mut stdout = io::stdout().lock();
            for path in paths {
                writeln!(stdout, "{}", path.display())?;
            }
            Ok(0)
        }
        Commands::Check { path } => Ok(if exists_and_not_empty(path) { 0 } else { 1 }),
        Commands::Run {
            nocheck,
            program,
            args,
        } => {
            let runner = if *nocheck {
                CommandRunner::nocheck()
            } else {
                settings.command_runner()
            };
            let output = runner.run(program, args)?;
            io::stdout().write_all(&output.stdout)?;
            io::stderr().write_all(&output.stderr)?;
            // killed by a signal: same convention as the shell
            Ok(output.code.map_or(128, |c| c.clamp(0, 255) as u8))
        }
    }
}

/// Печатает ошибку и выбирает код завершения.
fn report(
    err: &anyhow::Error,
    format: LogFormat,
) -> ExitCode {
    let Some(stack) = err.downcast_ref::<StackError>() else {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    };

    let fields = stack.log_fields();
    let status = stack.status_code();
    match stack.log_level() {
        LogLevel::Error => error!(%status, ?fields, "{err:#}"),
        LogLevel::Warn => warn!(%status, ?fields, "{err:#}"),
        LogLevel::Info => info!(%status, ?fields, "{err:#}"),
        LogLevel::Debug | LogLevel::Trace => debug!(%status, ?fields, "{err:#}"),
    }
    match format {
        LogFormat::Json => match serde_json::to_string(&stack.to_report()) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("Error: {err:#}"),
        },
        _ => eprintln!("Error: {err:#}"),
    }
    ExitCode::from(stack.exit_code())
}

fn shutdown(handle: LoggingHandle) {
    handle.flush();
    handle.shutdown();
}
