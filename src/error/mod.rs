use thiserror::Error;

pub use unzip_error::{
    bail, ensure, CommandError, ConfigError, ErrorExt, GatewayError, GenericError, LogLevel,
    ResultExt, StackError, StatusCode, UnzipResult,
};

pub type CodecResult<T> = Result<T, CodecError>;

/// Ошибки одного вызова кодека; путь добавляет gateway.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("msgpack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    #[error("msgpack decode error: {trailing} trailing bytes after the value")]
    MsgPackTrailing { trailing: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ошибки установки tracing subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid logging setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Cannot create log directory {}: {source}", path.display())]
    LogDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("Logging already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Ошибки сборки настроек.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Config source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
