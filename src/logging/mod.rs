pub mod config;
pub mod context;
mod filters;
mod formatter;
pub mod handle;
pub mod sinks;
#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConsoleConfig, FileConfig, FormatOptions, LogFormat, LoggingConfig, Rotation};
pub use context::LogContext;
pub use handle::LoggingHandle;
use tracing_subscriber::{
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::error::LoggingError;

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Инициализация логирования с конфигурацией.
///
/// Устанавливает глобальный subscriber; повторный вызов возвращает
/// [`LoggingError::Init`]. Окружение здесь не читается: `UNZIP_LOG_*` уже
/// учтены в [`Settings`](crate::config::Settings), либо вызывающий применяет
/// [`LoggingConfig::apply_env_overrides`] сам.
pub fn init_logging(config: LoggingConfig) -> Result<LoggingHandle, LoggingError> {
    config.validate()?;
    config.ensure_log_dir()?;

    let env_filter = filters::build_filter_from_config(&config);
    let mut layers: Vec<Box<dyn Layer<FilteredRegistry> + Send + Sync>> = Vec::new();

    // Console layer
    if config.console_enabled && config.console.enabled {
        layers.push(sinks::console::layer_with_config(&config));
    }

    // File layer
    let file_guard = if config.file_enabled && config.file.enabled {
        let (file_layer, guard) = sinks::file::layer_with_config(&config)?;
        layers.push(file_layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        log_dir = %config.log_dir.display(),
        console_enabled = config.console_enabled,
        file_enabled = config.file_enabled,
        "Logging system initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}
