use std::io::{self, Stderr};

use atty::Stream;
use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{config::LoggingConfig, formatter};

/// Console layer. Пишет в stderr: stdout CLI отдан под данные.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let mut options = config.console.options;
    options.with_ansi = use_ansi(options.with_ansi, atty::is(Stream::Stderr));
    let writer: fn() -> Stderr = io::stderr;
    formatter::build_formatter(config.console_format(), options, writer)
}

/// Цвета только если они разрешены и stderr подключён к терминалу.
fn use_ansi(
    requested: bool,
    stderr_is_tty: bool,
) -> bool {
    requested && stderr_is_tty
}

#[cfg(test)]
mod tests {
    use tracing::info;
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;
    use crate::logging::config::LogFormat;

    /// Слой собирается для всех форматов и логирование не паникует.
    #[test]
    fn test_layer_with_config_all_formats() {
        for format in [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json] {
            let mut cfg = LoggingConfig::default();
            cfg.console.format = format;
            cfg.console.options.with_ansi = false;

            let subscriber = Registry::default().with(layer_with_config::<Registry>(&cfg));
            tracing::subscriber::with_default(subscriber, || {
                info!("console sink smoke test");
            });
        }
    }

    #[test]
    fn test_no_ansi_when_redirected() {
        assert!(use_ansi(true, true));
        assert!(!use_ansi(true, false));
        assert!(!use_ansi(false, true));
    }
}
