use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation as AppenderRotation},
};
use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::{
    error::LoggingError,
    logging::{
        config::{LoggingConfig, Rotation},
        formatter,
    },
};

pub type FileLayer<S> = (Box<dyn LayerTrait<S> + Send + Sync>, WorkerGuard);

/// File layer поверх non-blocking writer.
///
/// `WorkerGuard` нужно держать до конца работы процесса, иначе хвост лога
/// не будет сброшен на диск.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Result<FileLayer<S>, LoggingError>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let rotation = match config.file.rotation {
        Rotation::Hourly => AppenderRotation::HOURLY,
        Rotation::Daily => AppenderRotation::DAILY,
        Rotation::Never => AppenderRotation::NEVER,
    };
    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(config.file.filename.as_str())
        .build(&config.log_dir)?;
    let (writer, guard) = non_blocking(appender);

    let layer = formatter::build_formatter(config.file.format, config.file.options, writer);
    Ok((layer, guard))
}
