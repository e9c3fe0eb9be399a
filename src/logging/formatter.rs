use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::Layer as LayerTrait,
    registry::LookupSpan,
};

use crate::logging::config::{FormatOptions, LogFormat};

/// Строит fmt-слой нужного формата поверх произвольного writer.
///
/// Возвращаем boxed trait-объект, чтобы стереть конкретный тип формата
/// (json/pretty/compact).
pub fn build_formatter<S, W>(
    format: LogFormat,
    options: FormatOptions,
    writer: W,
) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(options.with_target)
            .with_thread_ids(options.with_thread_ids)
            .with_line_number(options.with_line_numbers)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(writer)
            .with_ansi(options.with_ansi)
            .with_target(options.with_target)
            .with_thread_ids(options.with_thread_ids)
            .with_line_number(options.with_line_numbers)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_ansi(options.with_ansi)
            .with_target(options.with_target)
            .with_thread_ids(options.with_thread_ids)
            .with_line_number(options.with_line_numbers)
            .boxed(),
    }
}
