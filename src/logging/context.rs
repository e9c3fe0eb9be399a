use tracing::Span;

/// Контекст логирования, который компонент получает при создании.
///
/// Обёртка над span: все сообщения компонента привязаны к нему. Сам
/// subscriber ставится один раз через
/// [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone)]
pub struct LogContext {
    span: Span,
}

impl LogContext {
    /// Span с именем компонента, например `"gateway"`.
    pub fn new(component: &'static str) -> Self {
        Self {
            span: tracing::info_span!("unzip_io", component),
        }
    }

    /// Готовый span вызывающего (например, span задачи пайплайна).
    pub fn from_span(span: Span) -> Self {
        Self { span }
    }

    /// Без своего span: события идут в текущий.
    pub fn detached() -> Self {
        Self { span: Span::none() }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Выполняет `f` внутри span.
    pub fn in_scope<F, R>(
        &self,
        f: F,
    ) -> R
    where
        F: FnOnce() -> R,
    {
        self.span.in_scope(f)
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new("io")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::capture_logs;

    #[test]
    fn test_events_carry_component_span() {
        let (_, logs) = capture_logs(|| {
            let ctx = LogContext::new("gateway");
            ctx.in_scope(|| tracing::info!("Opened for read"));
        });
        assert!(logs.contains("unzip_io"), "logs: {logs}");
        assert!(logs.contains("gateway"), "logs: {logs}");
        assert!(logs.contains("Opened for read"));
    }

    #[test]
    fn test_detached_context_still_logs() {
        let (value, logs) = capture_logs(|| LogContext::detached().in_scope(|| {
            tracing::info!("plain event");
            7
        }));
        assert_eq!(value, 7);
        assert!(logs.contains("plain event"));
        assert!(LogContext::detached().span().is_none());
    }
}
