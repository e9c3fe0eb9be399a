use tracing_appender::non_blocking::WorkerGuard;

/// Владелец фонового writer-а файлового лога.
///
/// Возвращается из [`init_logging`](super::init_logging). CLI держит его до
/// конца `main` и вызывает [`shutdown`](Self::shutdown), чтобы хвост лога
/// успел попасть на диск.
#[must_use = "dropping the handle stops the file writer"]
pub struct LoggingHandle {
    file_guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    pub fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self { file_guard }
    }

    /// Пишется ли лог ещё и в файл.
    pub fn has_file_sink(&self) -> bool {
        self.file_guard.is_some()
    }

    /// Отметка в логе перед завершением; данные сбрасывает `WorkerGuard`.
    pub fn flush(&self) {
        tracing::debug!(file_sink = self.has_file_sink(), "Flushing logs");
    }

    /// Останавливает файловый writer, дождавшись записи очереди.
    pub fn shutdown(mut self) {
        if let Some(guard) = self.file_guard.take() {
            tracing::debug!("Stopping log file writer");
            drop(guard);
        }
    }
}

impl Drop for LoggingHandle {
    fn drop(&mut self) {
        if self.file_guard.is_some() {
            eprintln!("WARNING: logging stopped without shutdown(); the log file may be cut short");
        }
    }
}
