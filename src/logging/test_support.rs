//! Буферный writer для тестов, проверяющих вывод логов.

use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing_subscriber::{filter::LevelFilter, fmt, fmt::MakeWriter, prelude::*, Registry};

#[derive(Clone, Default)]
pub struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

pub struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

impl VecMakeWriter {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl<'a> MakeWriter<'a> for VecMakeWriter {
    type Writer = VecWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        VecWriterGuard(self.0.clone())
    }
}

impl io::Write for VecWriterGuard {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Выполняет `f` под временным subscriber-ом уровня TRACE и возвращает
/// результат вместе с текстом логов.
pub fn capture_logs<F, R>(f: F) -> (R, String)
where
    F: FnOnce() -> R,
{
    let writer = VecMakeWriter::default();
    let layer = fmt::layer()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_filter(LevelFilter::TRACE);
    let subscriber = Registry::default().with(layer);

    let out = tracing::subscriber::with_default(subscriber, f);
    (out, writer.contents())
}
