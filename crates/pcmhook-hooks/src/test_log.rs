//! Captures `tracing` output emitted while a closure runs.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct SharedBufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self.buf.lock().expect("buffer lock poisoned");
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBufferWriter {
    type Writer = SharedBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log_buf = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(SharedBufferWriter {
            buf: Arc::clone(&log_buf),
        })
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);

    let logs = String::from_utf8(log_buf.lock().expect("buffer lock poisoned").clone())
        .expect("logs should be valid UTF-8");
    (value, logs)
}
