use std::sync::{Arc, Mutex};
use symcheck_core::storage::log_persist_skipped;
use symcheck_core::StorageError;

#[test]
fn test_persist_skipped_emits_structured_log() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let buffer_clone = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(move || MockWriter(buffer_clone.clone()))
        .finish();

    let err = StorageError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "disk full",
    ));
    tracing::subscriber::with_default(subscriber, || {
        log_persist_skipped(&err);
    });

    let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();

    assert!(output.contains("\"event\":\"symcheck.history.persist_skipped\""));
    assert!(output.contains("\"action\":\"skipped\""));
    assert!(output.contains("disk full"));
    assert!(output.contains("\"level\":\"WARN\""));
}

struct MockWriter(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
