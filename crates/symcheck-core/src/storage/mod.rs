pub mod export;
pub mod schema;
pub mod store;

pub use store::Store;

use crate::errors::StorageError;

/// For callers that choose to drop a failed history write rather than block
/// the result already shown to the user.
pub fn log_persist_skipped(err: &StorageError) {
    tracing::warn!(
        event = "symcheck.history.persist_skipped",
        error = %err,
        action = "skipped",
        "history write failed, result not persisted: {}", err
    );
}
