//! Worker thread implementation for board exports.
//!
//! File writes run on the Zellij worker thread so the plugin never blocks its
//! render loop on disk I/O. Trace context travels with each message so worker
//! spans join the trace of the key press that requested the export.

use crate::domain::error::Result;
use crate::infrastructure::display_path;
use crate::worker::export::{write_export, BoardExport};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Stateless apart from the export counter, which only feeds log fields.
#[derive(Serialize, Deserialize, Default)]
pub struct TierboardWorker {
    #[serde(skip)]
    exports_written: usize,
}

impl TierboardWorker {
    /// Helper for handling operation results with consistent logging.
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Handles the `ExportBoard` message.
    fn handle_export_board(&mut self, board: &BoardExport, export_dir: &str) -> WorkerResponse {
        let now = chrono::Utc::now();

        Self::handle_result(
            "export board",
            write_export(Path::new(export_dir), board, now),
            |path: PathBuf| {
                self.exports_written += 1;
                tracing::debug!(
                    path = %path.display(),
                    exports_written = self.exports_written,
                    "export written"
                );
                WorkerResponse::Exported {
                    path: display_path(&path),
                }
            },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response for the plugin.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message");
        let _guard = span.entered();

        match message {
            WorkerMessage::ExportBoard { board, export_dir, .. } => self.handle_export_board(&board, &export_dir),
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Uses the default configuration; the worker never sees plugin options.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for TierboardWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("Malformed worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::ExportTier;

    fn board() -> BoardExport {
        BoardExport {
            tiers: vec![ExportTier { label: "S".into(), titles: vec!["Heat".into()] }],
            pool: vec!["Cats".into()],
        }
    }

    #[test]
    fn export_message_writes_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().into_owned();
        let mut worker = TierboardWorker::default();

        let response = worker.handle_message(WorkerMessage::export_board(board(), dir.clone()));

        let WorkerResponse::Exported { path } = response else {
            panic!("expected export, got {response:?}");
        };
        assert!(path.starts_with(&dir));
        assert!(std::fs::read_to_string(&path).unwrap().contains("1. Heat"));
        assert_eq!(worker.exports_written, 1);
    }

    #[test]
    fn export_failure_becomes_error_response() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut worker = TierboardWorker::default();

        let response =
            worker.handle_message(WorkerMessage::export_board(board(), blocker.to_string_lossy().into_owned()));

        assert!(matches!(response, WorkerResponse::Error { message } if message.starts_with("export board")));
    }
}
