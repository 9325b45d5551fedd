//! Background worker thread for board exports.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `export`: Markdown rendering and file writing
//! - `handler`: Worker implementation and message processing logic

pub mod export;
pub mod handler;
pub mod messages;

pub use export::{export_file_name, write_export, BoardExport, ExportTier};
pub use handler::TierboardWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
