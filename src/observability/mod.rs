//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces are written to `<data dir>/tierboard-otlp.json` in OTLP JSON format,
//! one batch per line. The file rotates at 10 MB and keeps 3 backups.
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `info`. It accepts full `EnvFilter` directives such as
//! `tierboard::board=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
