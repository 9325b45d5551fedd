//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE: &str = "tierboard-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Filter for the configured `trace_level`; unparsable directives fall back to `info`.
fn env_filter(config: &Config) -> EnvFilter {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber exporting spans to `<data dir>/tierboard-otlp.json`.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without tracing. Calling this more than once is harmless, only
/// the first subscriber is installed.
///
/// # Example
///
/// ```rust
/// use tierboard::observability::init_tracing;
/// use tierboard::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "tierboard"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("tierboard"));

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_follows_trace_level() {
        let config = Config {
            trace_level: Some("tierboard=trace".to_string()),
            ..Default::default()
        };
        assert_eq!(env_filter(&config).to_string(), "tierboard=trace");
        assert_eq!(env_filter(&Config::default()).to_string(), "info");
    }

    #[test]
    fn bad_trace_level_falls_back_to_info() {
        let config = Config {
            trace_level: Some("tierboard=loud".to_string()),
            ..Default::default()
        };
        assert_eq!(env_filter(&config).to_string(), "info");
    }
}
