//! Logging and story metrics bootstrap for the service binaries.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::WithExportConfig;
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use std::sync::OnceLock;
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Default OTLP/HTTP collector endpoint.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";

#[cfg(feature = "metrics")]
static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Reads `RUST_LOG` for filtering (default `info`). Setting `LOG_FORMAT=json`
/// switches from human-readable lines to JSON records.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}

/// Where story metrics are shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsExporter {
    /// OTLP over HTTP to a collector
    Otlp {
        /// Collector root, e.g. `http://localhost:4318`
        endpoint: String,
    },
    /// Periodic dumps to stdout
    Stdout,
    /// Metrics are not exported
    Disabled,
}

impl MetricsExporter {
    /// Picks the exporter from `OTEL_EXPORTER` (`otlp`, `stdout` or `none`)
    /// and `OTEL_EXPORTER_OTLP_ENDPOINT`.
    ///
    /// Unset or unrecognised values fall back to stdout.
    ///
    /// ```
    /// use taleweaver_core::MetricsExporter;
    ///
    /// let exporter = MetricsExporter::from_lookup(|key| match key {
    ///     "OTEL_EXPORTER" => Some("otlp".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(
    ///     exporter,
    ///     MetricsExporter::Otlp { endpoint: "http://localhost:4318".to_string() }
    /// );
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = lookup("OTEL_EXPORTER")
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();
        match kind.as_str() {
            "otlp" => MetricsExporter::Otlp {
                endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string()),
            },
            "none" | "off" => MetricsExporter::Disabled,
            "" | "stdout" => MetricsExporter::Stdout,
            other => {
                warn!(exporter = other, "Unknown OTEL_EXPORTER, using stdout");
                MetricsExporter::Stdout
            }
        }
    }
}

/// Start exporting story metrics for `service_name`.
///
/// The exporter comes from [`MetricsExporter::from_lookup`] over the process
/// environment. Without the `metrics` feature this only logs and succeeds.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), String> {
    let exporter = MetricsExporter::from_lookup(|key| std::env::var(key).ok());

    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        info!(?exporter, "Built without the metrics feature, story metrics are not exported");
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        let interval = Duration::from_secs(export_interval_secs.max(1));
        let reader = match &exporter {
            MetricsExporter::Disabled => {
                info!("Story metrics export disabled");
                return Ok(());
            }
            MetricsExporter::Stdout => {
                PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                    .with_interval(interval)
                    .build()
            }
            MetricsExporter::Otlp { endpoint } => {
                let otlp = opentelemetry_otlp::MetricExporter::builder()
                    .with_http()
                    .with_endpoint(endpoint.as_str())
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| format!("Failed to create OTLP exporter for {}: {}", endpoint, e))?;
                PeriodicReader::builder(otlp).with_interval(interval).build()
            }
        };

        let provider = SdkMeterProvider::builder()
            .with_resource(
                Resource::builder_empty()
                    .with_attributes([KeyValue::new("service.name", service_name)])
                    .build(),
            )
            .with_reader(reader)
            .build();

        if METER_PROVIDER.set(provider.clone()).is_err() {
            return Err("Story metrics are already initialized".to_string());
        }
        global::set_meter_provider(provider);
        info!(?exporter, interval_secs = interval.as_secs(), "Story metrics export started");
        Ok(())
    }
}

/// Flush and stop the metrics pipeline started by [`init_observability`].
#[instrument]
pub fn shutdown_observability() {
    #[cfg(feature = "metrics")]
    {
        if let Some(Err(e)) = METER_PROVIDER.get().map(SdkMeterProvider::shutdown) {
            warn!(error = %e, "Story metrics did not flush cleanly");
            return;
        }
    }
    info!("Story metrics stopped");
}
