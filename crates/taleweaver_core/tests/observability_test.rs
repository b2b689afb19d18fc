use std::collections::HashMap;
use taleweaver_core::{DEFAULT_OTLP_ENDPOINT, MetricsExporter};

fn exporter(vars: &[(&str, &str)]) -> MetricsExporter {
    let vars: HashMap<&str, &str> = vars.iter().copied().collect();
    MetricsExporter::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
}

#[test]
fn test_stdout_is_the_default_exporter() {
    assert_eq!(exporter(&[]), MetricsExporter::Stdout);
    assert_eq!(exporter(&[("OTEL_EXPORTER", "stdout")]), MetricsExporter::Stdout);
    assert_eq!(exporter(&[("OTEL_EXPORTER", "prometheus")]), MetricsExporter::Stdout);
}

#[test]
fn test_otlp_endpoint_selection() {
    assert_eq!(
        exporter(&[("OTEL_EXPORTER", "OTLP")]),
        MetricsExporter::Otlp {
            endpoint: DEFAULT_OTLP_ENDPOINT.to_string()
        }
    );
    assert_eq!(
        exporter(&[
            ("OTEL_EXPORTER", "otlp"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", " http://collector:4318 "),
        ]),
        MetricsExporter::Otlp {
            endpoint: "http://collector:4318".to_string()
        }
    );
}

#[test]
fn test_export_can_be_disabled() {
    assert_eq!(exporter(&[("OTEL_EXPORTER", "none")]), MetricsExporter::Disabled);
}
