use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Metric descriptions are registered on the first call only.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "seo_sitemap_generated_total",
            Unit::Count,
            "Total number of sitemap documents rendered, labelled by kind."
        );
        describe_histogram!(
            "seo_sitemap_entries",
            Unit::Count,
            "Number of entries collected per sitemap document."
        );
        describe_counter!(
            "seo_robots_generated_total",
            Unit::Count,
            "Total number of robots.txt documents rendered."
        );
        describe_counter!(
            "seo_meta_resolved_total",
            Unit::Count,
            "Total number of meta bundles resolved, labelled by source."
        );
        describe_counter!(
            "seo_structured_data_composed_total",
            Unit::Count,
            "Total number of structured data lists composed."
        );
        describe_counter!(
            "seo_analysis_total",
            Unit::Count,
            "Total number of page analyses run."
        );
        describe_histogram!(
            "seo_analysis_score",
            Unit::Count,
            "Distribution of page analysis scores."
        );
        describe_counter!(
            "seo_http_requests_total",
            Unit::Count,
            "Total number of HTTP requests, labelled by route family and status class."
        );
        describe_histogram!(
            "seo_http_request_duration_ms",
            Unit::Milliseconds,
            "HTTP request latency per route family."
        );
    });
}
