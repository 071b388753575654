use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total report queries executed. Labels: op, status.
pub const QUERIES_TOTAL: &str = "roomcal_queries_total";

/// Histogram: query latency in seconds. Labels: op.
pub const QUERY_DURATION_SECONDS: &str = "roomcal_query_duration_seconds";

// ── Data quality ────────────────────────────────────────────────

/// Counter: records rejected by validation. Labels: rule.
pub const VALIDATION_FAILURES_TOTAL: &str = "roomcal_validation_failures_total";

/// Counter: bookings resolved to an existing room by name convention instead
/// of `roomName`, once per query that resolves them.
pub const CONVENTION_LINKS_TOTAL: &str = "roomcal_convention_links_total";

/// Install the Prometheus recorder. No-op if disabled.
///
/// Returns the handle used to render the exposition text.
pub fn init(enabled: bool) -> Option<PrometheusHandle> {
    if !enabled {
        return None;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("failed to install Prometheus recorder: {e}");
            None
        }
    }
}

/// Label for an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    TotalOccupancy,
    RoomOccupancy,
    Availability,
    Pricing,
}

impl Op {
    pub fn label(&self) -> &'static str {
        match self {
            Op::TotalOccupancy => "total_occupancy",
            Op::RoomOccupancy => "room_occupancy",
            Op::Availability => "availability",
            Op::Pricing => "pricing",
        }
    }
}

/// Record one finished query.
pub fn record_query(op: Op, ok: bool, elapsed: std::time::Duration) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(QUERIES_TOTAL, "op" => op.label(), "status" => status).increment(1);
    metrics::histogram!(QUERY_DURATION_SECONDS, "op" => op.label()).record(elapsed.as_secs_f64());
}
