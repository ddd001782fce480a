//! Provider call metrics.
//!
//! Every client call is counted with the path it took: a live provider
//! answer, a fallback after a live failure, or simulation because no
//! credential is configured.

use metrics::counter;

/// Metric name and label constants.
pub mod names {
    /// Total client calls by client, provider and outcome.
    pub const PROVIDER_CALLS_TOTAL: &str = "starmaker_provider_calls_total";

    pub const OUTCOME_LIVE: &str = "live";
    pub const OUTCOME_FALLBACK: &str = "fallback";
    pub const OUTCOME_SIMULATED: &str = "simulated";
}

/// Record one client call.
pub fn record_call(client: &'static str, provider: &'static str, outcome: &'static str) {
    counter!(
        names::PROVIDER_CALLS_TOTAL,
        "client" => client,
        "provider" => provider,
        "outcome" => outcome
    )
    .increment(1);
}
