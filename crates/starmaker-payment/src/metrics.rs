//! Payment API call metrics.

use metrics::counter;

pub mod names {
    pub const PROVIDER_CALLS_TOTAL: &str = "starmaker_provider_calls_total";

    pub const OUTCOME_LIVE: &str = "live";
    pub const OUTCOME_FALLBACK: &str = "fallback";
    pub const OUTCOME_SIMULATED: &str = "simulated";
}

pub fn record_call(operation: &'static str, outcome: &'static str) {
    counter!(
        names::PROVIDER_CALLS_TOTAL,
        "client" => operation,
        "provider" => "payments",
        "outcome" => outcome
    )
    .increment(1);
}
