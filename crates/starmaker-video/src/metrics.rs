//! Video provider call metrics.

use metrics::counter;

pub mod names {
    /// Shared with the other client crates.
    pub const PROVIDER_CALLS_TOTAL: &str = "starmaker_provider_calls_total";

    pub const OUTCOME_LIVE: &str = "live";
    pub const OUTCOME_FALLBACK: &str = "fallback";
    pub const OUTCOME_SIMULATED: &str = "simulated";
}

/// Record one scene attempt.
pub fn record_scene(provider: &'static str, outcome: &'static str) {
    counter!(
        names::PROVIDER_CALLS_TOTAL,
        "client" => "video",
        "provider" => provider,
        "outcome" => outcome
    )
    .increment(1);
}
