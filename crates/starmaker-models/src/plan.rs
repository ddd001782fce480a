//! Plan catalog and pricing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Plan tier enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Starter,
    Pro,
    Studio,
}

impl PlanTier {
    /// Parse a plan id (case-insensitive). Unknown ids return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Some(PlanTier::Starter),
            "pro" => Some(PlanTier::Pro),
            "studio" => Some(PlanTier::Studio),
            _ => None,
        }
    }

    /// Get the plan id as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Pro => "pro",
            PlanTier::Studio => "studio",
        }
    }

    /// Catalog entry for this tier.
    pub fn plan(&self) -> &'static SubscriptionPlan {
        match self {
            PlanTier::Starter => &PLAN_CATALOG[0],
            PlanTier::Pro => &PLAN_CATALOG[1],
            PlanTier::Studio => &PLAN_CATALOG[2],
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One purchasable plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub tier: PlanTier,
    /// Payment provider price id
    pub price_id: &'static str,
    pub name: &'static str,
    /// Price in whole US dollars
    pub price_usd: u32,
    pub currency: &'static str,
    pub interval: &'static str,
    pub features: &'static [&'static str],
}

impl SubscriptionPlan {
    /// Look up a plan by id (case-insensitive).
    pub fn lookup(plan_id: &str) -> Option<&'static SubscriptionPlan> {
        PlanTier::parse(plan_id).map(|tier| tier.plan())
    }

    /// Price in the currency's minor unit.
    pub fn amount_cents(&self) -> u64 {
        u64::from(self.price_usd) * 100
    }
}

/// The static plan catalog.
pub static PLAN_CATALOG: [SubscriptionPlan; 3] = [
    SubscriptionPlan {
        tier: PlanTier::Starter,
        price_id: "price_starter",
        name: "Starter",
        price_usd: 9,
        currency: "usd",
        interval: "one-time",
        features: &["1-minute movie", "HD quality", "Basic effects", "3 genres"],
    },
    SubscriptionPlan {
        tier: PlanTier::Pro,
        price_id: "price_pro",
        name: "Pro",
        price_usd: 19,
        currency: "usd",
        interval: "one-time",
        features: &[
            "5-minute movie",
            "4K quality",
            "Advanced effects",
            "All genres",
            "AI co-stars",
            "Priority processing",
        ],
    },
    SubscriptionPlan {
        tier: PlanTier::Studio,
        price_id: "price_studio",
        name: "Studio",
        price_usd: 49,
        currency: "usd",
        interval: "one-time",
        features: &[
            "10-minute movie",
            "4K HDR quality",
            "Premium effects",
            "Custom scripts",
            "Multiple scenes",
            "24/7 support",
        ],
    },
];
