//! Canned payment responses.

use chrono::{Duration, Utc};
use starmaker_models::{
    unix_millis, CancelSubscriptionResult, PaymentIntent, PaymentRecord, PlanTier, Subscription,
    SubscriptionPlan,
};

pub const SIMULATED_ACTIVE_SUBSCRIPTION_ID: &str = "sub_simulated_active";

pub fn payment_intent(plan: &SubscriptionPlan) -> PaymentIntent {
    PaymentIntent {
        client_secret: format!("pi_simulated_secret_{}", unix_millis()),
        amount_cents: plan.amount_cents(),
        currency: plan.currency.to_string(),
        status: "requires_payment_method".to_string(),
    }
}

/// New subscription whose period ends in 30 days.
pub fn subscription(plan: &SubscriptionPlan) -> Subscription {
    Subscription {
        subscription_id: format!("sub_simulated_{}", unix_millis()),
        status: "active".to_string(),
        plan_id: plan.tier.as_str().to_string(),
        current_period_end: Utc::now() + Duration::days(30),
        features: features(plan),
    }
}

/// Mid-period Pro subscription.
pub fn active_subscription() -> Subscription {
    let plan = PlanTier::Pro.plan();
    Subscription {
        subscription_id: SIMULATED_ACTIVE_SUBSCRIPTION_ID.to_string(),
        status: "active".to_string(),
        plan_id: plan.tier.as_str().to_string(),
        current_period_end: Utc::now() + Duration::days(15),
        features: features(plan),
    }
}

pub fn cancellation(subscription_id: &str) -> CancelSubscriptionResult {
    CancelSubscriptionResult {
        success: true,
        subscription_id: subscription_id.to_string(),
        status: "cancelled".to_string(),
    }
}

pub fn payment_history() -> Vec<PaymentRecord> {
    let now = Utc::now();
    vec![
        PaymentRecord {
            id: "pi_1".to_string(),
            amount_cents: 1900,
            currency: "usd".to_string(),
            status: "succeeded".to_string(),
            date: now - Duration::days(7),
            description: "Pro Plan - Action Movie".to_string(),
        },
        PaymentRecord {
            id: "pi_2".to_string(),
            amount_cents: 900,
            currency: "usd".to_string(),
            status: "succeeded".to_string(),
            date: now - Duration::days(14),
            description: "Starter Plan - Comedy Movie".to_string(),
        },
    ]
}

fn features(plan: &SubscriptionPlan) -> Vec<String> {
    plan.features.iter().map(|f| f.to_string()).collect()
}
