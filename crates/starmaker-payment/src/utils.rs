//! Plan lookups and display helpers.

use starmaker_models::{PaymentMethod, SubscriptionPlan};

/// Format an amount in minor units, e.g. `1900, "usd"` → `$19.00`.
pub fn format_currency(amount_cents: u64, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let amount = format!("{}.{:02}", group_thousands(amount_cents / 100), amount_cents % 100);

    match code.as_str() {
        "USD" => format!("${}", amount),
        "EUR" => format!("€{}", amount),
        "GBP" => format!("£{}", amount),
        _ => format!("{} {}", code, amount),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Features of a plan; empty for unknown ids.
pub fn plan_features(plan_id: &str) -> Vec<&'static str> {
    SubscriptionPlan::lookup(plan_id)
        .map(|plan| plan.features.to_vec())
        .unwrap_or_default()
}

/// Price in whole dollars; 0 for unknown ids.
pub fn plan_price(plan_id: &str) -> u32 {
    SubscriptionPlan::lookup(plan_id)
        .map(|plan| plan.price_usd)
        .unwrap_or(0)
}

/// A usable method carries a card with its last four digits.
pub fn validate_payment_method(method: &PaymentMethod) -> bool {
    method
        .card
        .as_ref()
        .is_some_and(|card| !card.last4.trim().is_empty())
}
