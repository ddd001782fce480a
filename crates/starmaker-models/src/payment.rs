//! Payment and subscription records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A created payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
    /// Amount in the currency's minor unit
    #[serde(alias = "amount")]
    pub amount_cents: u64,
    pub currency: String,
    pub status: String,
}

/// Outcome of confirming a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PaymentResult {
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error_message: None,
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error_message: Some(message.into()),
        }
    }
}

/// Card details attached to a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub brand: String,
    pub last4: String,
    pub exp_month: u8,
    pub exp_year: u16,
}

/// A tokenized payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
}

/// A subscription on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: String,
    pub status: String,
    pub plan_id: String,
    pub current_period_end: DateTime<Utc>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Result of a cancellation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionResult {
    pub success: bool,
    pub subscription_id: String,
    pub status: String,
}

/// One past payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    #[serde(alias = "amount")]
    pub amount_cents: u64,
    pub currency: String,
    pub status: String,
    pub date: DateTime<Utc>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_accepts_provider_amount_field() {
        let intent: PaymentIntent = serde_json::from_str(
            r#"{"clientSecret":"pi_1_secret","amount":1900,"currency":"usd","status":"requires_payment_method"}"#,
        )
        .unwrap();
        assert_eq!(intent.amount_cents, 1900);
    }

    #[test]
    fn test_payment_result_constructors() {
        let ok = PaymentResult::succeeded("pi_1");
        assert!(ok.success);
        assert_eq!(ok.transaction_id.as_deref(), Some("pi_1"));

        let declined = PaymentResult::declined("Your card was declined.");
        assert!(!declined.success);
        assert!(declined.transaction_id.is_none());
    }
}
