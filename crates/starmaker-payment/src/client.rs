//! Payment backend client.
//!
//! Every operation has a canned counterpart. The canned response is used
//! when no secret key is configured and when a live call fails for a
//! provider-side reason. Unknown plans and card declines are always
//! reported to the caller.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use starmaker_models::{
    CancelSubscriptionResult, PaymentIntent, PaymentMethod, PaymentRecord, PaymentResult,
    Subscription, SubscriptionPlan,
};
use tracing::{debug, info, warn};

use crate::config::PaymentConfig;
use crate::error::{PaymentClientResult, PaymentError};
use crate::metrics::{names, record_call};
use crate::simulation;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateIntentRequest<'a> {
    plan_id: &'a str,
    amount: u64,
    currency: &'a str,
    movie_data: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmRequest<'a> {
    payment_intent_id: &'a str,
    payment_method: &'a PaymentMethod,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubscriptionRequest<'a> {
    plan_id: &'a str,
    payment_method: &'a PaymentMethod,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfirmResponse {
    success: Option<bool>,
    transaction_id: Option<String>,
    payment_intent: Option<ConfirmedIntent>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ConfirmedIntent {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PaymentHistoryResponse {
    #[serde(default)]
    payments: Vec<PaymentRecord>,
}

/// Authenticated payment backend.
struct PaymentApi {
    http: Client,
    secret_key: String,
    base_url: String,
}

impl PaymentApi {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> PaymentClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.secret_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaymentError::from_http_status(status.as_u16(), error_text));
        }

        Ok(response.json().await?)
    }

    /// GET that maps 404 and a JSON `null` to `None`.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> PaymentClientResult<Option<T>> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaymentError::from_http_status(status.as_u16(), error_text));
        }

        Ok(response.json().await?)
    }

    async fn confirm(
        &self,
        intent_ref: &str,
        payment_method: &PaymentMethod,
    ) -> PaymentClientResult<String> {
        let request = ConfirmRequest {
            payment_intent_id: intent_ref,
            payment_method,
        };

        let response = self
            .http
            .post(self.url("api/confirm-payment"))
            .bearer_auth(&self.secret_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        // Card errors can arrive with 402 or inside a 200 body.
        let body: ConfirmResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => ConfirmResponse::default(),
        };
        if let Some(error) = body.error {
            return Err(PaymentError::card_declined(error.message));
        }
        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(PaymentError::card_declined(text));
        }
        if !status.is_success() {
            return Err(PaymentError::from_http_status(status.as_u16(), text));
        }
        if body.success == Some(false) {
            return Err(PaymentError::card_declined("Payment was not completed"));
        }

        Ok(body
            .transaction_id
            .or(body.payment_intent.map(|intent| intent.id))
            .unwrap_or_else(|| intent_ref.to_string()))
    }
}

/// Plan purchases, subscriptions and payment history.
pub struct PaymentClient {
    api: Option<PaymentApi>,
    simulation_delay: Duration,
}

impl PaymentClient {
    pub fn new(config: &PaymentConfig) -> Self {
        let api = config.secret_key.clone().map(|secret_key| PaymentApi {
            http: config.http_client(),
            secret_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        });
        Self {
            api,
            simulation_delay: config.simulation_delay,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    /// Create a payment intent for a plan purchase.
    pub async fn create_payment_intent(
        &self,
        plan_id: &str,
        movie_data: serde_json::Value,
    ) -> PaymentClientResult<PaymentIntent> {
        let plan = lookup_plan(plan_id)?;

        let Some(api) = &self.api else {
            record_call("payment_intent", names::OUTCOME_SIMULATED);
            return Ok(simulation::payment_intent(plan));
        };

        let request = CreateIntentRequest {
            plan_id: plan.price_id,
            amount: plan.amount_cents(),
            currency: plan.currency,
            movie_data,
        };
        let result = api.post_json("api/create-payment-intent", &request).await;
        absorb("payment_intent", result, || simulation::payment_intent(plan))
    }

    /// Confirm a payment intent.
    ///
    /// A card decline is returned as an unsuccessful [`PaymentResult`].
    pub async fn process_payment(
        &self,
        intent_ref: &str,
        payment_method: &PaymentMethod,
    ) -> PaymentClientResult<PaymentResult> {
        if intent_ref.trim().is_empty() {
            return Err(PaymentError::invalid_argument("Payment intent reference is required"));
        }

        if let Some(api) = &self.api {
            match api.confirm(intent_ref, payment_method).await {
                Ok(transaction_id) => {
                    record_call("confirm_payment", names::OUTCOME_LIVE);
                    info!(transaction_id = %transaction_id, "Payment confirmed");
                    return Ok(PaymentResult::succeeded(transaction_id));
                }
                Err(PaymentError::CardDeclined(message)) => {
                    record_call("confirm_payment", names::OUTCOME_LIVE);
                    warn!(intent = %intent_ref, "Card declined: {}", message);
                    return Ok(PaymentResult::declined(message));
                }
                Err(e) => {
                    warn!("Payment confirmation failed, simulating: {}", e);
                    record_call("confirm_payment", names::OUTCOME_FALLBACK);
                }
            }
        } else {
            record_call("confirm_payment", names::OUTCOME_SIMULATED);
        }

        tokio::time::sleep(self.simulation_delay).await;
        Ok(PaymentResult::succeeded(intent_ref))
    }

    /// Start a recurring subscription.
    pub async fn create_subscription(
        &self,
        plan_id: &str,
        payment_method: &PaymentMethod,
    ) -> PaymentClientResult<Subscription> {
        let plan = lookup_plan(plan_id)?;

        let Some(api) = &self.api else {
            record_call("create_subscription", names::OUTCOME_SIMULATED);
            return Ok(simulation::subscription(plan));
        };

        let request = CreateSubscriptionRequest {
            plan_id: plan.tier.as_str(),
            payment_method,
        };
        let result = api.post_json("api/create-subscription", &request).await;
        absorb("create_subscription", result, || simulation::subscription(plan))
    }

    pub async fn get_active_subscription(&self) -> Option<Subscription> {
        let Some(api) = &self.api else {
            record_call("get_subscription", names::OUTCOME_SIMULATED);
            return Some(simulation::active_subscription());
        };

        match api.get_optional("api/subscription").await {
            Ok(subscription) => {
                record_call("get_subscription", names::OUTCOME_LIVE);
                subscription
            }
            Err(e) => {
                warn!("Subscription lookup failed, using canned subscription: {}", e);
                record_call("get_subscription", names::OUTCOME_FALLBACK);
                Some(simulation::active_subscription())
            }
        }
    }

    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> PaymentClientResult<CancelSubscriptionResult> {
        if subscription_id.trim().is_empty() {
            return Err(PaymentError::invalid_argument("Subscription id is required"));
        }

        let Some(api) = &self.api else {
            record_call("cancel_subscription", names::OUTCOME_SIMULATED);
            return Ok(simulation::cancellation(subscription_id));
        };

        let path = format!("api/subscription/{}/cancel", subscription_id);
        let result = api.post_json(&path, &serde_json::json!({})).await;
        absorb("cancel_subscription", result, || {
            simulation::cancellation(subscription_id)
        })
    }

    pub async fn get_payment_history(&self) -> Vec<PaymentRecord> {
        let Some(api) = &self.api else {
            record_call("payment_history", names::OUTCOME_SIMULATED);
            return simulation::payment_history();
        };

        match api
            .get_optional::<PaymentHistoryResponse>("api/payment-history")
            .await
        {
            Ok(history) => {
                record_call("payment_history", names::OUTCOME_LIVE);
                history.map(|h| h.payments).unwrap_or_default()
            }
            Err(e) => {
                warn!("Payment history fetch failed, using canned history: {}", e);
                record_call("payment_history", names::OUTCOME_FALLBACK);
                simulation::payment_history()
            }
        }
    }
}

fn lookup_plan(plan_id: &str) -> PaymentClientResult<&'static SubscriptionPlan> {
    SubscriptionPlan::lookup(plan_id).ok_or_else(|| {
        PaymentError::invalid_argument(format!("Invalid plan selected: {}", plan_id))
    })
}

/// Swap provider failures for the canned response.
fn absorb<T>(
    operation: &'static str,
    result: PaymentClientResult<T>,
    fallback: impl FnOnce() -> T,
) -> PaymentClientResult<T> {
    match result {
        Ok(value) => {
            record_call(operation, names::OUTCOME_LIVE);
            Ok(value)
        }
        Err(e) if e.is_provider_failure() => {
            warn!(operation, "Payment API call failed, simulating: {}", e);
            record_call(operation, names::OUTCOME_FALLBACK);
            Ok(fallback())
        }
        Err(e) => {
            debug!(operation, "Payment API rejected request: {}", e);
            Err(e)
        }
    }
}
