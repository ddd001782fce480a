//! Plan purchases and subscriptions.
//!
//! This crate provides:
//! - Payment intent creation and confirmation
//! - Subscription creation, lookup and cancellation
//! - Payment history
//! - Currency formatting and plan lookups

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod utils;

pub use client::PaymentClient;
pub use config::PaymentConfig;
pub use error::{PaymentClientResult, PaymentError};
pub use utils::{format_currency, plan_features, plan_price, validate_payment_method};
