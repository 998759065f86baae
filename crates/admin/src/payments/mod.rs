//! Payment service client.
//!
//! Payments and refunds live in a remote payment service; the admin panel
//! proxies reads and forwards refund requests. Reads retry with
//! exponential backoff (3 attempts); refund creation is sent exactly once
//! so a timeout can never double-refund.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use orchard_core::{OrderId, PaymentId, PaymentStatus, RefundId, RefundStatus};

use crate::config::PaymentsConfig;

/// Fixed request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of attempts for idempotent reads (1 initial + 2 retries).
const READ_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between read attempts.
const BACKOFF_BASE: Duration = Duration::from_millis(100);

/// Errors that can occur when talking to the payment service.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited, retry after the given number of seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The payment service rejected the request.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Upstream returned a non-success status.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },
}

// =============================================================================
// Wire types
// =============================================================================

/// A payment as returned by the payment service.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub refunds: Vec<Refund>,
    pub created: DateTime<Utc>,
}

/// A refund attached to a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct Refund {
    pub refund_id: RefundId,
    pub amount: Decimal,
    pub status: RefundStatus,
    pub reason: Option<String>,
    pub created: DateTime<Utc>,
}

/// One page of payments.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPage {
    pub items: Vec<Payment>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Request body for creating a refund.
#[derive(Debug, Serialize)]
pub struct RefundRequest {
    pub amount: Decimal,
    pub reason: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the payment service. Cheaply cloneable.
#[derive(Clone)]
pub struct PaymentsClient {
    inner: Arc<PaymentsClientInner>,
}

struct PaymentsClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PaymentsClient {
    /// Create a new payment service client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &PaymentsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(PaymentsClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// List payments. The query string is forwarded to the payment service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after retries.
    #[instrument(skip(self))]
    pub async fn list_payments(&self, query_string: &str) -> Result<PaymentPage, PaymentsError> {
        let url = format!("{}/payments?{query_string}", self.inner.base_url);
        self.get_json(&url).await
    }

    /// Get a payment with its refunds.
    ///
    /// # Errors
    ///
    /// Returns `PaymentsError::NotFound` for unknown IDs.
    #[instrument(skip(self), fields(payment_id = %payment_id))]
    pub async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, PaymentsError> {
        let url = format!("{}/payments/{payment_id}", self.inner.base_url);
        self.get_json(&url).await
    }

    /// Create a refund for a payment.
    ///
    /// Sent exactly once - a failed or timed-out request surfaces to the
    /// operator instead of being retried.
    ///
    /// # Errors
    ///
    /// Returns `PaymentsError::Rejected` when the service refuses the
    /// refund (e.g. amount exceeds the remaining balance).
    #[instrument(skip(self, request), fields(payment_id = %payment_id))]
    pub async fn create_refund(
        &self,
        payment_id: PaymentId,
        request: &RefundRequest,
    ) -> Result<Payment, PaymentsError> {
        let url = format!("{}/payments/{payment_id}/refunds", self.inner.base_url);

        let response = self
            .inner
            .client
            .post(&url)
            .header("X-Api-Key", &self.inner.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match status {
            reqwest::StatusCode::NOT_FOUND => {
                Err(PaymentsError::NotFound(format!("payment {payment_id}")))
            }
            reqwest::StatusCode::UNPROCESSABLE_ENTITY | reqwest::StatusCode::CONFLICT => {
                Err(PaymentsError::Rejected(body.chars().take(200).collect()))
            }
            status if status.is_success() => Ok(serde_json::from_str(&body)?),
            status => Err(PaymentsError::Upstream {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            }),
        }
    }

    /// GET a JSON resource with exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PaymentsError> {
        let mut last_err: Option<PaymentsError> = None;

        for attempt in 0..READ_ATTEMPTS {
            if attempt > 0 {
                let delay = BACKOFF_BASE * 2u32.pow(attempt - 1);
                debug!(attempt, ?delay, url, "retrying payment service read");
                tokio::time::sleep(delay).await;
            }

            match self.get_once::<T>(url).await {
                Ok(value) => return Ok(value),
                Err(err) if is_retryable(&err) => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or(PaymentsError::Upstream {
            status: 0,
            body: "retries exhausted".to_string(),
        }))
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, PaymentsError> {
        let response = self
            .inner
            .client
            .get(url)
            .header("X-Api-Key", &self.inner.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PaymentsError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentsError::NotFound(url.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Payment service returned non-success status"
            );
            return Err(PaymentsError::Upstream {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Whether an error is worth retrying on an idempotent read.
const fn is_retryable(err: &PaymentsError) -> bool {
    match err {
        PaymentsError::Http(_) => true,
        PaymentsError::Upstream { status, .. } => *status >= 500 || *status == 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(is_retryable(&PaymentsError::Upstream {
            status: 502,
            body: String::new()
        }));
        assert!(!is_retryable(&PaymentsError::NotFound("x".to_string())));
        assert!(!is_retryable(&PaymentsError::Rejected("no".to_string())));
        assert!(!is_retryable(&PaymentsError::RateLimited(3)));
    }
}
