//! API gateway client.
//!
//! JSON REST client for the backend services behind the gateway: catalog,
//! cart, coupons, and auth. Catalog reads are cached with `moka`
//! (5-minute TTL); cart and auth calls always go upstream. Idempotent
//! reads retry with exponential backoff (3 attempts); mutations are sent
//! once.

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::GatewayConfig;
use cache::CacheValue;
use types::{
    CartLineInput, GatewayCart, GatewayCoupon, GatewayProduct, GatewayProductPage, GatewayReview,
    GatewaySeo, GatewayTokenPair, GatewayUser,
};

/// Fixed request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of attempts for idempotent reads (1 initial + 2 retries).
const READ_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between read attempts.
const BACKOFF_BASE: Duration = Duration::from_millis(100);

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials or token rejected upstream.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited, retry after the given number of seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Upstream returned a non-success status.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },
}

/// Client for the backend API gateway.
///
/// Cheaply cloneable; shares the HTTP connection pool and cache.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    client: reqwest::Client,
    product_base: String,
    cart_base: String,
    auth_base: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(GatewayClientInner {
                client,
                product_base: config.product_service_url.trim_end_matches('/').to_string(),
                cart_base: config.cart_service_url.trim_end_matches('/').to_string(),
                auth_base: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    // =========================================================================
    // HTTP plumbing
    // =========================================================================

    /// GET a JSON resource with exponential backoff.
    ///
    /// Retries on connection errors and 5xx responses; 4xx responses are
    /// terminal on the first attempt.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let mut last_err: Option<GatewayError> = None;

        for attempt in 0..READ_ATTEMPTS {
            if attempt > 0 {
                let delay = BACKOFF_BASE * 2u32.pow(attempt - 1);
                debug!(attempt, ?delay, url, "retrying upstream read");
                tokio::time::sleep(delay).await;
            }

            match self.request_json::<T>(reqwest::Method::GET, url, None).await {
                Ok(value) => return Ok(value),
                Err(err) if is_retryable(&err) => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or(GatewayError::Upstream {
            status: 0,
            body: "retries exhausted".to_string(),
        }))
    }

    /// Send a JSON request once (no retry - used for mutations).
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, GatewayError> {
        self.request_json(method, url, body).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, GatewayError> {
        let mut request = self
            .inner
            .client
            .request(method, url)
            .header("X-Api-Key", &self.inner.api_key)
            .header("Accept", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(GatewayError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(url.to_string()));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GatewayError::Unauthorized);
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Gateway returned non-success status"
            );
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse gateway response"
                );
                Err(GatewayError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog (cached)
    // =========================================================================

    /// Get a paginated list of products.
    ///
    /// The raw query string is forwarded to the product service. Responses
    /// are cached unless the query contains a search term.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        query_string: &str,
        is_search: bool,
    ) -> Result<GatewayProductPage, GatewayError> {
        let cache_key = format!("products:{query_string}");

        if !is_search
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let url = format!("{}/products?{query_string}", self.inner.product_base);
        let page: GatewayProductPage = self.get_json(&url).await?;

        if !is_search {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(
        &self,
        product_id: orchard_core::ProductId,
    ) -> Result<GatewayProduct, GatewayError> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = format!("{}/products/{product_id}", self.inner.product_base);
        let product: GatewayProduct = self.get_json(&url).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get products related to the given product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_related_products(
        &self,
        product_id: orchard_core::ProductId,
    ) -> Result<Vec<GatewayProduct>, GatewayError> {
        let url = format!("{}/products/{product_id}/related", self.inner.product_base);
        self.get_json(&url).await
    }

    /// Get reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_reviews(
        &self,
        product_id: orchard_core::ProductId,
    ) -> Result<Vec<GatewayReview>, GatewayError> {
        let url = format!("{}/products/{product_id}/reviews", self.inner.product_base);
        self.get_json(&url).await
    }

    /// Get SEO metadata for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_seo(
        &self,
        product_id: orchard_core::ProductId,
    ) -> Result<GatewaySeo, GatewayError> {
        let url = format!("{}/products/{product_id}/seo", self.inner.product_base);
        self.get_json(&url).await
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, product_id: orchard_core::ProductId) {
        self.inner
            .cache
            .invalidate(&format!("product:{product_id}"))
            .await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    // =========================================================================
    // Cart (not cached - mutable state)
    // =========================================================================

    /// Create a new cart, optionally with an initial line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the request.
    #[instrument(skip(self, line))]
    pub async fn create_cart(
        &self,
        line: Option<CartLineInput>,
    ) -> Result<GatewayCart, GatewayError> {
        let url = format!("{}/carts", self.inner.cart_base);
        let body = serde_json::json!({ "lines": line.into_iter().collect::<Vec<_>>() });
        self.send_json(reqwest::Method::POST, &url, Some(body)).await
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<GatewayCart, GatewayError> {
        let url = format!("{}/carts/{cart_id}", self.inner.cart_base);
        self.get_json(&url).await
    }

    /// Add a line to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the request.
    #[instrument(skip(self, line), fields(cart_id = %cart_id))]
    pub async fn add_cart_line(
        &self,
        cart_id: &str,
        line: CartLineInput,
    ) -> Result<GatewayCart, GatewayError> {
        let url = format!("{}/carts/{cart_id}/lines", self.inner.cart_base);
        let body = serde_json::to_value(&line)?;
        self.send_json(reqwest::Method::POST, &url, Some(body)).await
    }

    /// Set the quantity of a cart line. A quantity of 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the request.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_id = %line_id))]
    pub async fn update_cart_line(
        &self,
        cart_id: &str,
        line_id: &str,
        quantity: u32,
    ) -> Result<GatewayCart, GatewayError> {
        let url = format!("{}/carts/{cart_id}/lines/{line_id}", self.inner.cart_base);
        let body = serde_json::json!({ "quantity": quantity });
        self.send_json(reqwest::Method::PUT, &url, Some(body)).await
    }

    /// Remove a line from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the request.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_id = %line_id))]
    pub async fn remove_cart_line(
        &self,
        cart_id: &str,
        line_id: &str,
    ) -> Result<GatewayCart, GatewayError> {
        let url = format!("{}/carts/{cart_id}/lines/{line_id}", self.inner.cart_base);
        self.send_json(reqwest::Method::DELETE, &url, None).await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Look up a coupon by code.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the code is unknown.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn get_coupon(&self, code: &str) -> Result<GatewayCoupon, GatewayError> {
        let url = format!(
            "{}/coupons/{}",
            self.inner.auth_base,
            urlencoding::encode(code)
        );
        self.get_json(&url).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` for invalid credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<GatewayTokenPair, GatewayError> {
        let url = format!("{}/auth/login", self.inner.auth_base);
        let body = serde_json::json!({ "email": email, "password": password });
        self.send_json(reqwest::Method::POST, &url, Some(body)).await
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` if the refresh token is rejected.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<GatewayTokenPair, GatewayError> {
        let url = format!("{}/auth/refresh", self.inner.auth_base);
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.send_json(reqwest::Method::POST, &url, Some(body)).await
    }

    /// Fetch the user profile for an access token.
    ///
    /// Returns `Ok(None)` when the user-info endpoint 404s; callers fall
    /// back to the token-payload user in that case.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a 404.
    #[instrument(skip(self, access_token))]
    pub async fn user_info(&self, access_token: &str) -> Result<Option<GatewayUser>, GatewayError> {
        let url = format!("{}/auth/me", self.inner.auth_base);
        let response = self
            .inner
            .client
            .get(&url)
            .header("X-Api-Key", &self.inner.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            reqwest::StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

/// Whether an error is worth retrying on an idempotent read.
const fn is_retryable(err: &GatewayError) -> bool {
    match err {
        GatewayError::Http(_) => true,
        GatewayError::Upstream { status, .. } => *status >= 500 || *status == 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(is_retryable(&GatewayError::Upstream {
            status: 503,
            body: String::new()
        }));
        assert!(!is_retryable(&GatewayError::Upstream {
            status: 400,
            body: String::new()
        }));
        assert!(!is_retryable(&GatewayError::NotFound("x".to_string())));
        assert!(!is_retryable(&GatewayError::Unauthorized));
        assert!(!is_retryable(&GatewayError::RateLimited(5)));
    }

    #[test]
    fn test_backoff_schedule_is_exponential() {
        let delays: Vec<Duration> = (1..READ_ATTEMPTS)
            .map(|attempt| BACKOFF_BASE * 2u32.pow(attempt - 1))
            .collect();
        assert_eq!(
            delays,
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }
}
