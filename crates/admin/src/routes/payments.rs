//! Payment and refund routes.
//!
//! Payments live in the external payment service, so these routes proxy
//! rather than hit the store. The list query string is forwarded as-is;
//! the payment service speaks the same page/sort/filter dialect.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use chrono::{DateTime, Utc};
use orchard_core::{OrderId, PaymentId, PaymentStatus, RefundId, RefundStatus, SortOrder, total_pages};

use crate::components::data_table::{FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdminAuth;
use crate::payments::{Payment, PaymentPage, Refund, RefundRequest};
use crate::routes::require_editor;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/table", get(table))
        .route("/{id}", get(get_one))
        .route("/{id}/refunds", post(create_refund))
}

// =============================================================================
// Views
// =============================================================================

/// A payment as served to the admin client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub refunds: Vec<RefundView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundView {
    pub id: RefundId,
    pub amount: Decimal,
    pub status: RefundStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id,
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            refunds: payment.refunds.into_iter().map(RefundView::from).collect(),
            created_at: payment.created,
        }
    }
}

impl From<Refund> for RefundView {
    fn from(refund: Refund) -> Self {
        Self {
            id: refund.refund_id,
            amount: refund.amount,
            status: refund.status,
            reason: refund.reason,
            created_at: refund.created,
        }
    }
}

/// A page of payments in the shape the data table expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPageView {
    pub items: Vec<PaymentView>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl From<PaymentPage> for PaymentPageView {
    fn from(page: PaymentPage) -> Self {
        Self {
            items: page.items.into_iter().map(PaymentView::from).collect(),
            page: page.page,
            per_page: page.page_size,
            total: page.total,
            total_pages: total_pages(page.total, page.page_size.max(1)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundBody {
    pub amount: Decimal,
    pub reason: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/admin/payments
#[instrument(skip(state, query))]
async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<PaymentPageView>> {
    let page = state
        .payments()
        .list_payments(query.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/admin/payments/table
#[instrument]
async fn table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    Json(table_config())
}

fn table_config() -> TableConfig {
    TableConfig::new(vec![
        TableColumn::sortable("id", "Payment"),
        TableColumn::plain("order_id", "Order"),
        TableColumn::sortable("amount", "Amount"),
        TableColumn::plain("currency", "Currency"),
        TableColumn::plain("status", "Status"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_filters(vec![
        TableFilter::multi_select(
            "status",
            "Status",
            vec![
                FilterOption::new("pending", "Pending"),
                FilterOption::new("paid", "Paid"),
                FilterOption::new("partially_refunded", "Partially refunded"),
                FilterOption::new("refunded", "Refunded"),
                FilterOption::new("failed", "Failed"),
            ],
        ),
        TableFilter::date_range("Created"),
    ])
    .with_default_sort("created_at", SortOrder::Desc)
    .searchable(false)
}

/// GET /api/admin/payments/{id}
#[instrument(skip(state))]
async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<Json<PaymentView>> {
    let payment = state.payments().get_payment(id).await?;
    Ok(Json(payment.into()))
}

/// POST /api/admin/payments/{id}/refunds
///
/// Issues a refund against a payment and returns the updated payment.
#[instrument(skip(state, admin, body), fields(payment_id = %id))]
async fn create_refund(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Json(body): Json<RefundBody>,
) -> Result<(StatusCode, Json<PaymentView>)> {
    require_editor(&admin)?;

    if body.amount <= Decimal::ZERO {
        return Err(AdminError::Validation(
            "refund amount must be positive".to_string(),
        ));
    }

    let request = RefundRequest {
        amount: body.amount,
        reason: body.reason.filter(|r| !r.trim().is_empty()),
    };
    let payment = state.payments().create_refund(id, &request).await?;

    info!(admin_id = %admin.id, amount = %request.amount, "refund issued");

    Ok((StatusCode::CREATED, Json(payment.into())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_view_computes_total_pages() {
        let page = PaymentPage {
            items: vec![],
            total: 41,
            page: 1,
            page_size: 20,
        };
        let view = PaymentPageView::from(page);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.per_page, 20);
    }

    #[test]
    fn test_status_filter_options_are_real_payment_statuses() {
        let config = table_config();
        let status_filter = config
            .filters
            .iter()
            .find(|f| f.key == "status")
            .unwrap();

        // Every offered value must deserialize into a PaymentStatus, so a
        // selected filter can actually match rows.
        for option in &status_filter.options {
            let value = serde_json::Value::String(option.value.clone());
            let parsed: std::result::Result<PaymentStatus, _> = serde_json::from_value(value);
            assert!(parsed.is_ok(), "unknown payment status: {}", option.value);
        }

        let values: Vec<&str> = status_filter.options.iter().map(|o| o.value.as_str()).collect();
        assert!(values.contains(&"paid"));
        assert!(!values.contains(&"completed"));
    }

    #[test]
    fn test_refund_body_rejects_missing_amount() {
        let parsed: std::result::Result<RefundBody, _> = serde_json::from_str(r#"{"reason":"damaged"}"#);
        assert!(parsed.is_err());
    }
}
