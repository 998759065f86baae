//! Customer account management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use orchard_core::{ListParams, Page, SortOrder, UserId};

use crate::components::data_table::{BulkAction, FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::Result;
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::User;
use crate::routes::require_editor;
use crate::state::AppState;
use crate::store::{NewUser, UserPatch};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/table", get(table))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

/// GET /api/admin/users
#[instrument(skip(state, query))]
async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<User>> {
    let params = ListParams::from_pairs(query);
    Json(state.store().list_users(&params).await)
}

/// GET /api/admin/users/table
#[instrument]
async fn table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("name", "Name"),
        TableColumn::sortable("email", "Email"),
        TableColumn::plain("role", "Role"),
        TableColumn::plain("status", "Status"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_filters(vec![
        TableFilter::multi_select(
            "role",
            "Role",
            vec![
                FilterOption::new("admin", "Admin"),
                FilterOption::new("manager", "Manager"),
                FilterOption::new("customer", "Customer"),
            ],
        ),
        TableFilter::multi_select(
            "status",
            "Status",
            vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("inactive", "Inactive"),
                FilterOption::new("suspended", "Suspended"),
            ],
        ),
        TableFilter::date_range("Created"),
    ])
    .with_bulk_actions(vec![
        BulkAction::new("activate", "Activate"),
        BulkAction::new("suspend", "Suspend"),
        BulkAction::new("delete", "Delete").destructive(),
    ])
    .with_default_sort("created_at", SortOrder::Desc);

    Json(config)
}

/// GET /api/admin/users/{id}
#[instrument(skip(state))]
async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    Ok(Json(state.store().get_user(id).await?))
}

/// POST /api/admin/users
#[instrument(skip(state, admin, body))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    require_editor(&admin)?;
    let user = state.store().create_user(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/admin/users/{id}
#[instrument(skip(state, admin, body))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(body): Json<UserPatch>,
) -> Result<Json<User>> {
    require_editor(&admin)?;
    Ok(Json(state.store().update_user(id, body).await?))
}

/// DELETE /api/admin/users/{id}
///
/// Destructive; super admins only.
#[instrument(skip(state))]
async fn delete(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    state.store().delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
