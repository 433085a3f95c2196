use crate::handlers::{
    accounts::{
        create_account, delete_account, get_account, get_account_totals, get_accounts,
        lock_account, restore_account, toggle_account_lock, unlock_account, update_account,
    },
    activity::get_activity,
    auth::login,
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account provisioning routes
        .route("/api/v1/accounts", post(create_account))
        .route("/api/v1/accounts", get(get_accounts))
        .route("/api/v1/accounts/totals", get(get_account_totals))
        .route("/api/v1/accounts/:account_id", get(get_account))
        .route("/api/v1/accounts/:account_id", put(update_account))
        .route("/api/v1/accounts/:account_id", delete(delete_account))
        .route("/api/v1/accounts/:account_id/restore", post(restore_account))
        .route("/api/v1/accounts/:account_id/lock", post(lock_account))
        .route("/api/v1/accounts/:account_id/unlock", post(unlock_account))
        .route(
            "/api/v1/accounts/:account_id/toggle-lock",
            post(toggle_account_lock),
        )
        // Authentication
        .route("/api/v1/auth/login", post(login))
        // Activity log
        .route("/api/v1/activity", get(get_activity))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
