//! HTTP API Layer
//!
//! This crate provides the REST API for the accounts service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for accounts and health checks
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let service = Arc::new(AccountService::new(Arc::new(InMemoryAccountAdapter::new())));
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_account::AccountService;

use crate::handlers::{accounts, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AccountService>,
}

/// Creates the main API router
pub fn create_router(service: Arc<AccountService>) -> Router {
    let state = AppState { service };

    let account_routes = Router::new()
        .route("/", get(accounts::list_accounts).post(accounts::create_account))
        .route(
            "/:id",
            get(accounts::get_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .route("/:id/addresses", get(accounts::list_addresses))
        .route("/ref/:ref_id", get(accounts::get_account_by_ref));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/accounts", account_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
