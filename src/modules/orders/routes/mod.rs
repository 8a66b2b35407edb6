//! HTTP handlers for `/api/orders`.
//!
//! The bare listings default to confirmed orders; `?confirmed=false` or the
//! `/unconfirmed` sub-paths select the other set. A method and path pair can
//! only be bound once, so the two listings cannot share a route.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use bookshop_http::{
    extract::{ApiPath, ApiQuery},
    AppResult,
};
use serde::Deserialize;

use super::models::Order;
use super::service::OrderService;

type Service = Arc<dyn OrderService>;

#[derive(Debug, Deserialize)]
pub struct ConfirmationParams {
    #[serde(default = "ConfirmationParams::confirmed_by_default")]
    pub confirmed: bool,
}

impl ConfirmationParams {
    fn confirmed_by_default() -> bool {
        true
    }
}

/// Build the orders router with its service collaborator as state.
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/", get(list_orders))
        .route("/confirmed", get(list_confirmed_orders))
        .route("/unconfirmed", get(list_unconfirmed_orders))
        .route("/users/{userId}", get(list_orders_by_user))
        .route("/users/{userId}/confirmed", get(list_confirmed_orders_by_user))
        .route(
            "/users/{userId}/unconfirmed",
            get(list_unconfirmed_orders_by_user),
        )
        .route("/health", get(health_check))
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "orders module is healthy"
}

async fn orders_by_confirmation(service: &Service, confirmed: bool) -> AppResult<Json<Vec<Order>>> {
    tracing::info!(confirmed, "get all orders by confirmation");
    Ok(Json(service.find_by_confirmation(confirmed).await?))
}

async fn orders_by_user(
    service: &Service,
    user_id: i64,
    confirmed: bool,
) -> AppResult<Json<Vec<Order>>> {
    tracing::info!(user_id, confirmed, "get all orders by user id");
    Ok(Json(
        service
            .find_by_user_and_confirmation(user_id, confirmed)
            .await?,
    ))
}

async fn list_orders(
    State(service): State<Service>,
    ApiQuery(params): ApiQuery<ConfirmationParams>,
) -> AppResult<Json<Vec<Order>>> {
    orders_by_confirmation(&service, params.confirmed).await
}

async fn list_confirmed_orders(State(service): State<Service>) -> AppResult<Json<Vec<Order>>> {
    orders_by_confirmation(&service, true).await
}

async fn list_unconfirmed_orders(State(service): State<Service>) -> AppResult<Json<Vec<Order>>> {
    orders_by_confirmation(&service, false).await
}

async fn list_orders_by_user(
    State(service): State<Service>,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<ConfirmationParams>,
) -> AppResult<Json<Vec<Order>>> {
    orders_by_user(&service, user_id, params.confirmed).await
}

async fn list_confirmed_orders_by_user(
    State(service): State<Service>,
    ApiPath(user_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Order>>> {
    orders_by_user(&service, user_id, true).await
}

async fn list_unconfirmed_orders_by_user(
    State(service): State<Service>,
    ApiPath(user_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Order>>> {
    orders_by_user(&service, user_id, false).await
}
