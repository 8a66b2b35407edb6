pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::json;

use service::OrderService;

/// Orders module: read-only listings filtered by confirmation and user
pub struct OrdersModule {
    service: Arc<dyn OrderService>,
}

impl OrdersModule {
    pub fn new(service: Arc<dyn OrderService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for OrdersModule {
    fn name(&self) -> &'static str {
        "orders"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "orders module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let order_list = json!({
            "description": "List of orders",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Order" }
                    }
                }
            }
        });
        let confirmed = json!({
            "name": "confirmed",
            "in": "query",
            "required": false,
            "description": "Confirmation status to list; defaults to true",
            "schema": { "type": "boolean" }
        });
        let user_id = json!({
            "name": "userId",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let listing = |summary: &str, parameters: serde_json::Value| {
            json!({
                "get": {
                    "summary": summary,
                    "tags": ["Orders"],
                    "parameters": parameters,
                    "responses": { "200": order_list }
                }
            })
        };

        Some(json!({
            "paths": {
                "/": listing("List orders by confirmation status", json!([confirmed])),
                "/confirmed": listing("List confirmed orders", json!([])),
                "/unconfirmed": listing("List unconfirmed orders", json!([])),
                "/users/{userId}": listing(
                    "List a user's orders by confirmation status",
                    json!([user_id, confirmed])
                ),
                "/users/{userId}/confirmed": listing(
                    "List a user's confirmed orders",
                    json!([user_id])
                ),
                "/users/{userId}/unconfirmed": listing(
                    "List a user's unconfirmed orders",
                    json!([user_id])
                ),
                "/health": {
                    "get": {
                        "summary": "Orders health check",
                        "tags": ["Orders"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Order": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "userId": { "type": "integer", "format": "int64" },
                            "confirmed": { "type": "boolean" },
                            "items": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/OrderItem" }
                            }
                        },
                        "required": ["id", "userId", "confirmed", "items"]
                    },
                    "OrderItem": {
                        "type": "object",
                        "properties": {
                            "bookId": { "type": "integer", "format": "int64" },
                            "quantity": { "type": "integer", "format": "int32" },
                            "unitPrice": { "type": "number", "format": "double" }
                        },
                        "required": ["bookId", "quantity", "unitPrice"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module stopped");
        Ok(())
    }
}

/// Create a new instance of the orders module
pub fn create_module(service: Arc<dyn OrderService>) -> Arc<dyn Module> {
    Arc::new(OrdersModule::new(service))
}
