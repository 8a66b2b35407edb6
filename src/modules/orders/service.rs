use std::collections::BTreeMap;

use async_trait::async_trait;
use bookshop_http::AppResult;
use tokio::sync::RwLock;

use super::models::Order;

/// Read operations behind the order endpoints.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// All orders whose confirmation flag equals `confirmed`, by id.
    async fn find_by_confirmation(&self, confirmed: bool) -> AppResult<Vec<Order>>;

    /// Orders of `user_id` whose confirmation flag equals `confirmed`, by id.
    async fn find_by_user_and_confirmation(
        &self,
        user_id: i64,
        confirmed: bool,
    ) -> AppResult<Vec<Order>>;
}

/// In-memory order service.
#[derive(Default)]
pub struct MemoryOrderService {
    orders: RwLock<BTreeMap<i64, Order>>,
}

impl MemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service holding `orders`.
    pub fn with_data(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders.into_iter().map(|order| (order.id, order)).collect()),
        }
    }

    async fn filtered(&self, predicate: impl Fn(&Order) -> bool) -> Vec<Order> {
        self.orders
            .read()
            .await
            .values()
            .filter(|order| predicate(order))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderService for MemoryOrderService {
    async fn find_by_confirmation(&self, confirmed: bool) -> AppResult<Vec<Order>> {
        Ok(self.filtered(|order| order.confirmed == confirmed).await)
    }

    async fn find_by_user_and_confirmation(
        &self,
        user_id: i64,
        confirmed: bool,
    ) -> AppResult<Vec<Order>> {
        Ok(self
            .filtered(|order| order.user_id == user_id && order.confirmed == confirmed)
            .await)
    }
}
