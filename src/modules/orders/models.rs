use serde::{Deserialize, Serialize};

/// A customer order. Orders are read-only through the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    pub confirmed: bool,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub book_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
}
