/*
[INPUT]:  Order parameters from public operations
[OUTPUT]: JSON request bodies with a fixed key order
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::Serialize;

use super::enums::{Category, OrderType, Side};

/// Body of `POST /v5/order/create`.
///
/// Field order is the serialized key order, and the serialized string is what gets
/// signed, so do not reorder fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub category: Category,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

impl CreateOrderRequest {
    pub fn market(symbol: impl Into<String>, side: Side, qty: Decimal) -> Self {
        Self {
            category: Category::Spot,
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            qty,
            price: None,
            order_link_id: None,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: Side, qty: Decimal, price: Decimal) -> Self {
        Self {
            category: Category::Spot,
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            qty,
            price: Some(price),
            order_link_id: None,
        }
    }
}

/// Body of `POST /v5/order/cancel`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub category: Category,
    pub symbol: String,
    pub order_id: String,
}
