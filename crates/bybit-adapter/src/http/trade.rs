/*
[INPUT]:  Order parameters, order ids and time ranges
[OUTPUT]: Order ids, order lookups and per-order fill aggregates
[POS]:    HTTP layer - trading endpoints (signed, JSON body for POST)
[UPDATE]: When adding new trading endpoints or changing fill aggregation
*/

use std::collections::{BTreeMap, HashMap};

use reqwest::Method;
use rust_decimal::Decimal;

use crate::http::error::OperationContext;
use crate::http::{BybitClient, BybitError, Result};
use crate::types::{
    CancelOrderRequest, Category, CreateOrderRequest, Execution, ListResult, OrderAck,
    OrderExecution, OrderFill, OrderRecord, Side,
};

const ORDER_CREATE: &str = "/v5/order/create";
const ORDER_CANCEL: &str = "/v5/order/cancel";
const ORDER_HISTORY: &str = "/v5/order/history";
const EXECUTION_LIST: &str = "/v5/execution/list";

/// Sums over the executions of one order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillTotals {
    pub amount: Decimal,
    pub quantity: Decimal,
    pub fee: Decimal,
}

/// Aggregate executions of one order at a reference price.
///
/// `amount = price * Σqty`. Fees are charged in the received asset, so a buy nets the
/// fee out of the quantity and a sell nets it out of the amount.
pub fn aggregate_executions<'a>(
    side: Side,
    price: Decimal,
    executions: impl IntoIterator<Item = &'a Execution>,
) -> FillTotals {
    let (quantity, fee) = executions
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(qty, fee), execution| {
            (qty + execution.exec_qty, fee + execution.exec_fee)
        });
    let amount = price * quantity;

    match side {
        Side::Buy => FillTotals {
            amount,
            quantity: quantity - fee,
            fee,
        },
        Side::Sell => FillTotals {
            amount: amount - fee,
            quantity,
            fee,
        },
    }
}

/// Group executions by order id, in first-seen order, priced at each order's first fill
pub fn group_executions(executions: Vec<Execution>) -> Vec<OrderFill> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Execution>> = Vec::new();

    for execution in executions {
        match index.get(&execution.order_id) {
            Some(&position) => groups[position].push(execution),
            None => {
                index.insert(execution.order_id.clone(), groups.len());
                groups.push(vec![execution]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|group| {
            let first = group.first()?;
            let totals = aggregate_executions(first.side, first.exec_price, &group);
            Some(OrderFill {
                symbol: first.symbol.clone(),
                side: first.side,
                order_type: first.order_type,
                order_id: first.order_id.clone(),
                order_link_id: first.order_link_id.clone(),
                price: first.exec_price,
                amount: totals.amount,
                quantity: totals.quantity,
                fee: totals.fee,
                timestamp: first.exec_time.clone(),
            })
        })
        .collect()
}

impl BybitClient {
    /// Submit an order
    ///
    /// POST /v5/order/create
    pub async fn place_order(&self, req: &CreateOrderRequest) -> Result<OrderAck> {
        self.create_order(req).await.in_operation("place_order")
    }

    /// Spot market order; returns the order id
    ///
    /// POST /v5/order/create
    pub async fn place_market_order(
        &self,
        base: &str,
        quote: &str,
        side: Side,
        qty: Decimal,
    ) -> Result<String> {
        let req = CreateOrderRequest::market(format!("{base}{quote}"), side, qty);
        self.create_order(&req)
            .await
            .map(|ack| ack.order_id)
            .in_operation("place_market_order")
    }

    /// Spot limit order; returns the order id
    ///
    /// POST /v5/order/create
    pub async fn place_limit_order(
        &self,
        base: &str,
        quote: &str,
        side: Side,
        qty: Decimal,
        price: Decimal,
    ) -> Result<String> {
        let req = CreateOrderRequest::limit(format!("{base}{quote}"), side, qty, price);
        self.create_order(&req)
            .await
            .map(|ack| ack.order_id)
            .in_operation("place_limit_order")
    }

    /// Cancel an open spot order; returns the order id
    ///
    /// POST /v5/order/cancel
    pub async fn cancel_order(&self, base: &str, quote: &str, order_id: &str) -> Result<String> {
        async {
            let req = CancelOrderRequest {
                category: Category::Spot,
                symbol: format!("{base}{quote}"),
                order_id: order_id.to_string(),
            };
            let body = serde_json::to_string(&req)?;
            let ack: OrderAck = self.request_result(Method::POST, ORDER_CANCEL, &body).await?;
            Ok::<_, BybitError>(ack.order_id)
        }
        .await
        .in_operation("cancel_order")
    }

    /// Look up an order and aggregate its executions.
    ///
    /// Returns `NotExecuted` while nothing of the order has traded.
    ///
    /// GET /v5/order/history?category=spot&orderId={order_id}
    /// GET /v5/execution/list?category=spot&orderId={order_id}
    pub async fn get_order_info(&self, order_id: &str) -> Result<OrderExecution> {
        async {
            let query = format!("category={}&orderId={order_id}", Category::Spot.as_str());
            let orders: ListResult<OrderRecord> = self
                .request_result(Method::GET, ORDER_HISTORY, &query)
                .await?;
            let order = orders.list.into_iter().next().ok_or_else(|| {
                BybitError::InvalidResponse(format!("order {order_id} not found"))
            })?;

            if !order.order_status.is_executed() {
                return Ok(OrderExecution::NotExecuted);
            }

            let executions: ListResult<Execution> = self
                .request_result(Method::GET, EXECUTION_LIST, &query)
                .await?;
            let totals = aggregate_executions(order.side, order.avg_price, &executions.list);

            Ok::<_, BybitError>(OrderExecution::Filled(OrderFill {
                symbol: order.symbol,
                side: order.side,
                order_type: order.order_type,
                order_id: order_id.to_string(),
                order_link_id: order.order_link_id,
                price: order.avg_price,
                amount: totals.amount,
                quantity: totals.quantity,
                fee: totals.fee,
                timestamp: order.updated_time,
            }))
        }
        .await
        .in_operation("get_order_info")
    }

    /// Fills of one spot pair within `[start_time, end_time]` (epoch ms), keyed by order id
    ///
    /// GET /v5/execution/list?category=spot&symbol={base}{quote}&startTime={start}&endTime={end}
    pub async fn get_loaded_trades(
        &self,
        base: &str,
        quote: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<BTreeMap<String, OrderFill>> {
        async {
            let query = format!(
                "category={}&symbol={base}{quote}&startTime={start_time}&endTime={end_time}",
                Category::Spot.as_str()
            );
            let executions: ListResult<Execution> = self
                .request_result(Method::GET, EXECUTION_LIST, &query)
                .await?;

            let trades: BTreeMap<String, OrderFill> = group_executions(executions.list)
                .into_iter()
                .map(|fill| (fill.order_id.clone(), fill))
                .collect();
            Ok::<_, BybitError>(trades)
        }
        .await
        .in_operation("get_loaded_trades")
    }

    /// Recent fills of one spot symbol, one entry per order in the order returned
    ///
    /// GET /v5/execution/list?category=spot&symbol={symbol}[&limit={limit}]
    pub async fn get_trade_history(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderFill>> {
        async {
            let mut query = format!("category={}&symbol={symbol}", Category::Spot.as_str());
            if let Some(limit) = limit {
                query.push_str(&format!("&limit={limit}"));
            }

            let executions: ListResult<Execution> = self
                .request_result(Method::GET, EXECUTION_LIST, &query)
                .await?;
            Ok::<_, BybitError>(group_executions(executions.list))
        }
        .await
        .in_operation("get_trade_history")
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderAck> {
        let body = serde_json::to_string(req)?;
        self.request_result(Method::POST, ORDER_CREATE, &body).await
    }
}
