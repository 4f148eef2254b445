/*
[INPUT]:  Raw exchange envelopes and wire rows
[OUTPUT]: Shaped results returned by public operations
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When an operation's documented return shape changes
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::enums::{OrderType, Side};
use super::models::{Instrument, Ticker};
use crate::http::{BybitError, Result, Status};

/// Outer shape of every V5 response.
///
/// `result` is kept as a raw value so that error responses (which carry `{}`) still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInfo {
    pub symbol: String,
    pub status: String,
    pub base_coin: String,
    pub quote_coin: String,
    pub innovation: Decimal,
    pub base_precision: Decimal,
    pub quote_precision: Decimal,
    pub min_order_qty: Decimal,
    pub max_order_qty: Decimal,
    pub min_order_amt: Decimal,
    pub max_order_amt: Decimal,
    pub tick_size: Decimal,
}

impl From<Instrument> for InstrumentInfo {
    fn from(instrument: Instrument) -> Self {
        Self {
            symbol: instrument.symbol,
            status: instrument.status,
            base_coin: instrument.base_coin,
            quote_coin: instrument.quote_coin,
            innovation: instrument.innovation,
            base_precision: instrument.lot_size_filter.base_precision,
            quote_precision: instrument.lot_size_filter.quote_precision,
            min_order_qty: instrument.lot_size_filter.min_order_qty,
            max_order_qty: instrument.lot_size_filter.max_order_qty,
            min_order_amt: instrument.lot_size_filter.min_order_amt,
            max_order_amt: instrument.lot_size_filter.max_order_amt,
            tick_size: instrument.price_filter.tick_size,
        }
    }
}

/// Top of book and last trade for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastCoinInfo {
    pub last_price: Decimal,
    pub ask1_price: Decimal,
    pub bid1_price: Decimal,
    pub ask1_size: Decimal,
    pub bid1_size: Decimal,
}

impl From<Ticker> for LastCoinInfo {
    fn from(ticker: Ticker) -> Self {
        Self {
            last_price: ticker.last_price,
            ask1_price: ticker.ask1_price,
            bid1_price: ticker.bid1_price,
            ask1_size: ticker.ask1_size,
            bid1_size: ticker.bid1_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub start: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub turnover: Decimal,
}

impl Kline {
    /// Parse one `[startTime, open, high, low, close, volume, turnover]` row.
    pub fn from_row(row: &[String]) -> Result<Self> {
        if row.len() < 6 {
            return Err(BybitError::InvalidResponse(format!(
                "kline row has {} fields, expected at least 6",
                row.len()
            )));
        }

        let millis: i64 = row[0].parse().map_err(|_| {
            BybitError::InvalidResponse(format!("invalid kline start time: {}", row[0]))
        })?;
        let start = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            BybitError::InvalidResponse(format!("kline start time out of range: {millis}"))
        })?;

        let turnover = match row.get(6) {
            Some(raw) => parse_decimal(raw)?,
            None => Decimal::ZERO,
        };

        Ok(Self {
            start,
            open: parse_decimal(&row[1])?,
            high: parse_decimal(&row[2])?,
            low: parse_decimal(&row[3])?,
            close: parse_decimal(&row[4])?,
            volume: parse_decimal(&row[5])?,
            turnover,
        })
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| BybitError::InvalidResponse(format!("invalid decimal {raw:?}: {e}")))
}

/// Aggregate view of one order built from its executions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub order_id: String,
    pub order_link_id: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub fee: Decimal,
    pub timestamp: String,
}

/// Result of an order lookup
#[derive(Debug, Clone, PartialEq)]
pub enum OrderExecution {
    Filled(OrderFill),
    /// The order exists but nothing has traded yet
    NotExecuted,
}

impl OrderExecution {
    pub fn status(&self) -> Status {
        match self {
            OrderExecution::Filled(_) => Status::Success,
            OrderExecution::NotExecuted => Status::NotExecuted,
        }
    }

    pub fn fill(&self) -> Option<&OrderFill> {
        match self {
            OrderExecution::Filled(fill) => Some(fill),
            OrderExecution::NotExecuted => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            OrderExecution::Filled(_) => "Executed",
            OrderExecution::NotExecuted => "Not executed",
        }
    }
}
