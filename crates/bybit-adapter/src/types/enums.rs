/*
[INPUT]:  Bybit V5 enumerated field values
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::BybitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Untriggered,
    Rejected,
    PartiallyFilledCanceled,
    Filled,
    Cancelled,
    Triggered,
    Deactivated,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// True once at least part of the order has traded.
    pub fn is_executed(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::PartiallyFilled | OrderStatus::PartiallyFilledCanceled
        )
    }
}

/// Product line an endpoint operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spot,
    Linear,
    Inverse,
    Option,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spot => "spot",
            Category::Linear => "linear",
            Category::Inverse => "inverse",
            Category::Option => "option",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Unified,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Unified => "UNIFIED",
        }
    }
}

/// Candle width accepted by `get_klines`.
///
/// Parsed from the short labels (`"1m"`, `"4h"`, `"1d"`, `"1M"`) and sent as the
/// exchange's `interval` value. `2d` has no native interval and maps to daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Minute1,
    Minute3,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    Hour2,
    Hour4,
    Hour6,
    Hour12,
    Day1,
    Day2,
    Week1,
    Month1,
}

impl Timeframe {
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1",
            Timeframe::Minute3 => "3",
            Timeframe::Minute5 => "5",
            Timeframe::Minute15 => "15",
            Timeframe::Minute30 => "30",
            Timeframe::Hour1 => "60",
            Timeframe::Hour2 => "120",
            Timeframe::Hour4 => "240",
            Timeframe::Hour6 => "360",
            Timeframe::Hour12 => "720",
            Timeframe::Day1 | Timeframe::Day2 => "D",
            Timeframe::Week1 => "W",
            Timeframe::Month1 => "M",
        }
    }
}

impl FromStr for Timeframe {
    type Err = BybitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let timeframe = match value {
            "1m" => Timeframe::Minute1,
            "3m" => Timeframe::Minute3,
            "5m" => Timeframe::Minute5,
            "15m" => Timeframe::Minute15,
            "30m" => Timeframe::Minute30,
            "1h" => Timeframe::Hour1,
            "2h" => Timeframe::Hour2,
            "4h" => Timeframe::Hour4,
            "6h" => Timeframe::Hour6,
            "12h" => Timeframe::Hour12,
            "1d" => Timeframe::Day1,
            "2d" => Timeframe::Day2,
            "1w" => Timeframe::Week1,
            "1M" => Timeframe::Month1,
            other => {
                return Err(BybitError::Config(format!("Unsupported timeframe: {other}")));
            }
        };
        Ok(timeframe)
    }
}
