/*
[INPUT]:  Symbols, timeframes and limits
[OUTPUT]: Market data (server time, instruments, tickers, klines)
[POS]:    HTTP layer - market data endpoints
[UPDATE]: When adding new market endpoints or changing response shape
*/

use std::collections::{BTreeMap, BTreeSet};

use reqwest::Method;
use rust_decimal::Decimal;

use crate::http::error::OperationContext;
use crate::http::{BybitClient, BybitError, Result};
use crate::types::{
    Category, Instrument, InstrumentInfo, InstrumentSymbol, Kline, KlineResult, LastCoinInfo,
    ListResult, ServerTime, Ticker, Timeframe,
};

const SERVER_TIME: &str = "/v5/market/time";
const INSTRUMENTS_INFO: &str = "/v5/market/instruments-info";
const TICKERS: &str = "/v5/market/tickers";
const KLINE: &str = "/v5/market/kline";

impl BybitClient {
    /// Connectivity check
    ///
    /// GET /v5/market/time
    pub async fn is_connected(&self) -> Result<bool> {
        self.request_result::<ServerTime>(Method::GET, SERVER_TIME, "")
            .await
            .map(|_| true)
            .in_operation("is_connected")
    }

    /// Exchange clock in epoch milliseconds
    ///
    /// GET /v5/market/time
    pub async fn get_server_time(&self) -> Result<u64> {
        async {
            let time: ServerTime = self.request_result(Method::GET, SERVER_TIME, "").await?;
            let nanos: u128 = time.time_nano.parse().map_err(|_| {
                BybitError::InvalidResponse(format!("invalid timeNano: {}", time.time_nano))
            })?;
            let millis = u64::try_from(nanos / 1_000_000).map_err(|_| {
                BybitError::InvalidResponse(format!("timeNano out of range: {nanos}"))
            })?;
            Ok::<_, BybitError>(millis)
        }
        .await
        .in_operation("get_server_time")
    }

    /// Base coins of all spot instruments, sorted and de-duplicated
    ///
    /// GET /v5/market/instruments-info?category=spot
    pub async fn get_tickers(&self) -> Result<Vec<String>> {
        async {
            let query = format!("category={}", Category::Spot.as_str());
            let instruments: ListResult<InstrumentSymbol> = self
                .request_result(Method::GET, INSTRUMENTS_INFO, &query)
                .await?;

            let coins: BTreeSet<String> = instruments
                .list
                .into_iter()
                .map(|instrument| instrument.base_coin)
                .collect();
            Ok::<_, BybitError>(coins.into_iter().collect())
        }
        .await
        .in_operation("get_tickers")
    }

    /// Trading rules for one spot pair
    ///
    /// GET /v5/market/instruments-info?category=spot&symbol={base}{quote}
    pub async fn get_instrument_info(&self, base: &str, quote: &str) -> Result<InstrumentInfo> {
        async {
            let query = format!("category={}&symbol={base}{quote}", Category::Spot.as_str());
            let instruments: ListResult<Instrument> = self
                .request_result(Method::GET, INSTRUMENTS_INFO, &query)
                .await?;

            instruments
                .list
                .into_iter()
                .next()
                .map(InstrumentInfo::from)
                .ok_or_else(|| {
                    BybitError::InvalidResponse(format!("no instrument found for {base}{quote}"))
                })
        }
        .await
        .in_operation("get_instrument_info")
    }

    /// Last price and top of book for one spot pair
    ///
    /// GET /v5/market/tickers?category=spot&symbol={base}{quote}
    pub async fn get_last_coin_info(&self, base: &str, quote: &str) -> Result<LastCoinInfo> {
        async {
            let query = format!("category={}&symbol={base}{quote}", Category::Spot.as_str());
            let tickers: ListResult<Ticker> =
                self.request_result(Method::GET, TICKERS, &query).await?;

            tickers
                .list
                .into_iter()
                .next()
                .map(LastCoinInfo::from)
                .ok_or_else(|| {
                    BybitError::InvalidResponse(format!("no ticker found for {base}{quote}"))
                })
        }
        .await
        .in_operation("get_last_coin_info")
    }

    /// Last traded price of every spot symbol
    ///
    /// GET /v5/market/tickers?category=spot
    pub async fn get_last_prices(&self) -> Result<BTreeMap<String, Decimal>> {
        async {
            let query = format!("category={}", Category::Spot.as_str());
            let tickers: ListResult<Ticker> =
                self.request_result(Method::GET, TICKERS, &query).await?;

            let prices: BTreeMap<String, Decimal> = tickers
                .list
                .into_iter()
                .map(|ticker| (ticker.symbol, ticker.last_price))
                .collect();
            Ok::<_, BybitError>(prices)
        }
        .await
        .in_operation("get_last_prices")
    }

    /// Candles for a spot symbol, oldest first
    ///
    /// GET /v5/market/kline?category=spot&symbol={symbol}&interval={interval}[&limit={limit}]
    pub async fn get_klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: Option<u32>,
    ) -> Result<Vec<Kline>> {
        async {
            let mut query = format!(
                "category={}&symbol={symbol}&interval={}",
                Category::Spot.as_str(),
                timeframe.interval()
            );
            if let Some(limit) = limit {
                query.push_str(&format!("&limit={limit}"));
            }

            let klines: KlineResult = self.request_result(Method::GET, KLINE, &query).await?;
            let mut candles = klines
                .list
                .iter()
                .map(|row| Kline::from_row(row))
                .collect::<Result<Vec<_>>>()?;
            candles.sort_by_key(|kline| kline.start);
            Ok::<_, BybitError>(candles)
        }
        .await
        .in_operation("get_klines")
    }
}
