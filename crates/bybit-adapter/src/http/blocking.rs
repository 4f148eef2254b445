/*
[INPUT]:  Same arguments as the async client operations
[OUTPUT]: Same results, returned on the calling thread
[POS]:    HTTP layer - synchronous facade over `BybitClient`
[UPDATE]: When an operation is added to or removed from `BybitClient`
*/

use std::collections::BTreeMap;

use futures::executor::block_on;
use rust_decimal::Decimal;

use crate::http::{BybitClient, BybitError, ClientConfig, Credentials, Result};
use crate::types::{
    CreateOrderRequest, InstrumentInfo, Kline, LastCoinInfo, OrderAck, OrderExecution, OrderFill,
    Side, Timeframe, WalletAccount,
};

/// Synchronous Bybit client.
///
/// Every call blocks the current thread until the response is decoded. Do not call it
/// from inside an async runtime; use [`BybitClient`] there instead.
#[derive(Debug)]
pub struct BlockingBybitClient {
    inner: BybitClient,
}

impl BlockingBybitClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Build over the blocking transport regardless of `config.asynchronous`
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let inner = BybitClient::blocking(credentials, config)?;
        Ok(Self { inner })
    }

    /// Wrap an existing client, keeping its transport.
    ///
    /// The client must be configured for synchronous mode; an async client needs a
    /// runtime that `block_on` does not provide.
    pub fn from_client(inner: BybitClient) -> Result<Self> {
        if inner.config().asynchronous {
            return Err(BybitError::Config(
                "BlockingBybitClient requires a client configured with asynchronous = false"
                    .to_string(),
            ));
        }
        Ok(Self { inner })
    }

    pub fn inner(&self) -> &BybitClient {
        &self.inner
    }

    pub fn is_connected(&self) -> Result<bool> {
        block_on(self.inner.is_connected())
    }

    pub fn get_server_time(&self) -> Result<u64> {
        block_on(self.inner.get_server_time())
    }

    pub fn get_tickers(&self) -> Result<Vec<String>> {
        block_on(self.inner.get_tickers())
    }

    pub fn get_instrument_info(&self, base: &str, quote: &str) -> Result<InstrumentInfo> {
        block_on(self.inner.get_instrument_info(base, quote))
    }

    pub fn get_last_coin_info(&self, base: &str, quote: &str) -> Result<LastCoinInfo> {
        block_on(self.inner.get_last_coin_info(base, quote))
    }

    pub fn get_last_prices(&self) -> Result<BTreeMap<String, Decimal>> {
        block_on(self.inner.get_last_prices())
    }

    pub fn get_klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: Option<u32>,
    ) -> Result<Vec<Kline>> {
        block_on(self.inner.get_klines(symbol, timeframe, limit))
    }

    pub fn get_balance(&self, coin: &str) -> Result<Vec<WalletAccount>> {
        block_on(self.inner.get_balance(coin))
    }

    pub fn get_wallet_balance(&self, coin: &str) -> Result<Decimal> {
        block_on(self.inner.get_wallet_balance(coin))
    }

    pub fn place_order(&self, req: &CreateOrderRequest) -> Result<OrderAck> {
        block_on(self.inner.place_order(req))
    }

    pub fn place_market_order(
        &self,
        base: &str,
        quote: &str,
        side: Side,
        qty: Decimal,
    ) -> Result<String> {
        block_on(self.inner.place_market_order(base, quote, side, qty))
    }

    pub fn place_limit_order(
        &self,
        base: &str,
        quote: &str,
        side: Side,
        qty: Decimal,
        price: Decimal,
    ) -> Result<String> {
        block_on(self.inner.place_limit_order(base, quote, side, qty, price))
    }

    pub fn cancel_order(&self, base: &str, quote: &str, order_id: &str) -> Result<String> {
        block_on(self.inner.cancel_order(base, quote, order_id))
    }

    pub fn get_order_info(&self, order_id: &str) -> Result<OrderExecution> {
        block_on(self.inner.get_order_info(order_id))
    }

    pub fn get_loaded_trades(
        &self,
        base: &str,
        quote: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<BTreeMap<String, OrderFill>> {
        block_on(self.inner.get_loaded_trades(base, quote, start_time, end_time))
    }

    pub fn get_trade_history(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<OrderFill>> {
        block_on(self.inner.get_trade_history(symbol, limit))
    }
}
