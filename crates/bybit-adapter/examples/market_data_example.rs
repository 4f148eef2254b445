/*
[INPUT]:  API credentials from BYBIT_API_KEY / BYBIT_SECRET_KEY
[OUTPUT]: Spot market data (server time, instrument, ticker, candles)
[POS]:    Examples - async market data queries
[UPDATE]: When adding new market data endpoints
*/

use bybit_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query spot market data with the async client
///
/// Run with `RUST_LOG=bybit_adapter=debug` to see every signed request and raw response.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bybit Market Data Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load credentials: {}", e);
            return;
        }
    };
    let client = match BybitClient::new(credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.get_server_time().await {
        Ok(time) => println!("✓ Server time: {}", time),
        Err(e) => println!("✗ {}", e),
    }

    match client.get_instrument_info("BTC", "USDT").await {
        Ok(info) => println!(
            "✓ BTCUSDT tick {} min qty {} min amount {}",
            info.tick_size, info.min_order_qty, info.min_order_amt
        ),
        Err(e) => println!("✗ {}", e),
    }

    match client.get_last_coin_info("BTC", "USDT").await {
        Ok(ticker) => println!(
            "✓ BTCUSDT last {} bid {} ask {}",
            ticker.last_price, ticker.bid1_price, ticker.ask1_price
        ),
        Err(e) => println!("✗ {}", e),
    }

    match client.get_klines("BTCUSDT", Timeframe::Hour1, Some(5)).await {
        Ok(klines) => {
            for kline in klines {
                println!("  {} close {}", kline.start, kline.close);
            }
        }
        Err(e) => println!("✗ {}", e),
    }

    println!("\n✓ Market data example complete");
}
