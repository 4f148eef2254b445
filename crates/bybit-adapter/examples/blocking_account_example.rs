/*
[INPUT]:  API credentials from BYBIT_API_KEY / BYBIT_SECRET_KEY, optional order id argument
[OUTPUT]: Wallet balance and order outcome
[POS]:    Examples - synchronous account and order queries
[UPDATE]: When the blocking facade changes
*/

use bybit_adapter::*;

/// Example: Account queries from plain synchronous code
///
/// Usage: `cargo run --example blocking_account_example -- [order_id]`
fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Bybit Blocking Example ===\n");

    let client = match Credentials::from_env().and_then(BlockingBybitClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.get_wallet_balance("USDT") {
        Ok(balance) => println!("✓ USDT balance: {}", balance),
        Err(e) => println!("✗ [{}] {}", e.status().code(), e),
    }

    let Some(order_id) = std::env::args().nth(1) else {
        return;
    };

    match client.get_order_info(&order_id) {
        Ok(OrderExecution::Filled(fill)) => println!(
            "✓ {} {:?} qty {} @ {} (fee {})",
            fill.symbol, fill.side, fill.quantity, fill.price, fill.fee
        ),
        Ok(outcome) => println!("… [{}] {}", outcome.status().code(), outcome.message()),
        Err(e) => println!("✗ [{}] {}", e.status().code(), e),
    }
}
