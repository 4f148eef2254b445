/*
[INPUT]:  Mock transports and mock HTTP responses
[OUTPUT]: Test results for the public client operations
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints or failure handling change
*/

mod common;

use bybit_adapter::http::dispatch::{HEADER_API_KEY, HEADER_SIGN, HEADER_TIMESTAMP};
use bybit_adapter::http::RawResponse;
use bybit_adapter::{BybitClient, BybitError, ClientConfig, Result, Side, Status, Timeframe};
use common::{client_with_transport, mock_client, ok_envelope, setup_mock_server, test_credentials};
use reqwest::Method;
use rstest::rstest;
use rust_decimal::Decimal;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// Call every public operation once, discarding successful values
async fn run_every_operation(client: &BybitClient) -> Vec<(&'static str, Result<()>)> {
    let qty = Decimal::new(1, 2);
    vec![
        ("is_connected", client.is_connected().await.map(|_| ())),
        ("get_server_time", client.get_server_time().await.map(|_| ())),
        ("get_tickers", client.get_tickers().await.map(|_| ())),
        (
            "get_instrument_info",
            client.get_instrument_info("BTC", "USDT").await.map(|_| ()),
        ),
        (
            "get_last_coin_info",
            client.get_last_coin_info("BTC", "USDT").await.map(|_| ()),
        ),
        ("get_last_prices", client.get_last_prices().await.map(|_| ())),
        (
            "get_klines",
            client
                .get_klines("BTCUSDT", Timeframe::Hour1, Some(10))
                .await
                .map(|_| ()),
        ),
        ("get_balance", client.get_balance("USDT").await.map(|_| ())),
        (
            "get_wallet_balance",
            client.get_wallet_balance("USDT").await.map(|_| ()),
        ),
        (
            "place_market_order",
            client
                .place_market_order("BTC", "USDT", Side::Buy, qty)
                .await
                .map(|_| ()),
        ),
        (
            "place_limit_order",
            client
                .place_limit_order("BTC", "USDT", Side::Sell, qty, Decimal::new(30000, 0))
                .await
                .map(|_| ()),
        ),
        (
            "cancel_order",
            client.cancel_order("BTC", "USDT", "1").await.map(|_| ()),
        ),
        ("get_order_info", client.get_order_info("1").await.map(|_| ())),
        (
            "get_loaded_trades",
            client
                .get_loaded_trades("BTC", "USDT", 0, 1_700_000_000_000)
                .await
                .map(|_| ()),
        ),
        (
            "get_trade_history",
            client.get_trade_history("BTCUSDT", Some(5)).await.map(|_| ()),
        ),
    ]
}

#[test]
fn test_client_creation() {
    let _client = assert_ok!(BybitClient::new(test_credentials()));
}

#[test]
fn test_client_with_invalid_base_url() {
    let result = BybitClient::with_config(
        test_credentials(),
        ClientConfig::default().with_base_url("not a url"),
    );
    assert!(matches!(result, Err(BybitError::UrlParse(_))));
}

#[rstest]
#[case(400)]
#[case(403)]
#[case(500)]
#[case(503)]
#[tokio::test]
async fn test_non_success_status_fails_every_operation(#[case] status: u16) {
    let (client, _transport) = client_with_transport(RawResponse::new(status, ""));

    for (name, result) in run_every_operation(&client).await {
        let err = result.expect_err(name);
        let message = err.to_string();

        assert_eq!(err.operation(), Some(name));
        assert_eq!(err.status(), Status::Failure);
        assert!(message.starts_with(&format!("{name} | ")), "{message}");
        assert!(message.contains(&status.to_string()), "{message}");
    }
}

#[tokio::test]
async fn test_exchange_rejection_fails_every_operation() {
    let body = r#"{"retCode":10001,"retMsg":"params error: symbol invalid","result":{},"time":1}"#;
    let (client, _transport) = client_with_transport(RawResponse::new(200, body));

    for (name, result) in run_every_operation(&client).await {
        let err = result.expect_err(name);

        assert!(err.root().is_exchange_error(), "{name}: {err}");
        assert!(err.to_string().contains("params error: symbol invalid"));
        assert!(err.to_string().starts_with(name));
    }
}

#[tokio::test]
async fn test_get_query_is_sent_verbatim_and_signed() {
    let (client, transport) = client_with_transport(RawResponse::new(
        200,
        ok_envelope(serde_json::json!({"list": [{"coin": [{"walletBalance": "1"}]}]})).to_string(),
    ));

    assert_ok!(client.get_wallet_balance("USDT").await);

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(
        request.url,
        "https://api.bybit.com/v5/account/wallet-balance?accountType=UNIFIED&coin=USDT"
    );
    assert!(request.body.is_none());

    let timestamp: i64 = request.header(HEADER_TIMESTAMP).unwrap().parse().unwrap();
    let expected = client
        .signer()
        .sign_request(
            timestamp,
            &Method::GET,
            "/v5/account/wallet-balance",
            "accountType=UNIFIED&coin=USDT",
        )
        .unwrap();
    assert_eq!(request.header(HEADER_SIGN), Some(expected.as_str()));
    assert_eq!(request.header(HEADER_API_KEY), Some(common::TEST_API_KEY));
}

#[tokio::test]
async fn test_post_body_is_the_signed_string() {
    let (client, transport) = client_with_transport(RawResponse::new(
        200,
        ok_envelope(serde_json::json!({"orderId": "99", "orderLinkId": ""})).to_string(),
    ));

    let order_id = assert_ok!(
        client
            .place_limit_order("ETH", "USDT", Side::Sell, Decimal::new(5, 1), Decimal::new(2500, 0))
            .await
    );
    assert_eq!(order_id, "99");

    let requests = transport.requests();
    let request = &requests[0];
    let body = request.body.as_deref().unwrap();
    assert_eq!(request.url, "https://api.bybit.com/v5/order/create");
    assert_eq!(
        body,
        r#"{"category":"spot","symbol":"ETHUSDT","side":"Sell","orderType":"Limit","qty":"0.5","price":"2500"}"#
    );

    let timestamp: i64 = request.header(HEADER_TIMESTAMP).unwrap().parse().unwrap();
    let expected = client
        .signer()
        .sign_request(timestamp, &Method::POST, "/v5/order/create", body)
        .unwrap();
    assert_eq!(request.header(HEADER_SIGN), Some(expected.as_str()));
}

#[tokio::test]
async fn test_order_info_filled_over_wiremock() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v5/order/history"))
        .and(query_param("category", "spot"))
        .and(header("X-BAPI-API-KEY", common::TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(serde_json::json!({
            "list": [{
                "orderId": "5",
                "symbol": "BTCUSDT",
                "side": "Buy",
                "orderType": "Market",
                "orderStatus": "PartiallyFilledCanceled",
                "avgPrice": "30000",
                "updatedTime": "1700000000999"
            }]
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v5/execution/list"))
        .and(query_param("orderId", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(serde_json::json!({
            "list": [{
                "orderId": "5",
                "symbol": "BTCUSDT",
                "side": "Buy",
                "orderType": "Market",
                "execPrice": "30000",
                "execQty": "0.01",
                "execFee": "0.00001",
                "execTime": "1700000000500"
            }]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = assert_ok!(mock_client(&server).get_order_info("5").await);
    let fill = outcome.fill().unwrap();

    assert_eq!(outcome.status(), Status::Success);
    assert_eq!(fill.amount, Decimal::new(300, 0));
    assert_eq!(fill.quantity, "0.00999".parse::<Decimal>().unwrap());
    assert_eq!(fill.fee, "0.00001".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_trade_history_over_wiremock() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v5/execution/list"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(serde_json::json!({
            "nextPageCursor": "",
            "category": "spot",
            "list": [
                {"orderId": "2", "symbol": "BTCUSDT", "side": "Sell", "orderType": "Limit",
                 "execPrice": "31000", "execQty": "0.1", "execFee": "3.1", "execTime": "20"},
                {"orderId": "1", "symbol": "BTCUSDT", "side": "Buy", "orderType": "Limit",
                 "execPrice": "30000", "execQty": "0.1", "execFee": "0.0001", "execTime": "10"}
            ]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let fills = assert_ok!(mock_client(&server).get_trade_history("BTCUSDT", Some(50)).await);

    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0].order_id, "2");
    assert_eq!(fills[0].amount, Decimal::new(30969, 1));
    assert_eq!(fills[1].order_id, "1");
    assert_eq!(fills[1].quantity, "0.0999".parse::<Decimal>().unwrap());
}
