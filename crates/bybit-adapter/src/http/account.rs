/*
[INPUT]:  Coin name
[OUTPUT]: Unified-account wallet balances
[POS]:    HTTP layer - account endpoints (signed)
[UPDATE]: When adding account endpoints or changing balance shaping
*/

use reqwest::Method;
use rust_decimal::Decimal;

use crate::http::error::OperationContext;
use crate::http::{BybitClient, BybitError, Result};
use crate::types::{AccountType, ListResult, WalletAccount};

const WALLET_BALANCE: &str = "/v5/account/wallet-balance";

impl BybitClient {
    /// Full wallet balance for one coin
    ///
    /// GET /v5/account/wallet-balance?accountType=UNIFIED&coin={coin}
    pub async fn get_balance(&self, coin: &str) -> Result<Vec<WalletAccount>> {
        self.wallet_accounts(coin).await.in_operation("get_balance")
    }

    /// Wallet balance of one coin, rounded to 2 decimal places
    ///
    /// GET /v5/account/wallet-balance?accountType=UNIFIED&coin={coin}
    pub async fn get_wallet_balance(&self, coin: &str) -> Result<Decimal> {
        async {
            let accounts = self.wallet_accounts(coin).await?;
            let balance = accounts
                .first()
                .and_then(|account| account.coin.first())
                .map(|entry| entry.wallet_balance)
                .ok_or_else(|| {
                    BybitError::InvalidResponse(format!("no wallet balance returned for {coin}"))
                })?;
            Ok::<_, BybitError>(balance.round_dp(2))
        }
        .await
        .in_operation("get_wallet_balance")
    }

    async fn wallet_accounts(&self, coin: &str) -> Result<Vec<WalletAccount>> {
        let query = format!("accountType={}&coin={coin}", AccountType::Unified.as_str());
        let accounts: ListResult<WalletAccount> = self
            .request_result(Method::GET, WALLET_BALANCE, &query)
            .await?;
        Ok(accounts.list)
    }
}
