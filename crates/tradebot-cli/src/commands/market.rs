//! 시세 및 계좌 조회 명령.

use super::print_json;
use tradebot_exchange::FuturesClient;

pub async fn market_data(client: &FuturesClient, symbols: &[String]) -> anyhow::Result<()> {
    let symbols: Vec<String> = symbols.iter().map(|s| s.to_uppercase()).collect();
    let tickers = client.get_market_data(Some(symbols.as_slice())).await?;
    print_json(&tickers)
}

pub async fn price(client: &FuturesClient, symbol: &str) -> anyhow::Result<()> {
    let price = client.get_market_price(symbol).await?;
    print_json(&price)
}

pub async fn account(client: &FuturesClient) -> anyhow::Result<()> {
    let snapshot = client.get_account_info().await?;
    print_json(&snapshot)
}

pub async fn exchange_info(client: &FuturesClient) -> anyhow::Result<()> {
    let info = client.get_exchange_info().await?;
    print_json(&info)
}
