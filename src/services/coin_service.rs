//! Coin info lookups

use crate::api::coingecko::{resolve_coin_id, CoinGeckoClient, CoinGeckoError};
use crate::models::CoinInfo;

/// Get the market snapshot for a coin by symbol or CoinGecko id.
pub async fn get_coin_info(
    coingecko: &CoinGeckoClient,
    symbol_or_id: &str,
) -> Result<CoinInfo, String> {
    if symbol_or_id.trim().is_empty() {
        return Err("❌ Please provide a coin symbol. Example: `/coin BTC`".to_string());
    }

    let id = resolve_coin_id(symbol_or_id.trim());

    let detail = coingecko.coin_info(&id).await.map_err(|e| match e {
        CoinGeckoError::NotFound(_) => format!(
            "❌ Could not find information for '{}'. Please check the symbol.",
            symbol_or_id.trim()
        ),
        other => format!("Could not fetch coin data: {}", other),
    })?;

    let market = detail.market_data;

    Ok(CoinInfo {
        name: detail.name,
        symbol: detail.symbol.to_uppercase(),
        price_usd: market
            .as_ref()
            .and_then(|m| m.current_price.get("usd").copied()),
        market_cap_usd: market
            .as_ref()
            .and_then(|m| m.market_cap.get("usd").copied()),
        change_24h: market.as_ref().and_then(|m| m.price_change_percentage_24h),
    })
}
