//! Fetching and mapping P2P offers
//!
//! Bridges the wire-format advertisements from the exchange into the
//! domain [`Offer`] consumed by the listing commands and the quote
//! selector.

use tracing::warn;

use crate::api::binance::{AdEntry, AdSearchRequest, BinanceP2pClient, TradeType};
use crate::models::{MerchantReliability, Offer};

/// Fetch the current offers for a pair.
///
/// `amount` filters for ads transactable at that fiat amount (the search
/// endpoint's own filter). The returned offers keep the upstream order,
/// which is best-price-first for the requested side.
pub async fn fetch_offers(
    binance: &BinanceP2pClient,
    asset: &str,
    fiat: &str,
    trade_type: TradeType,
    rows: u32,
    amount: Option<f64>,
) -> Result<Vec<Offer>, String> {
    let request = AdSearchRequest::new(asset, fiat, trade_type, rows, amount);

    let ads = binance
        .search_ads(&request)
        .await
        .map_err(|e| format!("Could not fetch P2P offers: {}", e))?;

    let offers: Vec<Offer> = ads.iter().filter_map(map_ad).collect();
    if offers.len() < ads.len() {
        warn!("Dropped {} unparsable ads", ads.len() - offers.len());
    }

    Ok(offers)
}

/// Map one advertisement to a domain offer.
///
/// Ads with malformed numbers or non-positive price/amount are dropped;
/// a broken ad must never reach the selector.
pub fn map_ad(entry: &AdEntry) -> Option<Offer> {
    let price: f64 = entry.adv.price.trim().parse().ok()?;
    let available_amount: f64 = entry.adv.surplus_amount.trim().parse().ok()?;
    let min_limit: f64 = entry.adv.min_single_trans_amount.trim().parse().ok()?;
    let max_limit: f64 = entry.adv.max_single_trans_amount.trim().parse().ok()?;

    if price <= 0.0 || available_amount <= 0.0 || min_limit > max_limit {
        return None;
    }

    Some(Offer {
        merchant: entry.advertiser.nick_name.clone(),
        price,
        available_amount,
        min_limit,
        max_limit,
        reliability: MerchantReliability {
            completion_rate: entry.advertiser.month_finish_rate,
            month_orders: entry.advertiser.month_order_count,
            pro_merchant: entry.advertiser.user_type.as_deref() == Some("merchant"),
        },
    })
}

/// Estimate the fiat value of a base-asset amount from the current best
/// offer, used when the user searches by an asset amount but the upstream
/// filter only takes fiat.
pub async fn estimate_fiat_amount(
    binance: &BinanceP2pClient,
    asset: &str,
    fiat: &str,
    trade_type: TradeType,
    base_amount: f64,
) -> Result<f64, String> {
    let offers = fetch_offers(binance, asset, fiat, trade_type, 1, None).await?;

    let best = offers
        .first()
        .ok_or_else(|| "Could not get a base rate for conversion".to_string())?;

    Ok(base_amount * best.price)
}

/// Render offers as a monospace table for chat display.
pub fn format_offer_listing(offers: &[Offer], fiat: &str) -> String {
    use crate::utils::format::format_number;
    use crate::utils::Table;

    let limits_header = format!("Limits ({})", fiat);
    let mut table = Table::new(vec!["#", "Merchant", "Rate", limits_header.as_str(), "Orders"])
        .align_right(2);

    for (i, offer) in offers.iter().enumerate() {
        let rank = (i + 1).to_string();
        let rate = format_number(offer.price);
        let limits = format!(
            "{} - {}",
            format_number(offer.min_limit),
            format_number(offer.max_limit)
        );
        let orders = format!(
            "{} ({:.1}%)",
            offer.reliability.month_orders,
            offer.reliability.completion_rate * 100.0
        );
        table.add_row(vec![
            rank.as_str(),
            offer.merchant.as_str(),
            rate.as_str(),
            limits.as_str(),
            orders.as_str(),
        ]);
    }

    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::binance::models::{Adv, Advertiser};

    fn entry(price: &str, surplus: &str, min: &str, max: &str) -> AdEntry {
        AdEntry {
            adv: Adv {
                price: price.to_string(),
                surplus_amount: surplus.to_string(),
                min_single_trans_amount: min.to_string(),
                max_single_trans_amount: max.to_string(),
                asset: Some("USDT".to_string()),
                fiat_unit: Some("ETB".to_string()),
            },
            advertiser: Advertiser {
                nick_name: "AddisTrader".to_string(),
                month_order_count: 412,
                month_finish_rate: 0.987,
                user_type: Some("merchant".to_string()),
            },
        }
    }

    #[test]
    fn maps_a_valid_ad() {
        let offer = map_ad(&entry("145.50", "812.34", "1000", "50000")).unwrap();

        assert_eq!(offer.merchant, "AddisTrader");
        assert!((offer.price - 145.5).abs() < 1e-9);
        assert!(offer.reliability.pro_merchant);
        assert_eq!(offer.reliability.month_orders, 412);
    }

    #[test]
    fn drops_malformed_and_inverted_ads() {
        assert!(map_ad(&entry("not-a-number", "812", "1000", "50000")).is_none());
        assert!(map_ad(&entry("0", "812", "1000", "50000")).is_none());
        assert!(map_ad(&entry("145.5", "812", "50000", "1000")).is_none());
    }
}
