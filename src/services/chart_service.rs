//! Price history charts
//!
//! Pulls market history from CoinGecko and renders it to a PNG that the
//! bot uploads as a photo.

use chrono::{TimeZone, Utc};
use plotters::prelude::*;

use crate::api::coingecko::{resolve_coin_id, CoinGeckoClient, CoinGeckoError};
use crate::models::PricePoint;

/// Parse the `/chart` days argument. Defaults to 7, capped at a year.
pub fn parse_chart_days(arg: Option<&str>) -> Result<u32, String> {
    let days = match arg {
        None => 7,
        Some(raw) => raw
            .trim_end_matches('d')
            .parse::<u32>()
            .map_err(|_| "❌ Invalid day count. Examples: `7`, `30`, `365`".to_string())?,
    };

    if days == 0 || days > 365 {
        return Err("❌ Day count must be between 1 and 365".to_string());
    }

    Ok(days)
}

/// Fetch the price history of a coin for the last `days` days.
pub async fn get_market_history(
    coingecko: &CoinGeckoClient,
    symbol_or_id: &str,
    vs_currency: &str,
    days: u32,
) -> Result<Vec<PricePoint>, String> {
    let id = resolve_coin_id(symbol_or_id);

    let chart = coingecko
        .market_chart(&id, vs_currency, days)
        .await
        .map_err(|e| match e {
            CoinGeckoError::NotFound(_) => {
                format!("❌ Could not find price history for '{}'", symbol_or_id)
            }
            other => format!("Could not fetch price history: {}", other),
        })?;

    let mut points: Vec<PricePoint> = chart
        .prices
        .iter()
        .filter_map(|&(ts_ms, price)| {
            let timestamp = Utc.timestamp_millis_opt(ts_ms as i64).single()?;
            Some(PricePoint { timestamp, price })
        })
        .collect();

    // Sort by timestamp (should already be sorted upstream, but ensure it)
    points.sort_by_key(|p| p.timestamp);

    Ok(points)
}

/// Render price points as a PNG line chart.
pub fn render_price_chart(
    points: &[PricePoint],
    coin_label: &str,
    vs_currency: &str,
    days: u32,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if points.len() < 2 {
        return Err("❌ Not enough price data to generate chart (minimum 2 points required).".to_string());
    }

    // Use a temporary file path for BitMapBackend
    let temp_file = format!("/tmp/birrbot_chart_{}.png", chrono::Utc::now().timestamp_millis());

    {
        let backend = BitMapBackend::new(&temp_file, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        // Find price range
        let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_price = points
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        // Add some padding to the price range
        let price_range = (max_price - min_price).max(1e-8); // Avoid division by zero
        let padding = price_range * 0.1;
        let y_min = (min_price - padding).max(0.0);
        let y_max = max_price + padding;

        // Get time range
        let x_min = points[0].timestamp;
        let x_max = points[points.len() - 1].timestamp;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                &format!(
                    "{}/{} Price Chart ({}d)",
                    coin_label.to_uppercase(),
                    vs_currency.to_uppercase(),
                    days
                ),
                ("sans-serif", 40.0).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        chart
            .configure_mesh()
            .y_desc(&format!(
                "{} per 1 {}",
                vs_currency.to_uppercase(),
                coin_label.to_uppercase()
            ))
            .x_desc("Time")
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.timestamp, p.price)),
                &BLUE,
            ))
            .map_err(|e| format!("Failed to draw series: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    // Read the temporary file into memory
    use std::fs;
    let image_data = fs::read(&temp_file).map_err(|e| format!("Failed to read chart file: {}", e))?;

    // Clean up temporary file
    let _ = fs::remove_file(&temp_file);

    Ok(image_data)
}

/// Fetch history and render it in one go, as `/chart` needs it.
pub async fn generate_chart(
    coingecko: &CoinGeckoClient,
    symbol_or_id: &str,
    vs_currency: &str,
    days: u32,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    let points = get_market_history(coingecko, symbol_or_id, vs_currency, days).await?;
    render_price_chart(&points, symbol_or_id, vs_currency, days, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_arguments() {
        assert_eq!(parse_chart_days(None).unwrap(), 7);
        assert_eq!(parse_chart_days(Some("30")).unwrap(), 30);
        assert_eq!(parse_chart_days(Some("30d")).unwrap(), 30);
        assert!(parse_chart_days(Some("0")).is_err());
        assert!(parse_chart_days(Some("9000")).is_err());
        assert!(parse_chart_days(Some("abc")).is_err());
    }
}
