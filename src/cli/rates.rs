use super::ui;
use crate::client::ConverterClient;
use crate::core::ExchangeRate;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Renders the EUR based table with each rate and its inverse.
pub fn display_as_table(rates: &[ExchangeRate]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Per 1 EUR"),
        ui::header_cell("EUR per unit"),
    ]);

    let mut sorted: Vec<&ExchangeRate> = rates.iter().collect();
    sorted.sort_by(|a, b| a.quote().cmp(b.quote()));

    for rate in sorted {
        let inverse = rate.invert().ok().map(|r| r.rate());
        table.add_row(vec![
            Cell::new(rate.quote().as_str()),
            Cell::new(rate.rate().normalize().to_string()).set_alignment(CellAlignment::Right),
            ui::format_optional_cell(inverse, |v| format!("{:.6}", v.round_dp(6))),
        ]);
    }

    let title = match rates.first() {
        Some(rate) => format!(
            "ECB reference rates for {}",
            rate.timestamp().format("%Y-%m-%d")
        ),
        None => "ECB reference rates".to_string(),
    };

    format!(
        "{}\n\n{}",
        ui::style_text(&title, ui::StyleType::Title),
        table
    )
}

pub async fn run(client: &ConverterClient, json: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching ECB reference rates...");
    let result = client.latest_rates().await;
    pb.finish_and_clear();

    let rates = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rates)?);
        return Ok(());
    }

    println!("{}", display_as_table(&rates));
    if let Some(updated) = client.last_rate_update_timestamp().await {
        let footer = format!("Fetched at {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("\n{}", ui::style_text(&footer, ui::StyleType::Subtle));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn rate(code: &str, value: &str) -> ExchangeRate {
        ExchangeRate::new(
            Currency::eur(),
            Currency::new(code).unwrap(),
            value.parse().unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 7, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_table_is_sorted_and_shows_inverse() {
        console::set_colors_enabled(false);
        let output = display_as_table(&[rate("USD", "1.25"), rate("GBP", "0.8")]);

        assert!(output.starts_with("ECB reference rates for 2024-05-07"));
        let gbp = output.find("GBP").unwrap();
        let usd = output.find("USD").unwrap();
        assert!(gbp < usd);
        assert!(output.contains("1.250000"));
        assert!(output.contains("0.800000"));
    }

    #[test]
    fn test_zero_rate_has_no_inverse() {
        console::set_colors_enabled(false);
        let output = display_as_table(&[ExchangeRate::new(
            Currency::eur(),
            Currency::new("XXX").unwrap(),
            Decimal::ZERO,
            Utc::now(),
        )
        .unwrap()]);
        assert!(output.contains("N/A"));
    }
}
