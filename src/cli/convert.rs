use super::ui;
use crate::client::ConverterClient;
use crate::core::{ExchangeRate, Money};
use anyhow::Result;
use chrono::SecondsFormat;
use rust_decimal::Decimal;

pub fn format_rate(rate: &ExchangeRate) -> String {
    format!(
        "1 {} = {} {}\n{}",
        rate.base(),
        ui::style_text(&rate.rate().normalize().to_string(), ui::StyleType::Value),
        rate.quote(),
        ui::style_text(
            &format!(
                "as of {}",
                rate.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            ui::StyleType::Subtle
        )
    )
}

pub fn format_conversion(source: &Money, converted: &Money) -> String {
    format!(
        "{} = {}",
        source,
        ui::style_text(&converted.to_string(), ui::StyleType::Value)
    )
}

pub async fn rate(client: &ConverterClient, from: &str, to: &str, json: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let result = client.exchange_rate(from, to).await;
    pb.finish_and_clear();

    let rate = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rate)?);
    } else {
        println!("{}", format_rate(&rate));
    }
    Ok(())
}

pub async fn convert(
    client: &ConverterClient,
    amount: Decimal,
    from: &str,
    to: &str,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner("Converting...");
    let result = client.convert(from, to, amount).await;
    pb.finish_and_clear();

    let converted = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&converted)?);
    } else {
        let source = Money::new(amount, from.parse()?);
        println!("{}", format_conversion(&source, &converted));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_rate() {
        console::set_colors_enabled(false);
        let rate = ExchangeRate::new(
            Currency::new("USD").unwrap(),
            Currency::new("GBP").unwrap(),
            "0.8181".parse().unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 7, 0, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(
            format_rate(&rate),
            "1 USD = 0.8181 GBP\nas of 2024-05-07T00:00:00Z"
        );
    }

    #[test]
    fn test_format_conversion() {
        console::set_colors_enabled(false);
        let source = Money::new(Decimal::from(100), Currency::new("USD").unwrap());
        let converted = Money::new("90.9091".parse().unwrap(), Currency::eur());
        assert_eq!(
            format_conversion(&source, &converted),
            "100.00 USD = 90.91 EUR"
        );
    }
}
