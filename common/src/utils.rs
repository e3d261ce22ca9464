use crate::config::Config;
use crate::constants::DEFAULT_CURRENCY;
use chrono::{DateTime, Local, Utc};

/// Public URL of an image stored on the image host.
pub fn image_url(config: &Config, transformations: &str, public_id: &str) -> String {
    format!(
        "{}/{}/image/upload/{}/{}",
        config.image_host, config.cloud_name, transformations, public_id
    )
}

pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

pub fn cents_to_dollars(cents: f64) -> f64 {
    cents / 100.0
}

/// "$10.99" for usd, "10.99 LKR" for anything else.
pub fn format_currency(dollars: f64, currency: &str) -> String {
    if currency.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
        format!("${dollars:.2}")
    } else {
        format!("{dollars:.2} {}", currency.to_ascii_uppercase())
    }
}

pub fn format_cents(cents: f64) -> String {
    format_currency(cents_to_dollars(cents), DEFAULT_CURRENCY)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
