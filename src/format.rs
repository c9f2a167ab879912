//! Display helpers shared by the templates

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::RentalStatus;

/// Formats a Brazilian phone number.
///
/// Non-digits are stripped first. 11 digits become `(11) 98765-4321`,
/// 10 digits become `(11) 3333-4444`; anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

/// `dd/mm/yyyy`, or `N/A` when there is no date
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "N/A".to_string(),
    }
}

/// Price with two decimals and a comma separator, `0,00` when absent
pub fn format_price(price: Option<Decimal>) -> String {
    let price = price.unwrap_or_default().round_dp(2);
    format!("{:.2}", price).replace('.', ",")
}

pub fn status_label(status: RentalStatus) -> &'static str {
    match status {
        RentalStatus::Available => "DISPONÍVEL",
        RentalStatus::Rented => "ALUGADO",
        RentalStatus::Cancelled => "CANCELADO",
        RentalStatus::Unknown => "DESCONHECIDO",
    }
}

/// CSS class of the status badge; unknown states share the cancelled look
pub fn status_class(status: RentalStatus) -> &'static str {
    match status {
        RentalStatus::Available => "status-disponivel",
        RentalStatus::Rented => "status-locado",
        RentalStatus::Cancelled | RentalStatus::Unknown => "status-cancelado",
    }
}

/// Escapes text for use inside HTML element content and quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
