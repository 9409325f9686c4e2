//! Currency-aware amount formatting
//!
//! Pure functions keyed by ISO 4217 code. Every ledger amount is rendered
//! with two fraction digits, since amounts are stored in hundredths.

use crate::models::Money;

/// How a currency symbol is placed around the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub symbol: &'static str,
    /// Symbol goes before the number with no space ("$1.00") or as a
    /// spaced prefix ("CHF 1.00")
    pub spaced: bool,
}

/// Look up the display style for a currency code
pub fn currency_style(currency_code: &str) -> Option<CurrencyStyle> {
    let compact = |symbol| CurrencyStyle {
        symbol,
        spaced: false,
    };
    let spaced = |symbol| CurrencyStyle {
        symbol,
        spaced: true,
    };

    let style = match currency_code.trim().to_uppercase().as_str() {
        "USD" => compact("$"),
        "EUR" => compact("€"),
        "GBP" => compact("£"),
        "JPY" | "CNY" => compact("¥"),
        "INR" => compact("₹"),
        "KRW" => compact("₩"),
        "ILS" => compact("₪"),
        "TRY" => compact("₺"),
        "BRL" => compact("R$"),
        "CAD" => compact("CA$"),
        "AUD" => compact("A$"),
        "NZD" => compact("NZ$"),
        "MXN" => compact("MX$"),
        "CHF" => spaced("CHF"),
        "SEK" => spaced("SEK"),
        "NOK" => spaced("NOK"),
        "DKK" => spaced("DKK"),
        "PLN" => spaced("PLN"),
        "CZK" => spaced("CZK"),
        _ => return None,
    };
    Some(style)
}

/// Group the whole part with thousands separators
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount in a currency, e.g. "$1,234.50" or "CHF 12.00"
///
/// Unknown codes fall back to "<CODE> 12.00".
pub fn format_cents(amount: Money, currency_code: &str) -> String {
    let number = format!("{}.{:02}", group_thousands(amount.major()), amount.minor());
    let sign = if amount.is_negative() { "-" } else { "" };

    match currency_style(currency_code) {
        Some(CurrencyStyle {
            symbol,
            spaced: false,
        }) => format!("{}{}{}", sign, symbol, number),
        Some(CurrencyStyle {
            symbol,
            spaced: true,
        }) => format!("{}{} {}", sign, symbol, number),
        None => format!("{}{} {}", sign, currency_code.trim().to_uppercase(), number),
    }
}

/// Format the absolute value of an amount
pub fn format_abs(amount: Money, currency_code: &str) -> String {
    format_cents(amount.abs(), currency_code)
}

/// Wrap a formatted amount in ANSI color by sign
pub fn colorize(amount: Money, text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}
