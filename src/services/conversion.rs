//! Currency conversion seam
//!
//! Conversion happens before an expense enters the ledger: the caller asks a
//! rate provider for a rate, converts the typed amount into ledger cents and
//! stores the result. The balance and settlement engines never see rates.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{SplitError, SplitResult};
use crate::models::Money;

/// Source of exchange rates between currency codes
///
/// Implementations may be slow or fallible (network lookups); callers resolve
/// the rate fully before building an expense.
pub trait RateProvider {
    /// Units of `to` per one unit of `from`
    fn rate(&self, from: &str, to: &str) -> SplitResult<f64>;
}

/// In-memory table of fixed rates
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<(String, String), f64>,
}

impl FixedRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rate; the inverse direction is derived automatically
    pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if rate > 0.0 {
            self.rates.insert((to.clone(), from.clone()), 1.0 / rate);
        }
        self.rates.insert((from, to), rate);
        self
    }
}

impl RateProvider for FixedRates {
    fn rate(&self, from: &str, to: &str) -> SplitResult<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return Ok(1.0);
        }
        self.rates
            .get(&(from.clone(), to.clone()))
            .copied()
            .ok_or_else(|| {
                SplitError::Conversion(format!(
                    "Exchange rate not available for {} to {}",
                    from, to
                ))
            })
    }
}

/// Convert an amount with a resolved rate, rounding to the nearest cent
///
/// Halves round away from zero.
pub fn convert_amount(amount: Money, rate: f64) -> SplitResult<Money> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(SplitError::Conversion(format!(
            "Exchange rate must be a positive number, got {}",
            rate
        )));
    }

    let converted = (amount.cents() as f64 * rate).round();
    if !converted.is_finite() || converted.abs() > i64::MAX as f64 {
        return Err(SplitError::Conversion(format!(
            "Converted amount for {} is out of range",
            amount
        )));
    }

    Ok(Money::from_cents(converted as i64))
}

/// Convert between two currencies through a provider
pub fn convert<P: RateProvider + ?Sized>(
    provider: &P,
    amount: Money,
    from: &str,
    to: &str,
) -> SplitResult<Money> {
    if from.eq_ignore_ascii_case(to) {
        return Ok(amount);
    }

    let rate = provider.rate(from, to)?;
    let converted = convert_amount(amount, rate)?;
    debug!(
        from,
        to,
        rate,
        amount = amount.cents(),
        converted = converted.cents(),
        "converted amount"
    );
    Ok(converted)
}
