//! Currency table with display metadata and default conversion rates.
//!
//! The costing engine works in plain numbers. Currency only matters when a value
//! is shown to the user or when a material bought in one currency is compared
//! with the shop's preferred currency.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// ISO 4217 codes supported for material purchases and reporting.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// US dollar
    #[default]
    #[sea_orm(string_value = "USD")]
    Usd,
    /// Euro
    #[sea_orm(string_value = "EUR")]
    Eur,
    /// British pound
    #[sea_orm(string_value = "GBP")]
    Gbp,
    /// Canadian dollar
    #[sea_orm(string_value = "CAD")]
    Cad,
    /// Australian dollar
    #[sea_orm(string_value = "AUD")]
    Aud,
    /// Japanese yen
    #[sea_orm(string_value = "JPY")]
    Jpy,
    /// Indian rupee
    #[sea_orm(string_value = "INR")]
    Inr,
    /// Mexican peso
    #[sea_orm(string_value = "MXN")]
    Mxn,
    /// Swiss franc
    #[sea_orm(string_value = "CHF")]
    Chf,
    /// Chinese yuan
    #[sea_orm(string_value = "CNY")]
    Cny,
}

impl CurrencyCode {
    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Jpy => "JPY",
            Self::Inr => "INR",
            Self::Mxn => "MXN",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
        }
    }

    /// Symbol placed before formatted amounts
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Cad => "CA$",
            Self::Aud => "A$",
            Self::Jpy | Self::Cny => "¥",
            Self::Inr => "₹",
            Self::Mxn => "MX$",
            Self::Chf => "CHF ",
        }
    }

    /// Full English name of the currency
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Jpy => "Japanese Yen",
            Self::Inr => "Indian Rupee",
            Self::Mxn => "Mexican Peso",
            Self::Chf => "Swiss Franc",
            Self::Cny => "Chinese Yuan",
        }
    }

    /// Number of decimals shown for amounts in this currency.
    #[must_use]
    pub const fn decimals(self) -> usize {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }

    /// How many US dollars one unit of this currency is worth by default.
    ///
    /// These are static reference rates, not live quotes.
    #[must_use]
    pub const fn default_rate_to_usd(self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Eur => 1.08,
            Self::Gbp => 1.27,
            Self::Cad => 0.74,
            Self::Aud => 0.66,
            Self::Jpy => 0.0067,
            Self::Inr => 0.012,
            Self::Mxn => 0.058,
            Self::Chf => 1.13,
            Self::Cny => 0.14,
        }
    }

    /// Renders `amount` with this currency's symbol and precision, e.g. `"$12.50"`.
    #[must_use]
    pub fn format_amount(self, amount: f64) -> String {
        let decimals = self.decimals();
        if amount < 0.0 {
            format!("-{}{:.*}", self.symbol(), decimals, amount.abs())
        } else {
            format!("{}{:.*}", self.symbol(), decimals, amount)
        }
    }
}

/// Converts `amount` between currencies using the default reference rates.
#[must_use]
pub fn convert(amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
    if from == to {
        return amount;
    }
    amount * from.default_rate_to_usd() / to.default_rate_to_usd()
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_uppercase();
        Self::iter()
            .find(|currency| currency.code() == needle)
            .ok_or_else(|| format!("Unknown currency code: {s}"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(CurrencyCode::Usd.format_amount(89.7), "$89.70");
        assert_eq!(CurrencyCode::Eur.format_amount(-3.5), "-€3.50");
        assert_eq!(CurrencyCode::Jpy.format_amount(1500.4), "¥1500");
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        assert_eq!(convert(42.0, CurrencyCode::Gbp, CurrencyCode::Gbp), 42.0);
    }

    #[test]
    fn test_convert_through_usd() {
        let usd = convert(100.0, CurrencyCode::Eur, CurrencyCode::Usd);
        assert!((usd - 108.0).abs() < 1e-9);

        let back = convert(usd, CurrencyCode::Usd, CurrencyCode::Eur);
        assert!((back - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_currency_code() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("CHF".parse::<CurrencyCode>().unwrap(), CurrencyCode::Chf);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_every_currency_code_parses_back() {
        for currency in CurrencyCode::iter() {
            assert_eq!(currency.code().parse::<CurrencyCode>().unwrap(), currency);
            assert_eq!(
                currency.code().to_lowercase().parse::<CurrencyCode>().unwrap(),
                currency
            );
        }
    }
}
