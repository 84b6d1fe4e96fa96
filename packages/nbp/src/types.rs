//! Core data types: parsed publications and formatted query results.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Mid rate of one currency in a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyRate {
    /// Currency name as published (Polish).
    pub name: String,

    /// ISO 4217 code, e.g. "USD".
    pub code: String,

    /// Rate in PLN for `scaler` units of the currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,

    /// Number of currency units the rate applies to (always > 0).
    pub scaler: u32,
}

impl CurrencyRate {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        rate: Decimal,
        scaler: u32,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            rate,
            scaler,
        }
    }

    /// Rate in PLN for a single unit of the currency.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use rust_decimal::Decimal;
    /// use nbp_rates::types::CurrencyRate;
    ///
    /// let huf = CurrencyRate::new("forint", "HUF", Decimal::from_str("4.1234").unwrap(), 100);
    /// assert_eq!(huf.rescaled_rate(), Decimal::from_str("0.041234").unwrap());
    /// ```
    #[must_use]
    pub fn rescaled_rate(&self) -> Decimal {
        if self.scaler == 0 {
            return self.rate;
        }
        self.rate / Decimal::from(self.scaler)
    }
}

/// One NBP currency table publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Table number as printed in the feed, e.g. "115/A/NBP/2012".
    pub number: String,

    /// Date the table was published.
    pub publication_date: NaiveDate,

    /// URL the publication was fetched from.
    pub url: Option<String>,

    /// Rates keyed by currency code.
    pub rates: BTreeMap<String, CurrencyRate>,
}

impl Publication {
    #[must_use]
    pub fn new(number: impl Into<String>, publication_date: NaiveDate, url: Option<String>) -> Self {
        Self {
            number: number.into(),
            publication_date,
            url,
            rates: BTreeMap::new(),
        }
    }

    /// Add or replace the rate for its currency code.
    pub fn set(&mut self, rate: CurrencyRate) {
        self.rates.insert(rate.code.clone(), rate);
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CurrencyRate> {
        self.rates.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Number of currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Currency part of an [`ExchangeRateResult`], with the rate per single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyResult {
    pub name: String,
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl From<&CurrencyRate> for CurrencyResult {
    fn from(rate: &CurrencyRate) -> Self {
        Self {
            name: rate.name.clone(),
            code: rate.code.clone(),
            rate: rate.rescaled_rate(),
        }
    }
}

/// Answer to "what was the rate of currency X on date D".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRateResult {
    /// Date that was asked for.
    pub search_date: NaiveDate,

    /// Number of the table the rate comes from.
    pub table_no: String,

    /// Publication date of that table (never after `search_date`).
    pub pub_date: NaiveDate,

    pub url: Option<String>,

    pub currency: CurrencyResult,
}
