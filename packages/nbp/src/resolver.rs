//! Resolution of a calendar date to the NBP table in force on that date.
//!
//! The publication number for a date is only an estimate (holidays are not
//! known), so the resolver starts at the estimate and walks backward until
//! it finds a table published on or before the requested date.

use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::fetch::fetch_data;
use crate::http::{HttpTransport, Transport};
use crate::location::PublicationCoordinate;
use crate::parser::parse;
use crate::sequence::BackwardSequence;
use crate::table::{calculate_number, TableType};
use crate::types::{CurrencyResult, ExchangeRateResult, Publication};

/// Resolves dates to publications using a transport and explicit settings.
#[derive(Debug, Clone)]
pub struct Resolver<T> {
    transport: T,
    config: ResolverConfig,
}

impl Resolver<HttpTransport> {
    /// Create a resolver that downloads over HTTP.
    pub fn with_http(config: ResolverConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new()?, config))
    }
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T, config: ResolverConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Candidate locations for `date`, newest first.
    pub fn candidates(&self, date: NaiveDate, table_type: TableType) -> BackwardSequence {
        let start = PublicationCoordinate::new(
            date.year(),
            calculate_number(date, table_type),
            table_type,
        );
        BackwardSequence::new(start)
            .with_budget(self.config.step_budget)
            .with_cache_root(self.config.cache_root.clone())
    }

    /// Find the latest publication of `table_type` dated on or before `date`.
    ///
    /// Returns `Ok(None)` when the step budget runs out first. Missing or
    /// unreachable candidates are skipped; a candidate that downloads but
    /// fails to parse aborts the search with the parse error.
    pub fn resolve(&self, date: NaiveDate, table_type: TableType) -> Result<Option<Publication>> {
        for location in self.candidates(date, table_type) {
            let Some(content) = fetch_data(&self.transport, &location) else {
                continue;
            };
            let publication = parse(&content, Some(&location.url))?;

            if publication.publication_date <= date {
                tracing::info!(
                    table = %table_type,
                    number = %publication.number,
                    pub_date = %publication.publication_date,
                    url = %location.url,
                    "Resolved publication"
                );
                return Ok(Some(publication));
            }
            tracing::debug!(
                url = %location.url,
                pub_date = %publication.publication_date,
                %date,
                "Publication is newer than requested date"
            );
        }

        tracing::info!(table = %table_type, %date, "No publication found within step budget");
        Ok(None)
    }

    /// Look up the rate of `currency` on `date`, trying tables A then B.
    ///
    /// The currency code is matched case-insensitively. Returns `Ok(None)`
    /// when no table within budget lists the currency.
    pub fn download_exchange_rate(
        &self,
        date: NaiveDate,
        currency: &str,
    ) -> Result<Option<ExchangeRateResult>> {
        let code = currency.trim().to_ascii_uppercase();
        for table_type in TableType::ALL {
            let Some(publication) = self.resolve(date, table_type)? else {
                continue;
            };
            if let Some(result) = format_result(&publication, &code, date) {
                return Ok(Some(result));
            }
            tracing::debug!(table = %table_type, code = %code, "Currency not listed in table");
        }
        Ok(None)
    }
}

/// Format the rate of `code` in `publication` as a query result.
///
/// Returns `None` when the publication does not list the currency.
pub fn format_result(
    publication: &Publication,
    code: &str,
    search_date: NaiveDate,
) -> Option<ExchangeRateResult> {
    let rate = publication.get(code)?;
    Some(ExchangeRateResult {
        search_date,
        table_no: publication.number.clone(),
        pub_date: publication.publication_date,
        url: publication.url.clone(),
        currency: CurrencyResult::from(rate),
    })
}

/// Resolve a publication over HTTP.
///
/// `table_type` is validated before any network activity.
pub fn resolve(
    date: NaiveDate,
    table_type: &str,
    cache_root: Option<&Path>,
) -> Result<Option<Publication>> {
    let table_type: TableType = table_type.parse()?;
    Resolver::with_http(config_for(cache_root))?.resolve(date, table_type)
}

/// Look up an exchange rate over HTTP.
pub fn download_exchange_rate(
    date: NaiveDate,
    currency: &str,
    cache_root: Option<&Path>,
) -> Result<Option<ExchangeRateResult>> {
    Resolver::with_http(config_for(cache_root))?.download_exchange_rate(date, currency)
}

fn config_for(cache_root: Option<&Path>) -> ResolverConfig {
    match cache_root {
        Some(root) => ResolverConfig::new().with_cache_root(root),
        None => ResolverConfig::new(),
    }
}
