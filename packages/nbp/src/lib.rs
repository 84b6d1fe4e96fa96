//! NBP Rates - historical exchange rates from the National Bank of Poland.
//!
//! NBP publishes its currency tables as numbered XML files
//! (`<year>/<type>/<yy><type><nnn>.xml`) rather than by date. This crate
//! estimates which publication number a date would carry, then walks
//! backward through publication numbers until it finds a table published
//! on or before that date, using a local cache to avoid repeat downloads.
//!
//! # Example
//!
//! ```
//! use nbp_rates::calendar::date;
//! use nbp_rates::location::build_url;
//! use nbp_rates::table::{calculate_number, TableType};
//!
//! let day = date(2012, 6, 15).unwrap();
//! let number = calculate_number(day, TableType::A);
//! let location = build_url(2012, number, TableType::A, None);
//! assert_eq!(location.url, "http://rss.nbp.pl/kursy/xml2/2012/a/12a120.xml");
//! ```
//!
//! # Architecture
//!
//! - [`calendar`]: Day counters (working days, Wednesdays)
//! - [`table`]: Table types and publication number estimation
//! - [`location`]: Feed URLs and cache paths
//! - [`sequence`]: Backward walk over publication numbers
//! - [`http`]: HTTP transport
//! - [`cache`]: On-disk cache files
//! - [`fetch`]: Cache-first retrieval of one publication
//! - [`xml`]: XML decoding and navigation helpers
//! - [`parser`]: Table XML parsing
//! - [`resolver`]: Date-to-publication resolution and rate lookup
//! - [`types`]: Publications and query results
//! - [`config`]: Constants, validation and resolver settings
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod location;
pub mod parser;
pub mod resolver;
pub mod sequence;
pub mod table;
pub mod types;
pub mod xml;

#[cfg(test)]
mod test_support;

// Re-export main functions
pub use resolver::{download_exchange_rate, resolve, Resolver};

// Re-export commonly used items
pub use config::{validate_date, ResolverConfig};
pub use error::{NbpError, Result};
pub use location::{build_url, PublicationCoordinate, ResourceLocation};
pub use table::{calculate_number, TableType};
pub use types::{CurrencyRate, ExchangeRateResult, Publication};
