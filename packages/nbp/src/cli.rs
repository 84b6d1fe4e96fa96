//! Command-line interface.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{default_cache_dir, parse_date, ResolverConfig, DEFAULT_STEP_BUDGET};
use crate::error::Result;
use crate::location::PublicationCoordinate;
use crate::resolver::Resolver;
use crate::sequence::gen_urls;
use crate::table::{calculate_number, TableType};
use crate::types::{ExchangeRateResult, Publication};

/// Exit code when the lookup finds nothing.
pub const EXIT_NOT_FOUND: i32 = 1;

/// NBP Rates - historical exchange rates from the National Bank of Poland.
#[derive(Parser)]
#[command(name = "nbp-rates")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Cache and search settings shared by the network commands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Cache directory (default: $NBP_CACHE_DIR or ~/.nbp)
    #[arg(long, conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write the local cache
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum number of publications tried per table type
    #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
    pub budget: usize,
}

impl SearchArgs {
    /// Build the resolver configuration these arguments describe.
    pub fn to_config(&self) -> ResolverConfig {
        let config = ResolverConfig::new().with_step_budget(self.budget);
        if self.no_cache {
            return config;
        }
        match self.cache_dir.clone().or_else(default_cache_dir) {
            Some(dir) => config.with_cache_root(dir),
            None => config,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the mid rate of a currency on a date (tables A, then B).
    Rate {
        /// ISO 4217 currency code (e.g., USD)
        currency: String,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the table of one type in force on a date.
    Table {
        /// Table type: a or b
        table_type: String,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the candidate URLs searched for a date, without downloading.
    Urls {
        /// Table type: a or b
        table_type: String,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Number of candidates to list
        #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
        budget: usize,
    },
}

/// Run the CLI, returning the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rate {
            currency,
            date,
            search,
            json,
        } => rate_command(&currency, date.as_deref(), &search, json),
        Commands::Table {
            table_type,
            date,
            search,
            json,
        } => table_command(&table_type, date.as_deref(), &search, json),
        Commands::Urls {
            table_type,
            date,
            budget,
        } => urls_command(&table_type, date.as_deref(), budget),
    }
}

/// Parse the date argument, defaulting to today.
fn search_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the rate command.
fn rate_command(currency: &str, date: Option<&str>, search: &SearchArgs, json: bool) -> Result<i32> {
    // Validate inputs before making HTTP requests
    let date = search_date(date)?;
    let resolver = Resolver::with_http(search.to_config())?;

    let pb = spinner(format!("Searching NBP tables for {currency} on {date}..."));
    let result = resolver.download_exchange_rate(date, currency);
    pb.finish_and_clear();

    match result? {
        Some(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(0)
        }
        Some(result) => {
            print_rate(&result);
            Ok(0)
        }
        None => {
            eprintln!(
                "{} no rate for {} on or before {}",
                style("Not found:").yellow().bold(),
                style(currency.to_ascii_uppercase()).cyan(),
                date
            );
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn print_rate(result: &ExchangeRateResult) {
    println!(
        "{} {} = {} PLN",
        style("1").bold(),
        style(&result.currency.code).cyan(),
        style(result.currency.rate).green().bold()
    );
    println!("  Currency: {}", result.currency.name);
    println!("  Table: {} ({})", result.table_no, result.pub_date);
    println!("  Requested date: {}", result.search_date);
    if let Some(url) = &result.url {
        println!("  Source: {url}");
    }
}

/// Execute the table command.
fn table_command(table_type: &str, date: Option<&str>, search: &SearchArgs, json: bool) -> Result<i32> {
    let table_type: TableType = table_type.parse()?;
    let date = search_date(date)?;
    let resolver = Resolver::with_http(search.to_config())?;

    let pb = spinner(format!("Searching table {table_type} for {date}..."));
    let publication = resolver.resolve(date, table_type);
    pb.finish_and_clear();

    match publication? {
        Some(publication) if json => {
            println!("{}", serde_json::to_string_pretty(&publication)?);
            Ok(0)
        }
        Some(publication) => {
            print_table(&publication);
            Ok(0)
        }
        None => {
            eprintln!(
                "{} no table {} published on or before {}",
                style("Not found:").yellow().bold(),
                table_type,
                date
            );
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn print_table(publication: &Publication) {
    println!(
        "{} {} ({})",
        style("Table").bold(),
        style(&publication.number).cyan(),
        style(publication.publication_date).green()
    );
    if let Some(url) = &publication.url {
        println!("  Source: {url}");
    }
    println!();
    for rate in publication.rates.values() {
        println!(
            "  {:>5} {}  {:>12}  {}",
            rate.scaler,
            style(&rate.code).cyan(),
            rate.rate,
            rate.name
        );
    }
}

/// Execute the urls command.
fn urls_command(table_type: &str, date: Option<&str>, budget: usize) -> Result<i32> {
    let table_type: TableType = table_type.parse()?;
    let date = search_date(date)?;

    let start = PublicationCoordinate::new(
        date.year(),
        calculate_number(date, table_type),
        table_type,
    );
    for location in gen_urls(start, budget, None) {
        println!("{}", location.url);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_rate() {
        let cli = Cli::parse_from(["nbp-rates", "rate", "USD"]);

        let Commands::Rate {
            currency,
            date,
            search,
            json,
        } = cli.command
        else {
            panic!("expected rate command");
        };
        assert_eq!(currency, "USD");
        assert!(date.is_none());
        assert!(!json);
        assert_eq!(search.budget, 15);
        assert!(!search.no_cache);
    }

    #[test]
    fn test_cli_parse_rate_with_options() {
        let cli = Cli::parse_from([
            "nbp-rates",
            "rate",
            "eur",
            "--date",
            "2012-06-15",
            "--cache-dir",
            "/tmp/nbp",
            "--budget",
            "5",
            "--json",
        ]);

        let Commands::Rate {
            currency,
            date,
            search,
            json,
        } = cli.command
        else {
            panic!("expected rate command");
        };
        assert_eq!(currency, "eur");
        assert_eq!(date, Some("2012-06-15".to_string()));
        assert!(json);
        assert_eq!(
            search.to_config(),
            ResolverConfig::new()
                .with_cache_root("/tmp/nbp")
                .with_step_budget(5)
        );
    }

    #[test]
    fn test_cli_cache_dir_conflicts_with_no_cache() {
        let result = Cli::try_parse_from([
            "nbp-rates",
            "table",
            "a",
            "--cache-dir",
            "/tmp/nbp",
            "--no-cache",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_cache_config() {
        let search = SearchArgs {
            cache_dir: None,
            no_cache: true,
            budget: 15,
        };
        assert_eq!(search.to_config(), ResolverConfig::default());
    }

    #[test]
    fn test_search_date() {
        assert_eq!(
            search_date(Some("2012-06-15")).unwrap(),
            NaiveDate::from_ymd_opt(2012, 6, 15).unwrap()
        );
        assert!(search_date(Some("2012-06-31")).is_err());
        assert!(search_date(None).is_ok());
    }
}
