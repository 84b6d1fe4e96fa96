//! NBP table types and publication number estimation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{count_wednesdays, count_working_days};
use crate::error::{NbpError, Result};

/// Kind of NBP currency table.
///
/// Each kind has its own numbering sequence, restarted every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    /// Table A: mid rates of major currencies, published every working day.
    A,

    /// Table B: mid rates of other currencies, published on Wednesdays.
    B,
}

impl TableType {
    /// All table types in the order they are searched.
    pub const ALL: [TableType; 2] = [TableType::A, TableType::B];

    /// Lowercase letter used in feed URLs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }

    /// Day counter bound to this table type.
    #[must_use]
    pub fn day_counter(&self) -> fn(NaiveDate) -> u32 {
        match self {
            Self::A => count_working_days,
            Self::B => count_wednesdays,
        }
    }

    /// Publication number this table would carry on `date`.
    #[must_use]
    pub fn publication_number(&self, date: NaiveDate) -> u32 {
        (self.day_counter())(date)
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = NbpError;

    /// Parse `a`/`b` case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            _ => Err(NbpError::UnknownTableType(s.to_string())),
        }
    }
}

/// Calculate the publication number for `date` in tables of `table_type`.
///
/// # Examples
/// ```
/// use nbp_rates::calendar::date;
/// use nbp_rates::table::{calculate_number, TableType};
///
/// let day = date(2012, 6, 15).unwrap();
/// assert_eq!(calculate_number(day, TableType::A), 120);
/// assert_eq!(calculate_number(day, TableType::B), 24);
/// ```
pub fn calculate_number(date: NaiveDate, table_type: TableType) -> u32 {
    table_type.publication_number(date)
}

/// Calculate the publication number from a free-form table type string.
///
/// Fails with `UnknownTableType` for anything but `a`/`b`.
pub fn calculate_number_str(date: NaiveDate, table_type: &str) -> Result<u32> {
    let table_type: TableType = table_type.parse()?;
    Ok(calculate_number(date, table_type))
}
