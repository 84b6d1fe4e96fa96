//! Publication addressing: feed URLs and their cache mirror paths.
//!
//! A publication lives at
//! `<prefix>/<year>/<type>/<yy><type><nnn>.xml`, for example
//! `http://rss.nbp.pl/kursy/xml2/2012/a/12a123.xml`. The cache mirrors the
//! same `<year>/<type>/<file>` layout under its root.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::NBP_XML_URL_PREFIX;
use crate::table::TableType;

/// Address of one publication: year, number within that year, and table type.
///
/// This is not a date. The date a publication carries is only known after
/// fetching and parsing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationCoordinate {
    pub year: i32,
    pub number: u32,
    pub table_type: TableType,
}

impl PublicationCoordinate {
    pub fn new(year: i32, number: u32, table_type: TableType) -> Self {
        Self {
            year,
            number,
            table_type,
        }
    }

    /// File name of this publication, e.g. `12a004.xml`.
    ///
    /// Numbers of 1000 and above widen the field instead of being truncated.
    #[must_use]
    pub fn file_name(&self) -> String {
        let short_year = self.year.rem_euclid(100);
        let table = self.table_type.as_str();
        format!("{short_year:02}{table}{:03}.xml", self.number)
    }

    /// Path relative to the feed prefix, e.g. `2012/a/12a004.xml`.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.year,
            self.table_type.as_str(),
            self.file_name()
        )
    }
}

impl fmt::Display for PublicationCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.number, self.table_type, self.year)
    }
}

/// Where to fetch a publication from, and where to cache it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    pub coordinate: PublicationCoordinate,
    pub url: String,
    pub cache_path: Option<PathBuf>,
}

/// Build the feed URL and, if `cache_root` is given, the cache path.
///
/// # Examples
/// ```
/// use nbp_rates::location::build_url;
/// use nbp_rates::table::TableType;
///
/// let location = build_url(2012, 123, TableType::A, None);
/// assert_eq!(location.url, "http://rss.nbp.pl/kursy/xml2/2012/a/12a123.xml");
/// assert!(location.cache_path.is_none());
/// ```
pub fn build_url(
    year: i32,
    number: u32,
    table_type: TableType,
    cache_root: Option<&Path>,
) -> ResourceLocation {
    build_location(PublicationCoordinate::new(year, number, table_type), cache_root)
}

/// Build the resource location for a coordinate.
pub fn build_location(
    coordinate: PublicationCoordinate,
    cache_root: Option<&Path>,
) -> ResourceLocation {
    let url = format!("{NBP_XML_URL_PREFIX}{}", coordinate.relative_path());
    let cache_path = cache_root.map(|root| {
        root.join(coordinate.year.to_string())
            .join(coordinate.table_type.as_str())
            .join(coordinate.file_name())
    });

    ResourceLocation {
        coordinate,
        url,
        cache_path,
    }
}
