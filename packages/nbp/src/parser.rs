//! Parsing of NBP currency table XML.
//!
//! A table file looks like this (element names are Polish):
//!
//! ```xml
//! <tabela_kursow typ="A">
//!   <numer_tabeli>115/A/NBP/2012</numer_tabeli>
//!   <data_publikacji>2012-06-15</data_publikacji>
//!   <pozycja>
//!     <nazwa_waluty>dolar amerykański</nazwa_waluty>
//!     <przelicznik>1</przelicznik>
//!     <kod_waluty>USD</kod_waluty>
//!     <kurs_sredni>3,4018</kurs_sredni>
//!   </pozycja>
//! </tabela_kursow>
//! ```

use std::str::FromStr;

use chrono::NaiveDate;
use roxmltree::{Document, Node};
use rust_decimal::Decimal;

use crate::error::{NbpError, Result};
use crate::types::{CurrencyRate, Publication};
use crate::xml::{decode_xml, find_children, find_descendant, get_text, required_text};

/// Parse raw feed bytes into a [`Publication`].
///
/// `url` is recorded on the publication for attribution.
pub fn parse(bytes: &[u8], url: Option<&str>) -> Result<Publication> {
    let xml = decode_xml(bytes);
    parse_str(&xml, url)
}

/// Parse an already decoded table document.
pub fn parse_str(xml: &str, url: Option<&str>) -> Result<Publication> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let number = descendant_text(root, "numer_tabeli")?;
    let date_text = descendant_text(root, "data_publikacji")?;
    let publication_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        NbpError::InvalidValue {
            field: "data_publikacji".to_string(),
            value: date_text.clone(),
        }
    })?;

    let mut publication = Publication::new(number, publication_date, url.map(String::from));
    for entry in find_children(root, "pozycja") {
        publication.set(parse_entry(entry)?);
    }

    Ok(publication)
}

/// Text of the first descendant with `tag`, required to be non-empty.
fn descendant_text(root: Node<'_, '_>, tag: &str) -> Result<String> {
    find_descendant(root, tag)
        .map(get_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| NbpError::MissingElement {
            element: tag.to_string(),
            context: root.tag_name().name().to_string(),
        })
}

/// Parse one `<pozycja>` entry.
fn parse_entry(entry: Node<'_, '_>) -> Result<CurrencyRate> {
    let name = required_text(entry, "nazwa_waluty")?;
    let code = required_text(entry, "kod_waluty")?;
    let scaler_text = required_text(entry, "przelicznik")?;
    let rate_text = required_text(entry, "kurs_sredni")?;

    let scaler = scaler_text
        .parse::<u32>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| NbpError::InvalidValue {
            field: format!("przelicznik ({code})"),
            value: scaler_text.clone(),
        })?;

    Ok(CurrencyRate::new(name, code.clone(), parse_rate(&rate_text, &code)?, scaler))
}

/// Parse a comma-decimal rate such as `3,4018`.
fn parse_rate(text: &str, code: &str) -> Result<Decimal> {
    Decimal::from_str(&text.replace(',', ".")).map_err(|_| NbpError::InvalidValue {
        field: format!("kurs_sredni ({code})"),
        value: text.to_string(),
    })
}
