//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{NbpError, Result};
use crate::http::Transport;

/// In-memory transport recording every requested URL.
///
/// Unknown URLs answer with a 404 fetch failure.
#[derive(Default)]
pub(crate) struct FakeTransport {
    pages: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn with_page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| NbpError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Build a table document with the given `(name, code, scaler, rate)` entries.
pub(crate) fn table_xml(number: &str, date: &str, entries: &[(&str, &str, u32, &str)]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tabela_kursow>\n\
         <numer_tabeli>{number}</numer_tabeli>\n<data_publikacji>{date}</data_publikacji>\n"
    );
    for (name, code, scaler, rate) in entries {
        xml.push_str(&format!(
            "<pozycja><nazwa_waluty>{name}</nazwa_waluty><przelicznik>{scaler}</przelicznik>\
             <kod_waluty>{code}</kod_waluty><kurs_sredni>{rate}</kurs_sredni></pozycja>\n"
        ));
    }
    xml.push_str("</tabela_kursow>\n");
    xml
}
