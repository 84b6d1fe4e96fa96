//! XML utility functions for decoding feed files and navigating DOM trees.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use roxmltree::Node;

use crate::error::{NbpError, Result};

/// Encoding label in an XML declaration.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENCODING_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*<\?xml[^>]*?encoding\s*=\s*["']([A-Za-z0-9._-]+)["']"#).expect("valid regex")
});

/// Decode raw feed bytes into a string.
///
/// NBP files declare `ISO-8859-2`; the encoding named in the XML declaration
/// is honoured, and UTF-8 is assumed when there is none. A byte order mark
/// overrides both.
///
/// # Examples
/// ```
/// use nbp_rates::xml::decode_xml;
///
/// let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-2\"?><n>W\xeagry</n>";
/// assert!(decode_xml(bytes).contains("Węgry"));
/// ```
pub fn decode_xml(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(200)];
    let encoding = ENCODING_DECL
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "Malformed bytes replaced while decoding XML");
    }
    text.into_owned()
}

/// Get the tag name without namespace prefix.
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use nbp_rates::xml::find_child;
///
/// let xml = r#"<pozycja><kod_waluty>USD</kod_waluty></pozycja>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "kod_waluty").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find the first descendant element (including `node` itself) with the given tag name.
pub fn find_descendant<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && get_tag_name(*n) == tag)
}

/// Get the text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the trimmed text of a required child element.
///
/// Fails with [`NbpError::MissingElement`] when the child is absent or empty.
pub fn required_text(node: Node<'_, '_>, tag: &str) -> Result<String> {
    find_child(node, tag)
        .map(get_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| NbpError::MissingElement {
            element: tag.to_string(),
            context: get_tag_name(node).to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_decode_iso_8859_2() {
        // 0xEA is 'ę', 0xB3 is 'ł' in ISO-8859-2
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-2\"?>\n<n>forint (W\xeagry) z\xb3oty</n>";
        let text = decode_xml(bytes);
        assert!(text.contains("forint (Węgry) złoty"));
    }

    #[test]
    fn test_decode_defaults_to_utf8() {
        let text = decode_xml("<n>Węgry</n>".as_bytes());
        assert_eq!(text, "<n>Węgry</n>");

        let text = decode_xml("<?xml version=\"1.0\"?><n>Węgry</n>".as_bytes());
        assert!(text.contains("Węgry"));
    }

    #[test]
    fn test_decode_unknown_label_falls_back_to_utf8() {
        let text = decode_xml("<?xml version='1.0' encoding='bogus'?><n>ż</n>".as_bytes());
        assert!(text.contains('ż'));
    }

    #[test]
    fn test_find_children() {
        let doc = Document::parse("<t><pozycja/><pozycja/><x/></t>").unwrap();
        assert_eq!(find_children(doc.root_element(), "pozycja").count(), 2);
    }

    #[test]
    fn test_find_descendant() {
        let doc = Document::parse("<t><a><numer_tabeli>1</numer_tabeli></a></t>").unwrap();
        let node = find_descendant(doc.root_element(), "numer_tabeli").unwrap();
        assert_eq!(get_text(node), "1");
        assert!(find_descendant(doc.root_element(), "t").is_some());
    }

    #[test]
    fn test_required_text() {
        let doc = Document::parse("<pozycja><kod_waluty> USD </kod_waluty><kurs_sredni/></pozycja>")
            .unwrap();
        let root = doc.root_element();

        assert_eq!(required_text(root, "kod_waluty").unwrap(), "USD");

        let err = required_text(root, "kurs_sredni").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required XML element: kurs_sredni in pozycja"
        );
        assert!(required_text(root, "przelicznik").is_err());
    }
}
