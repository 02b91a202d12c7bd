use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::FeedRecord;
use crate::util::validate_feed_url;

/// Errors that make an OPML document unusable as a whole.
#[derive(Debug, Error)]
pub enum OpmlError {
    /// XML parsing failed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The bytes could not be decoded in the document's encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The document contains no element at all.
    #[error("no root element found")]
    NoRoot,

    /// Input ended while elements were still open.
    #[error("unexpected end of document: {0} unclosed element(s)")]
    Unclosed(usize),

    /// Elements or text outside the single root element.
    #[error("content outside the document element")]
    OutsideRoot,
}

/// Knobs applied while walking the outline tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Skip feeds whose URL is not an absolute http(s) URL.
    pub http_only: bool,
}

/// Reads an OPML file and returns one [`FeedRecord`] per feed outline.
///
/// The file is read in full and closed before parsing starts. Outlines are
/// returned in document order regardless of how deeply they are nested.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if the content
/// is not well-formed XML. The caller decides whether that is fatal; the
/// aggregator treats it as a file contributing zero records.
pub async fn parse(path: &Path, options: ExtractOptions) -> Result<Vec<FeedRecord>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read OPML file: {}", path.display()))?;
    let content = decode_document(&bytes)?;
    let feeds = parse_opml_content(&content, options)?;
    tracing::debug!(path = %path.display(), count = feeds.len(), "Parsed OPML file");
    Ok(feeds)
}

/// Decodes raw document bytes to text.
///
/// A byte-order mark wins; otherwise the `encoding` of the XML declaration
/// is used, defaulting to UTF-8. Malformed byte sequences are an error
/// rather than being replaced.
pub fn decode_document(bytes: &[u8]) -> Result<Cow<'_, str>, OpmlError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| OpmlError::Encoding(format!("invalid {} byte sequence", encoding.name())))
}

/// Encoding named by a leading `<?xml ... encoding="..."?>`, if any.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>, OpmlError> {
    let mut reader = Reader::from_reader(bytes);
    let Ok(Event::Decl(decl)) = reader.read_event() else {
        return Ok(None);
    };
    let Some(Ok(label)) = decl.encoding() else {
        return Ok(None);
    };

    match Encoding::for_label(&label) {
        Some(encoding) => Ok(Some(encoding)),
        None => Err(OpmlError::Encoding(format!(
            "unsupported encoding '{}'",
            String::from_utf8_lossy(&label)
        ))),
    }
}

/// Parses OPML content and extracts every `<outline>` carrying an `xmlUrl`.
///
/// Category/folder outlines (no `xmlUrl`) are traversed but produce nothing.
/// A document that fails anywhere yields an error rather than the feeds seen
/// before the failure.
pub fn parse_opml_content(content: &str, options: ExtractOptions) -> Result<Vec<FeedRecord>> {
    // SEC-002: XXE protection. quick-xml (0.37) never parses <!ENTITY> declarations from
    // DOCTYPE. Only the 5 XML builtins resolve; custom entities like &xxe; fail in
    // `decode_and_unescape_value()` with `EscapeError::UnrecognizedEntity`.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut feeds = Vec::new();
    let mut depth: usize = 0;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                // A second top-level element
                if depth == 0 && saw_root {
                    return Err(OpmlError::OutsideRoot.into());
                }
                depth += 1;
                saw_root = true;
                if e.name().as_ref() == b"outline" {
                    if let Some(feed) = parse_outline_attributes(&e, &reader, options)? {
                        feeds.push(feed);
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 && saw_root {
                    return Err(OpmlError::OutsideRoot.into());
                }
                saw_root = true;
                if e.name().as_ref() == b"outline" {
                    if let Some(feed) = parse_outline_attributes(&e, &reader, options)? {
                        feeds.push(feed);
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) if depth == 0 => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(OpmlError::OutsideRoot.into());
                }
            }
            Ok(Event::CData(_)) if depth == 0 => {
                return Err(OpmlError::OutsideRoot.into());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpmlError::XmlParse(e.to_string()).into()),
            _ => {}
        }
    }

    if !saw_root {
        return Err(OpmlError::NoRoot.into());
    }
    if depth > 0 {
        return Err(OpmlError::Unclosed(depth).into());
    }

    Ok(feeds)
}

/// Builds a record from an outline element.
///
/// Returns `None` for folder outlines and for outlines with an empty
/// `xmlUrl`. The title is the first non-empty of `title` and `text`.
fn parse_outline_attributes(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    options: ExtractOptions,
) -> Result<Option<FeedRecord>> {
    let mut xml_url = None;
    let mut title = None;
    let mut text = None;

    let decoder = reader.decoder();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OpmlError::XmlParse(e.to_string()))?;
        let slot = match attr.key.as_ref() {
            b"xmlUrl" => &mut xml_url,
            b"title" => &mut title,
            b"text" => &mut text,
            _ => continue,
        };
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|e| OpmlError::XmlParse(e.to_string()))?;
        *slot = Some(value.into_owned());
    }

    let Some(url) = xml_url.filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    if options.http_only {
        if let Err(e) = validate_feed_url(&url) {
            tracing::warn!(url = %url, error = %e, "Skipping non-HTTP feed URL");
            return Ok(None);
        }
    }

    let title = title
        .filter(|t| !t.is_empty())
        .or_else(|| text.filter(|t| !t.is_empty()))
        .unwrap_or_default();

    Ok(Some(FeedRecord::new(url, title)))
}
