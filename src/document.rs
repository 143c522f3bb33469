//! Google Voice conversation document parser.
//!
//! Takeout exports one HTML file per conversation. This module provides
//! [`ConversationDocument`], a typed view over that markup: who the
//! conversation is with, the raw message entries in document order, and the
//! telephone numbers the document associates with display names.
//!
//! Required fields (title, sender name, datetime attribute) fail with a
//! named parse error when absent; optional fields (body text) default.
//! Documents with no text content at all parse to `None` and are skipped
//! by the pipeline.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ParseErrorKind, Result, SmspackError};

/// Placeholder used when the title names only the contact.
const SELF_PLACEHOLDER: &str = "Me";

/// Separator between the two names in a conversation title.
const TITLE_SEPARATOR: &str = " to ";

/// One raw message entry, as it appears in the markup.
///
/// Ephemeral: entries are consumed immediately by
/// [`SmsRecord::build`](crate::record::SmsRecord::build) during pipeline
/// processing and are not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessageEntry {
    /// Display name of the sender, as rendered in the message.
    pub sender: String,

    /// Message text; `None` when the entry has no body element.
    pub body: Option<String>,

    /// The precision datetime string from the entry's `dt` attribute,
    /// e.g. `2013-11-08T23:31:04.911-08:00`.
    pub datetime: String,
}

/// Parsed facts from one conversation document.
///
/// # Example
///
/// ```rust
/// use smspack::document::ConversationDocument;
///
/// let html = r#"<html><head><title>Me to Alice</title></head><body>
/// <div class="message">
///   <abbr class="dt" title="2024-01-15T10:30:00.000-08:00">Jan 15</abbr>
///   <cite class="sender vcard"><abbr class="fn">Alice</abbr></cite>
///   <q>Hello!</q>
/// </div></body></html>"#;
///
/// let doc = ConversationDocument::parse(html)?.expect("not empty");
/// assert_eq!(doc.contact_name, "Alice");
/// assert_eq!(doc.entries.len(), 1);
/// # Ok::<(), smspack::SmspackError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationDocument {
    /// The exporting user's display name ("Me" when the title is bare).
    pub self_name: String,

    /// The contact this conversation is with.
    pub contact_name: String,

    /// Message entries in document order.
    pub entries: Vec<RawMessageEntry>,

    /// `(display_name, phone_number)` pairs from telephone links, in
    /// document order. Later pairs for the same name overwrite earlier
    /// ones when merged into an address book.
    pub numbers: Vec<(String, String)>,
}

/// Compiled selectors for the Takeout markup vocabulary.
struct Selectors {
    title: Selector,
    message: Selector,
    sender: Selector,
    body: Selector,
    datetime: Selector,
    tel: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            title: Selector::parse("title").unwrap(),
            message: Selector::parse(".message").unwrap(),
            sender: Selector::parse(".fn").unwrap(),
            body: Selector::parse("q").unwrap(),
            datetime: Selector::parse(".dt").unwrap(),
            tel: Selector::parse(".tel").unwrap(),
        }
    }
}

impl ConversationDocument {
    /// Parses one conversation document from its markup.
    ///
    /// Returns `Ok(None)` for documents with no extractable text content;
    /// those produce no records and no error.
    ///
    /// # Errors
    ///
    /// Returns [`SmspackError::Parse`] when a non-empty document lacks a
    /// title, or when a message entry lacks a sender name or datetime
    /// attribute.
    pub fn parse(html: &str) -> Result<Option<Self>> {
        let dom = Html::parse_document(html);
        if !has_text(&dom) {
            return Ok(None);
        }

        let selectors = Selectors::new();

        let title = dom
            .select(&selectors.title)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SmspackError::parse(ParseErrorKind::MissingTitle))?;
        let (self_name, contact_name) = split_title(&title);

        let numbers = extract_numbers(&dom, &selectors);

        let mut entries = Vec::new();
        for message in dom.select(&selectors.message) {
            entries.push(parse_entry(message, &selectors)?);
        }

        Ok(Some(Self {
            self_name,
            contact_name,
            entries,
            numbers,
        }))
    }
}

/// Returns `true` when the document contains any non-whitespace text node.
fn has_text(dom: &Html) -> bool {
    dom.root_element().text().any(|t| !t.trim().is_empty())
}

/// Splits a conversation title into `(self_name, contact_name)`.
///
/// Titles read either "SelfName to ContactName" or just "ContactName".
fn split_title(title: &str) -> (String, String) {
    match title.split_once(TITLE_SEPARATOR) {
        Some((self_name, contact_name)) => {
            (self_name.trim().to_string(), contact_name.trim().to_string())
        }
        None => (SELF_PLACEHOLDER.to_string(), title.trim().to_string()),
    }
}

/// Collects `(display_name, number)` pairs from telephone links.
///
/// Each link contributes the name rendered alongside it: its `fn`
/// descendant when present, its own text otherwise. Links without an
/// `href` are not number references and are ignored.
fn extract_numbers(dom: &Html, selectors: &Selectors) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for link in dom.select(&selectors.tel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let number = href.strip_prefix("tel:").unwrap_or(href).to_string();
        let name = link
            .select(&selectors.sender)
            .next()
            .map(element_text)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| element_text(link));
        if name.is_empty() {
            continue;
        }
        pairs.push((name, number));
    }
    pairs
}

/// Parses one `.message` element into a raw entry.
fn parse_entry(message: ElementRef<'_>, selectors: &Selectors) -> Result<RawMessageEntry> {
    let sender = message
        .select(&selectors.sender)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SmspackError::parse(ParseErrorKind::MissingSender))?;

    let body = message.select(&selectors.body).next().map(element_text);

    let datetime = message
        .select(&selectors.datetime)
        .next()
        .and_then(|dt| dt.value().attr("title"))
        .map(str::to_string)
        .ok_or_else(|| SmspackError::parse(ParseErrorKind::MissingTimestamp))?;

    Ok(RawMessageEntry {
        sender,
        body,
        datetime,
    })
}

/// Concatenated, trimmed text content of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
