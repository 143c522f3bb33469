//! The conversion pipeline.
//!
//! [`convert`] is the batch entry point: it reads every input stream,
//! parses the conversations, resolves contact numbers across all of them,
//! builds the normalized records, and writes one backup document to the
//! sink. Stream and sink lifetimes belong to the caller; the library never
//! opens or closes files.
//!
//! A run either fully succeeds or fails with no partial output: the sink
//! is first written after serialization of the whole document succeeded.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use smspack::pipeline::{ConvertOptions, convert};
//!
//! let html = r#"<html><head><title>Me to Alice</title></head><body>
//! <div class="message">
//!   <abbr class="dt" title="2024-01-15T10:30:00.000-08:00">Jan 15</abbr>
//!   <cite class="sender vcard"><abbr class="fn">Alice</abbr></cite>
//!   <q>Hello!</q>
//! </div></body></html>"#;
//!
//! let mut inputs = vec![Cursor::new(html)];
//! let mut sink = Vec::new();
//! let options = ConvertOptions::new().with_timezone("UTC");
//!
//! let report = convert(&mut inputs, &mut sink, &options)?;
//! assert_eq!(report.messages, 1);
//! assert!(report.xml.contains("count=\"1\""));
//! # Ok::<(), smspack::SmspackError>(())
//! ```

use std::collections::{BTreeSet, HashMap};
use std::io::{Read, Write};

use log::{info, warn};

use crate::address_book::{AddressBook, parse_overrides};
use crate::document::ConversationDocument;
use crate::error::Result;
use crate::record::SmsRecord;
use crate::xml;
use crate::zone::DisplayZone;

/// Options for one conversion run.
///
/// # Example
///
/// ```rust
/// use smspack::pipeline::ConvertOptions;
///
/// let options = ConvertOptions::new()
///     .with_timezone("America/New_York")
///     .with_contacts("Alice: +15550001111; Bob: +15550002222");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    timezone: Option<String>,
    overrides: HashMap<String, String>,
}

impl ConvertOptions {
    /// Creates options with defaults: local timezone, no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the IANA zone name used for readable dates.
    #[must_use]
    pub fn with_timezone(mut self, name: impl Into<String>) -> Self {
        self.timezone = Some(name.into());
        self
    }

    /// Sets contact number overrides from a map.
    ///
    /// Overrides always win over numbers discovered in the documents.
    #[must_use]
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets contact number overrides from a `Name: number; …` string.
    ///
    /// Entries without a `:` separator are silently skipped.
    #[must_use]
    pub fn with_contacts(mut self, contacts: &str) -> Self {
        self.overrides = parse_overrides(contacts);
        self
    }
}

/// The result of one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The serialized backup document, as written to the sink.
    pub xml: String,

    /// Contact names with no resolvable number. Informational: their
    /// messages were converted with an empty address.
    pub missing: BTreeSet<String>,

    /// Messages converted across all documents.
    pub messages: usize,

    /// Distinct contacts across all non-empty documents.
    pub contacts: usize,
}

/// Converts conversation documents into one backup document.
///
/// Reads every input stream fully, resolves each conversation's contact
/// number (caller overrides first, then the document's own telephone
/// links, then numbers discovered in other documents), builds records in
/// input order, and writes the serialized XML to `sink`.
///
/// Documents with no text content are skipped. A contact without a
/// resolvable number is tolerated: the name lands in the report's
/// `missing` set and the records carry an empty address.
///
/// # Errors
///
/// Fails without writing to the sink when a stream cannot be read, a
/// non-empty document lacks a required field, a message datetime cannot be
/// parsed, or the timezone name is unknown.
pub fn convert<R: Read, W: Write>(
    inputs: &mut [R],
    sink: &mut W,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let zone = DisplayZone::from_name(options.timezone.as_deref())?;

    let mut documents = Vec::new();
    for (index, input) in inputs.iter_mut().enumerate() {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        match ConversationDocument::parse(&text).map_err(|e| e.with_document(index))? {
            Some(document) => documents.push(document),
            None => info!("Skipping input #{index}: no text content"),
        }
    }

    // Fresh state per invocation; nothing carries over between runs.
    let mut book = AddressBook::seed(options.overrides.clone());
    for document in &documents {
        book.merge(document.numbers.iter().cloned());
    }

    let mut records = Vec::new();
    let mut missing = BTreeSet::new();
    let mut contacts = BTreeSet::new();
    for document in &documents {
        let local: HashMap<String, String> = document.numbers.iter().cloned().collect();
        let address = book.resolve(&document.contact_name, &local);
        if address.is_none() {
            missing.insert(document.contact_name.clone());
        }
        let address = address.unwrap_or_default();
        contacts.insert(document.contact_name.clone());

        for entry in &document.entries {
            records.push(SmsRecord::build(entry, &document.contact_name, &address, &zone)?);
        }
    }

    let xml = xml::to_xml(&records);
    sink.write_all(xml.as_bytes())?;

    info!(
        "Processed {} messages for {} contact{}.",
        records.len(),
        contacts.len(),
        if contacts.len() == 1 { "" } else { "s" }
    );
    if !missing.is_empty() {
        warn!(
            "No number found for: {}",
            missing.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(ConversionReport {
        xml,
        missing,
        messages: records.len(),
        contacts: contacts.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn conversation(title: &str, number: Option<&str>, messages: &[(&str, &str, &str)]) -> String {
        let contact = title.split_once(" to ").map_or(title, |(_, c)| c);
        let participants = number.map_or(String::new(), |n| {
            format!(
                r#"<div class="participants"><cite class="sender vcard"><a class="tel" href="tel:{n}"><span class="fn">{contact}</span></a></cite></div>"#
            )
        });
        let entries: String = messages
            .iter()
            .map(|(sender, body, datetime)| {
                format!(
                    r#"<div class="message"><abbr class="dt" title="{datetime}">when</abbr><cite class="sender vcard"><abbr class="fn">{sender}</abbr></cite><q>{body}</q></div>"#
                )
            })
            .collect();
        format!("<html><head><title>{title}</title></head><body>{entries}{participants}</body></html>")
    }

    #[test]
    fn test_convert_writes_sink_and_reports() {
        let html = conversation(
            "Me to Alice",
            Some("+15550001111"),
            &[
                ("Alice", "hi", "2024-01-15T10:30:00.000-08:00"),
                ("Me", "hello", "2024-01-15T10:31:00.000-08:00"),
            ],
        );
        let mut inputs = vec![Cursor::new(html)];
        let mut sink = Vec::new();
        let report = convert(&mut inputs, &mut sink, &ConvertOptions::new().with_timezone("UTC")).unwrap();

        assert_eq!(report.messages, 2);
        assert_eq!(report.contacts, 1);
        assert!(report.missing.is_empty());
        assert_eq!(String::from_utf8(sink).unwrap(), report.xml);
        assert!(report.xml.contains(r#"address="+15550001111""#));
    }

    #[test]
    fn test_missing_contact_converts_with_empty_address() {
        let html = conversation(
            "Me to Nameless",
            None,
            &[
                ("Nameless", "hi", "2024-01-15T10:30:00.000-08:00"),
                ("Nameless", "still here", "2024-01-15T10:31:00.000-08:00"),
            ],
        );
        let mut inputs = vec![Cursor::new(html)];
        let mut sink = Vec::new();
        let report = convert(&mut inputs, &mut sink, &ConvertOptions::new().with_timezone("UTC")).unwrap();

        assert_eq!(report.messages, 2);
        assert_eq!(
            report.missing.iter().collect::<Vec<_>>(),
            vec!["Nameless"]
        );
        assert!(report.xml.contains(r#"address="""#));
    }

    #[test]
    fn test_cross_document_resolution() {
        // Alice's number only appears in the first document.
        let with_number = conversation(
            "Me to Alice",
            Some("+15550001111"),
            &[("Alice", "hi", "2024-01-15T10:30:00.000-08:00")],
        );
        let without_number = conversation(
            "Me to Alice",
            None,
            &[("Alice", "me again", "2024-02-15T10:30:00.000-08:00")],
        );
        let mut inputs = vec![Cursor::new(with_number), Cursor::new(without_number)];
        let mut sink = Vec::new();
        let report = convert(&mut inputs, &mut sink, &ConvertOptions::new().with_timezone("UTC")).unwrap();

        assert!(report.missing.is_empty());
        assert_eq!(report.xml.matches(r#"address="+15550001111""#).count(), 2);
    }

    #[test]
    fn test_fresh_state_between_invocations() {
        let options = ConvertOptions::new().with_timezone("UTC");
        let with_number = conversation(
            "Me to Alice",
            Some("+15550001111"),
            &[("Alice", "hi", "2024-01-15T10:30:00.000-08:00")],
        );
        let without_number = conversation(
            "Me to Alice",
            None,
            &[("Alice", "hi", "2024-01-15T10:30:00.000-08:00")],
        );

        let mut sink = Vec::new();
        convert(&mut [Cursor::new(with_number)], &mut sink, &options).unwrap();

        // The second run must not remember the first run's numbers.
        let mut sink = Vec::new();
        let report = convert(&mut [Cursor::new(without_number)], &mut sink, &options).unwrap();
        assert!(report.missing.contains("Alice"));
    }

    #[test]
    fn test_bad_datetime_writes_nothing() {
        let html = conversation(
            "Me to Alice",
            Some("+15550001111"),
            &[("Alice", "hi", "yesterday-ish")],
        );
        let mut inputs = vec![Cursor::new(html)];
        let mut sink = Vec::new();
        let err = convert(&mut inputs, &mut sink, &ConvertOptions::new().with_timezone("UTC")).unwrap_err();

        assert!(err.is_date_parse());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_timezone_fails_early() {
        let mut inputs: Vec<Cursor<&str>> = vec![];
        let mut sink = Vec::new();
        let err = convert(&mut inputs, &mut sink, &ConvertOptions::new().with_timezone("Moon/Crater"))
            .unwrap_err();
        assert!(err.is_unknown_timezone());
    }
}
