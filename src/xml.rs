//! SMS Backup & Restore XML serialization.
//!
//! The target format is a single `<smses>` document with one `<sms/>`
//! element per message. The attribute names and their order are part of
//! the compatibility surface and must not change; most of them are fixed
//! null markers the restore tool expects to find.
//!
//! Free-text attribute values (body, contact name) are entity-escaped when
//! the record is built; the serializer writes records verbatim.

use std::borrow::Cow;

use chrono::Local;

use crate::record::SmsRecord;

/// Escapes all five XML-reserved characters for attribute embedding.
///
/// Covers `& < > " '`. Escaping only a subset produces documents that some
/// restore tools reject, so everything free-text goes through here.
///
/// # Example
///
/// ```rust
/// use smspack::xml::escape_attr;
///
/// assert_eq!(escape_attr(r#"a<b&c>"d"'e'"#), "a&lt;b&amp;c&gt;&quot;d&quot;&apos;e&apos;");
/// assert_eq!(escape_attr("plain"), "plain");
/// ```
pub fn escape_attr(text: &str) -> String {
    match quick_xml::escape::escape(text) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Serializes records into a complete backup document.
///
/// `created` is the wall-clock stamp for the header comment, formatted
/// `DD/MM/YYYY HH:MM:SS`. Separated from [`to_xml`] so tests can pin it.
pub fn serialize(records: &[SmsRecord], created: &str) -> String {
    let mut xml = String::with_capacity(256 + records.len() * 256);
    xml.push_str("<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>\n");
    xml.push_str(&format!("<!--File Created By smspack on {created}-->\n"));
    xml.push_str("<?xml-stylesheet type=\"text/xsl\" href=\"sms.xsl\"?>\n");
    xml.push_str(&format!("<smses count=\"{}\">\n", records.len()));
    for record in records {
        xml.push_str("  ");
        xml.push_str(&element(record));
        xml.push('\n');
    }
    xml.push_str("</smses>");
    xml
}

/// Serializes records, stamping the header with the current wall clock.
pub fn to_xml(records: &[SmsRecord]) -> String {
    let created = Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    serialize(records, &created)
}

/// Renders one `<sms/>` element with the fixed attribute set.
fn element(record: &SmsRecord) -> String {
    format!(
        r#"<sms protocol="0" address="{address}" date="{date}" type="{direction}" subject="null" body="{body}" toa="null" sc_toa="null" service_center="null" read="1" status="-1" locked="0" date_sent="0" readable_date="{readable_date}" contact_name="{contact_name}" />"#,
        address = record.address,
        date = record.epoch_composite,
        direction = record.direction.code(),
        body = record.body,
        readable_date = record.readable_date,
        contact_name = record.contact_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RawMessageEntry;
    use crate::zone::DisplayZone;

    fn record(sender: &str, body: &str) -> SmsRecord {
        let raw = RawMessageEntry {
            sender: sender.to_string(),
            body: Some(body.to_string()),
            datetime: "2013-11-08T23:31:04.911-08:00".to_string(),
        };
        let zone = DisplayZone::from_name(Some("UTC")).unwrap();
        SmsRecord::build(&raw, "Susie Glee", "+15551234567", &zone).unwrap()
    }

    #[test]
    fn test_escape_attr_covers_all_five() {
        let escaped = escape_attr(r#"<>&"'"#);
        assert_eq!(escaped, "&lt;&gt;&amp;&quot;&apos;");
    }

    #[test]
    fn test_escape_attr_leaves_plain_text() {
        assert_eq!(escape_attr("hello world"), "hello world");
    }

    #[test]
    fn test_header_and_count() {
        let records = vec![record("Susie Glee", "hi"), record("Me", "hello")];
        let xml = serialize(&records, "01/02/2024 03:04:05");
        assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>\n"));
        assert!(xml.contains("<!--File Created By smspack on 01/02/2024 03:04:05-->"));
        assert!(xml.contains(r#"<?xml-stylesheet type="text/xsl" href="sms.xsl"?>"#));
        assert!(xml.contains(r#"<smses count="2">"#));
        assert!(xml.ends_with("</smses>"));
    }

    #[test]
    fn test_element_attribute_order() {
        let xml = serialize(&[record("Susie Glee", "hi")], "01/02/2024 03:04:05");
        let expected = r#"  <sms protocol="0" address="+15551234567" date="1383982264911" type="1" subject="null" body="hi" toa="null" sc_toa="null" service_center="null" read="1" status="-1" locked="0" date_sent="0" readable_date="Nov 9, 2013 07:31:04 AM" contact_name="Susie Glee" />"#;
        assert!(xml.contains(expected), "missing element in:\n{xml}");
    }

    #[test]
    fn test_empty_document() {
        let xml = serialize(&[], "01/02/2024 03:04:05");
        assert!(xml.contains(r#"<smses count="0">"#));
        assert!(xml.ends_with("</smses>"));
    }
}
