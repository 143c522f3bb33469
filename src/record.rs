//! Normalized SMS records.
//!
//! This module provides [`SmsRecord`], the normalized representation of one
//! text message ready for serialization. The builder resolves direction,
//! escapes free text for attribute embedding, and derives the two timestamp
//! encodings the target format wants.
//!
//! # Overview
//!
//! A record consists of:
//! - **Identity**: `contact_name` and `address`
//! - **Content**: `direction` and `body`
//! - **Time**: `utc_instant`, plus the derived `epoch_composite` and
//!   `readable_date` strings

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::document::RawMessageEntry;
use crate::error::{Result, SmspackError};
use crate::xml::escape_attr;
use crate::zone::DisplayZone;

/// Whether a message was received from the contact or sent to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The contact sent this message.
    Received,
    /// The exporting user sent this message.
    Sent,
}

impl Direction {
    /// The numeric `type` code the backup format uses.
    pub fn code(&self) -> u8 {
        match self {
            Direction::Received => 1,
            Direction::Sent => 2,
        }
    }
}

/// One normalized message, immutable once built.
///
/// Free-text fields (`body`, `contact_name`) are already entity-escaped for
/// XML attribute embedding; the serializer writes them verbatim.
///
/// # Example
///
/// ```rust
/// use smspack::document::RawMessageEntry;
/// use smspack::record::{Direction, SmsRecord};
/// use smspack::zone::DisplayZone;
///
/// let raw = RawMessageEntry {
///     sender: "Alice".to_string(),
///     body: Some("Hello!".to_string()),
///     datetime: "2024-01-15T10:30:00.000-08:00".to_string(),
/// };
/// let zone = DisplayZone::from_name(Some("UTC"))?;
/// let record = SmsRecord::build(&raw, "Alice", "+15550001111", &zone)?;
///
/// assert_eq!(record.direction, Direction::Received);
/// assert_eq!(record.body, "Hello!");
/// # Ok::<(), smspack::SmspackError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    /// Contact display name, escaped for attribute embedding.
    pub contact_name: String,

    /// The contact's phone number; empty when unresolved.
    pub address: String,

    /// Received from the contact, or sent to them.
    pub direction: Direction,

    /// Message text, escaped; empty when the entry had no body.
    pub body: String,

    /// The message instant in UTC.
    pub utc_instant: DateTime<Utc>,

    /// UTC seconds since epoch concatenated with the unpadded millisecond
    /// remainder. Not epoch-milliseconds: `…:04.911` yields `…4911`, a
    /// whole second yields a trailing `0`. The backup format expects this
    /// exact encoding.
    pub epoch_composite: String,

    /// The instant in the display timezone, `Mon D, YYYY HH:MM:SS AM/PM`
    /// with no leading zero on the day.
    pub readable_date: String,
}

impl SmsRecord {
    /// Builds a record from one raw entry and its resolved context.
    ///
    /// Direction is an exact string-equality test: a sender name equal to
    /// `contact_name` means the message was received, anything else
    /// (typically the exporting user's own name) means it was sent.
    ///
    /// # Errors
    ///
    /// Returns [`SmspackError::DateParse`] when the entry's datetime string
    /// is not a valid RFC 3339 instant. This is fatal for the run.
    pub fn build(
        raw: &RawMessageEntry,
        contact_name: &str,
        address: &str,
        zone: &DisplayZone,
    ) -> Result<Self> {
        let direction = if raw.sender == contact_name {
            Direction::Received
        } else {
            Direction::Sent
        };

        let body = raw.body.as_deref().map(escape_attr).unwrap_or_default();

        let utc_instant = DateTime::parse_from_rfc3339(&raw.datetime)
            .map_err(|source| SmspackError::date_parse(&raw.datetime, source))?
            .with_timezone(&Utc);

        Ok(Self {
            contact_name: escape_attr(contact_name),
            address: address.to_string(),
            direction,
            body,
            utc_instant,
            epoch_composite: epoch_composite(utc_instant),
            readable_date: readable_date(utc_instant, zone),
        })
    }
}

/// Seconds since epoch concatenated with the truncated, unpadded
/// millisecond remainder.
fn epoch_composite(instant: DateTime<Utc>) -> String {
    format!("{}{}", instant.timestamp(), instant.timestamp_subsec_millis())
}

/// Formats an instant in the display zone as `Mon D, YYYY HH:MM:SS AM/PM`.
///
/// The day-of-month carries no leading zero; the hour keeps its padding.
fn readable_date(instant: DateTime<Utc>, zone: &DisplayZone) -> String {
    let local = zone.localize(instant);
    format!(
        "{} {}, {} {}",
        local.format("%b"),
        local.day(),
        local.format("%Y"),
        local.format("%I:%M:%S %p"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(sender: &str, body: Option<&str>, datetime: &str) -> RawMessageEntry {
        RawMessageEntry {
            sender: sender.to_string(),
            body: body.map(str::to_string),
            datetime: datetime.to_string(),
        }
    }

    fn utc_zone() -> DisplayZone {
        DisplayZone::from_name(Some("UTC")).unwrap()
    }

    #[test]
    fn test_direction_from_sender() {
        let zone = utc_zone();
        let received = raw("Alice", Some("hi"), "2024-01-15T10:30:00.000-08:00");
        let sent = raw("Me", Some("hi"), "2024-01-15T10:30:00.000-08:00");

        let record = SmsRecord::build(&received, "Alice", "", &zone).unwrap();
        assert_eq!(record.direction, Direction::Received);
        assert_eq!(record.direction.code(), 1);

        let record = SmsRecord::build(&sent, "Alice", "", &zone).unwrap();
        assert_eq!(record.direction, Direction::Sent);
        assert_eq!(record.direction.code(), 2);
    }

    #[test]
    fn test_direction_is_exact_equality() {
        let zone = utc_zone();
        let entry = raw("alice", Some("hi"), "2024-01-15T10:30:00.000-08:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.direction, Direction::Sent);
    }

    #[test]
    fn test_epoch_composite_known_instant() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "2013-11-08T23:31:04.911-08:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.epoch_composite, "1383982264911");
    }

    #[test]
    fn test_epoch_composite_whole_second_appends_zero() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "2013-11-08T23:31:04-08:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.epoch_composite, "13839822640");
    }

    #[test]
    fn test_epoch_composite_millis_not_padded() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "2013-11-08T23:31:04.007-08:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.epoch_composite, "13839822647");
    }

    #[test]
    fn test_readable_date_strips_day_zero_only() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "2020-01-05T15:04:05.000+00:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.readable_date, "Jan 5, 2020 03:04:05 PM");
    }

    #[test]
    fn test_readable_date_two_digit_day() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "2020-01-15T15:04:05.000+00:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.readable_date, "Jan 15, 2020 03:04:05 PM");
    }

    #[test]
    fn test_readable_date_follows_zone() {
        let entry = raw("Alice", Some("hi"), "2020-01-05T20:04:05.000+00:00");
        let eastern = DisplayZone::from_name(Some("America/New_York")).unwrap();
        let record = SmsRecord::build(&entry, "Alice", "", &eastern).unwrap();
        assert_eq!(record.readable_date, "Jan 5, 2020 03:04:05 PM");
    }

    #[test]
    fn test_missing_body_is_empty() {
        let zone = utc_zone();
        let entry = raw("Alice", None, "2024-01-15T10:30:00.000-08:00");
        let record = SmsRecord::build(&entry, "Alice", "", &zone).unwrap();
        assert_eq!(record.body, "");
    }

    #[test]
    fn test_body_and_name_are_escaped() {
        let zone = utc_zone();
        let entry = raw(
            "A & B",
            Some(r#"Tom & Jerry's "fun" <3"#),
            "2024-01-15T10:30:00.000-08:00",
        );
        let record = SmsRecord::build(&entry, "A & B", "", &zone).unwrap();
        assert_eq!(record.body, "Tom &amp; Jerry&apos;s &quot;fun&quot; &lt;3");
        assert_eq!(record.contact_name, "A &amp; B");
        assert_eq!(record.direction, Direction::Received);
    }

    #[test]
    fn test_bad_datetime_is_error() {
        let zone = utc_zone();
        let entry = raw("Alice", Some("hi"), "November 8th, around noon");
        let err = SmsRecord::build(&entry, "Alice", "", &zone).unwrap_err();
        assert!(err.is_date_parse());
    }

    #[test]
    fn test_epoch_composite_independent_of_zone() {
        let entry = raw("Alice", Some("hi"), "2020-06-15T12:00:00.250+02:00");
        let utc = SmsRecord::build(&entry, "Alice", "", &utc_zone()).unwrap();
        let tokyo = DisplayZone::from_name(Some("Asia/Tokyo")).unwrap();
        let jst = SmsRecord::build(&entry, "Alice", "", &tokyo).unwrap();
        assert_eq!(utc.epoch_composite, jst.epoch_composite);
        assert_ne!(utc.readable_date, jst.readable_date);
    }
}
