//! Display timezone resolution.
//!
//! Timestamps are stored as UTC instants; only the human-readable date in
//! the output document depends on a timezone. Callers name an IANA zone
//! (`America/New_York`), or leave it unset to use the process's local
//! timezone.

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SmspackError};

/// The timezone used to render readable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// A named IANA zone.
    Named(Tz),
    /// The process's local timezone.
    Local,
}

impl DisplayZone {
    /// Resolves an optional zone name.
    ///
    /// `None` means the local timezone.
    ///
    /// # Errors
    ///
    /// Returns [`SmspackError::UnknownTimezone`] when the name is not a
    /// known IANA zone.
    ///
    /// # Example
    ///
    /// ```rust
    /// use smspack::zone::DisplayZone;
    ///
    /// assert!(DisplayZone::from_name(Some("Europe/Berlin")).is_ok());
    /// assert_eq!(DisplayZone::from_name(None).unwrap(), DisplayZone::Local);
    /// assert!(DisplayZone::from_name(Some("Nowhere/Special")).is_err());
    /// ```
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => name
                .parse::<Tz>()
                .map(DisplayZone::Named)
                .map_err(|_| SmspackError::unknown_timezone(name)),
            None => Ok(DisplayZone::Local),
        }
    }

    /// Converts a UTC instant into this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
            DisplayZone::Local => instant.with_timezone(&Local).fixed_offset(),
        }
    }
}
