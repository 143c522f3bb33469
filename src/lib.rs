//! # Smspack
//!
//! A Rust library for converting Google Voice Takeout conversation exports
//! into the SMS Backup & Restore XML format.
//!
//! ## Overview
//!
//! Takeout gives you one HTML file per conversation. SMS Backup & Restore
//! wants one XML document for everything. Smspack bridges the two:
//!
//! - parses each conversation's markup into message entries
//! - resolves every contact's phone number across all files (plus any
//!   overrides you supply)
//! - normalizes timestamps into the backup format's encodings, in the
//!   timezone you choose
//! - serializes a single, correctly escaped backup document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use smspack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut inputs = vec![
//!         File::open("Alice - Text - 2024-01-15.html")?,
//!         File::open("Bob - Text - 2024-02-02.html")?,
//!     ];
//!     let mut sink = Vec::new();
//!     let options = ConvertOptions::new().with_timezone("America/New_York");
//!
//!     let report = convert(&mut inputs, &mut sink, &options)?;
//!     println!("{} messages, {} contacts", report.messages, report.contacts);
//!     for name in &report.missing {
//!         eprintln!("no number found for {name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] — **the batch entry point**
//!   - [`convert`](pipeline::convert) — streams in, backup document out
//!   - [`ConvertOptions`](pipeline::ConvertOptions), [`ConversionReport`](pipeline::ConversionReport)
//! - [`document`] — conversation markup parsing
//!   - [`ConversationDocument`](document::ConversationDocument), [`RawMessageEntry`](document::RawMessageEntry)
//! - [`address_book`] — contact number resolution
//!   - [`AddressBook`](address_book::AddressBook), [`parse_overrides`](address_book::parse_overrides)
//! - [`record`] — normalized records
//!   - [`SmsRecord`], [`Direction`](record::Direction)
//! - [`zone`] — display timezone resolution ([`DisplayZone`](zone::DisplayZone))
//! - [`xml`] — backup document serialization and attribute escaping
//! - [`cli`] — CLI types (requires the `cli` feature)
//! - [`error`] — unified error types ([`SmspackError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod address_book;
#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod xml;
pub mod zone;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SmspackError};
pub use record::SmsRecord;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use smspack::prelude::*;
/// ```
pub mod prelude {
    // Core record type
    pub use crate::SmsRecord;

    // Error types
    pub use crate::error::{Result, SmspackError};

    // The pipeline entry point
    pub use crate::pipeline::{ConversionReport, ConvertOptions, convert};

    // Parsing and resolution building blocks
    pub use crate::address_book::AddressBook;
    pub use crate::document::ConversationDocument;
    pub use crate::record::Direction;
    pub use crate::zone::DisplayZone;
}
