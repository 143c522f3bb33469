//! Contact name to phone number resolution.
//!
//! A single conversation document usually carries the contact's number in
//! its telephone links, but some do not. The [`AddressBook`] collects the
//! numbers discovered across *all* documents of a run, plus caller-supplied
//! overrides, so those conversations can still be addressed.
//!
//! A book is built fresh for every pipeline invocation; nothing persists
//! between runs.

use std::collections::HashMap;

/// Mapping from contact display name to phone number.
///
/// # Resolution precedence
///
/// 1. caller-supplied overrides (these always win);
/// 2. the conversation's own telephone links;
/// 3. numbers discovered in other documents, later documents overwriting
///    earlier ones for the same name.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use smspack::address_book::AddressBook;
///
/// let mut book = AddressBook::seed(HashMap::new());
/// book.merge([("Alice".to_string(), "+15550001111".to_string())]);
///
/// let local = HashMap::new();
/// assert_eq!(book.resolve("Alice", &local), Some("+15550001111".to_string()));
/// assert_eq!(book.resolve("Bob", &local), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    overrides: HashMap<String, String>,
    discovered: HashMap<String, String>,
}

impl AddressBook {
    /// Creates a book seeded with caller-supplied overrides.
    pub fn seed(overrides: HashMap<String, String>) -> Self {
        Self {
            overrides,
            discovered: HashMap::new(),
        }
    }

    /// Merges `(name, number)` pairs discovered in one document.
    ///
    /// Pairs are applied in order, so within a document and across
    /// documents the last number seen for a name wins.
    pub fn merge<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, number) in pairs {
            self.discovered.insert(name, number);
        }
    }

    /// Resolves a contact's number, preferring overrides, then the
    /// conversation's own pairs, then the merged global entries.
    ///
    /// Returns `None` when no source has an entry; the caller records the
    /// name as unresolved and converts with an empty address.
    pub fn resolve(
        &self,
        contact_name: &str,
        per_conversation: &HashMap<String, String>,
    ) -> Option<String> {
        self.overrides
            .get(contact_name)
            .or_else(|| per_conversation.get(contact_name))
            .or_else(|| self.discovered.get(contact_name))
            .cloned()
    }

    /// Number of distinct names with a discovered or overridden number.
    pub fn len(&self) -> usize {
        let mut names: Vec<&str> = self.discovered.keys().map(String::as_str).collect();
        names.extend(self.overrides.keys().map(String::as_str));
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// Returns `true` when the book holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.discovered.is_empty()
    }
}

/// Parses a caller override string of the form `Name: number; Name2: number2`.
///
/// Entries without a `:` separator are silently skipped; names and numbers
/// are trimmed.
///
/// # Example
///
/// ```rust
/// use smspack::address_book::parse_overrides;
///
/// let overrides = parse_overrides("Alice: +15550001111; Bob: +15550002222");
/// assert_eq!(overrides.get("Alice").map(String::as_str), Some("+15550001111"));
/// ```
pub fn parse_overrides(contacts: &str) -> HashMap<String, String> {
    contacts
        .split(';')
        .filter_map(|entry| entry.split_once(':'))
        .map(|(name, number)| (name.trim().to_string(), number.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}
