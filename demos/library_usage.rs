//! Example: Using smspack as a library
//!
//! This example demonstrates how to use smspack in your own projects.
//!
//! Run with: cargo run --example library_usage

use std::io::Cursor;

use smspack::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== smspack Library Usage Examples ===\n");

    // Example 1: Convert a conversation held in memory
    println!("1. Converting an in-memory conversation:");
    let conversation = r#"<html><head><title>Me to Alice</title></head><body>
<div class="message">
  <abbr class="dt" title="2024-01-15T10:30:00.000-08:00">sent</abbr>
  <cite class="sender vcard"><a class="tel" href="tel:+15550001111"><abbr class="fn">Alice</abbr></a></cite>
  <q>Hello!</q>
</div>
<div class="message">
  <abbr class="dt" title="2024-01-15T10:31:00.000-08:00">sent</abbr>
  <cite class="sender vcard"><abbr class="fn">Me</abbr></cite>
  <q>Hi Alice!</q>
</div></body></html>"#;

    let mut inputs = vec![Cursor::new(conversation)];
    let mut sink = Vec::new();
    let options = ConvertOptions::new().with_timezone("America/New_York");
    let report = convert(&mut inputs, &mut sink, &options)?;

    println!("   {} messages, {} contact(s)", report.messages, report.contacts);

    // Example 2: The records carry both timestamp encodings
    println!("\n2. Output document:");
    for line in report.xml.lines().take(5) {
        println!("   {line}");
    }

    // Example 3: Supplying number overrides for contacts without links
    println!("\n3. Overrides for contacts without telephone links:");
    let options = ConvertOptions::new()
        .with_timezone("America/New_York")
        .with_contacts("Bob: +15550002222; Carol: +15550003333");
    let bare = r#"<html><head><title>Me to Bob</title></head><body>
<div class="message">
  <abbr class="dt" title="2024-02-01T08:00:00.000-05:00">sent</abbr>
  <cite class="sender vcard"><abbr class="fn">Bob</abbr></cite>
  <q>No number in this export</q>
</div></body></html>"#;

    let mut inputs = vec![Cursor::new(bare)];
    let mut sink = Vec::new();
    let report = convert(&mut inputs, &mut sink, &options)?;
    println!("   unresolved contacts: {:?}", report.missing);

    // Example 4: Parsing a single document without converting
    println!("\n4. Inspecting a document directly:");
    let doc = ConversationDocument::parse(conversation)?.expect("document has content");
    println!("   conversation with: {}", doc.contact_name);
    for entry in &doc.entries {
        println!("   {}: {:?}", entry.sender, entry.body);
    }

    Ok(())
}
