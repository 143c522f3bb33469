//! Command-line interface definition using clap.
//!
//! The binary owns everything the library treats as external: opening input
//! files, choosing the output sink, and logging configuration. The library
//! only ever sees already-open streams.

use std::path::PathBuf;

use clap::Parser;

/// Convert Google Voice Takeout conversations into SMS Backup & Restore XML.
#[derive(Parser, Debug, Clone)]
#[command(name = "smspack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    smspack Takeout/Voice/Calls/*.html -o backup.xml
    smspack conversation.html --timezone America/New_York
    smspack *.html --contacts 'Alice: +15550001111; Bob: +15550002222'")]
pub struct Args {
    /// Input conversation HTML files
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Path to output XML file (default: standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// IANA timezone name for readable dates (default: local timezone)
    #[arg(long, value_name = "ZONE")]
    pub timezone: Option<String>,

    /// Contact number overrides, e.g. "Alice: +15550001111; Bob: +15550002222"
    #[arg(long, value_name = "LIST")]
    pub contacts: Option<String>,
}
