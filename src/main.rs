//! # smspack CLI
//!
//! Command-line interface for the smspack library.

use std::fs::File;
use std::io::Write;
use std::process;

use clap::Parser;

use smspack::cli::Args;
use smspack::pipeline::{ConvertOptions, convert};
use smspack::Result;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut options = ConvertOptions::new();
    if let Some(timezone) = &args.timezone {
        options = options.with_timezone(timezone);
    }
    if let Some(contacts) = &args.contacts {
        options = options.with_contacts(contacts);
    }

    let mut inputs = Vec::with_capacity(args.input.len());
    for path in &args.input {
        inputs.push(File::open(path)?);
    }

    // Buffer the document so a failed run leaves no partial output file.
    let mut sink = Vec::new();
    convert(&mut inputs, &mut sink, &options)?;

    match &args.output {
        Some(path) => std::fs::write(path, &sink)?,
        None => std::io::stdout().write_all(&sink)?,
    }

    Ok(())
}
