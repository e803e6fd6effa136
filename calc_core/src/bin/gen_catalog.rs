//! Generate CALCULATORS.md from the calculator registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog
//! cargo run --bin gen-catalog -- docs/CALCULATORS.md
//! ```
//!
//! Without an argument the file is written to `CALCULATORS.md` in the
//! current directory.

use std::fs;
use std::path::PathBuf;

use calc_core::calculators::{catalog, generate_catalog_markdown};

const DEFAULT_OUTPUT: &str = "CALCULATORS.md";

fn main() {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("Generating {} ({} calculators)...", output_path.display(), catalog().len());
    let markdown = generate_catalog_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
