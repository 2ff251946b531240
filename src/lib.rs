//! listing-caption - Property-listing spreadsheets to social-media captions
//!
//! This crate reads tabular property-listing data (CSV or Excel) and renders each
//! row into a fixed-template, emoji-decorated caption, ready to be posted or
//! exported as a downloadable file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use listing_caption::CaptionerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a captioner with default settings
//!     let captioner = CaptionerBuilder::new().build()?;
//!
//!     // Read the listings and write one caption per row
//!     let input = File::open("listings.xlsx")?;
//!     let output = File::create("captions.txt")?;
//!     captioner.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Single Row
//!
//! The caption formatter itself is a pure function and never fails. Missing
//! columns are rendered as empty strings.
//!
//! ```rust
//! use listing_caption::{generate_caption, Row};
//!
//! let row = Row::from_pairs([
//!     ("Property_Type", "Commercial"),
//!     ("Commercial-Property-Type", "Office-Space"),
//!     ("Location", "Ahmedabad-Bopal"),
//!     ("City1", "Ahmedabad"),
//!     ("BHK", "3"),
//! ]);
//!
//! let caption = generate_caption(&row);
//! assert_eq!(
//!     caption.lines().nth(1),
//!     Some("🏬 Amazing  Office Space sell at Bopal ,Ahmedabad")
//! );
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use listing_caption::{CaptionerBuilder, OutputFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let captioner = CaptionerBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("Listings".to_string()))
//!         .with_output_format(OutputFormat::Csv)
//!         .build()?;
//!
//!     let batch = captioner.generate_from_path("listings.xlsx")?;
//!     for column in &batch.missing_columns {
//!         eprintln!("warning: column '{}' not found", column);
//!     }
//!     captioner.export(&batch, File::create("captions.csv")?)?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod caption;
pub mod columns;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{DateFormat, InputFormat, OutputFormat, SheetSelector};
pub use builder::{Captioner, CaptionerBuilder, DEFAULT_SEPARATOR};
pub use caption::generate_caption;
pub use error::CaptionError;
pub use types::{Caption, CaptionBatch, CellValue, Listing, Row, Table};
