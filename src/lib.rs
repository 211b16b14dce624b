//! md2xlsx - Markdown-embedded JSON to styled Excel converter
//!
//! This crate extracts a JSON array of sheet descriptions embedded in a Markdown
//! document and writes it out as an XLSX workbook, with per-cell text and
//! per-cell styling (font, font color, solid fill, borders, underline, strike).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use md2xlsx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // report.md -> report.xlsx
//!     let report = converter.convert_file("report.md")?;
//!
//!     for warning in report.warnings() {
//!         println!("Warning: {}", warning);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, use `convert_to_buffer`:
//!
//! ```rust
//! use md2xlsx::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let markdown = r##"
//! Report table:
//!
//! [{"name": "S1",
//!   "rows": {"0": {"cells": {"0": {"text": "Hi", "style": 0}}}},
//!   "styles": [{"bgcolor": "#FF0000"}]}]
//! "##;
//! let xlsx: Vec<u8> = converter.convert_to_buffer(markdown)?;
//! assert!(xlsx.starts_with(b"PK"));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use md2xlsx::{ConverterBuilder, FontMode, StyleIndexPolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_font_mode(FontMode::Merge)  // bold + underline on the same cell
//!         .with_style_index_policy(StyleIndexPolicy::Lenient)  // unknown style -> unstyled
//!         .with_default_sheet_name("Data")
//!         .build()?;
//!
//!     converter.convert_file_to("report.md", "out/report.xlsx")?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod grid;
mod output;
mod parser;
mod security;
mod style;
mod types;

// 公開API
pub use api::{FontMode, StyleIndexPolicy};
pub use builder::{ConversionReport, Converter, ConverterBuilder};
pub use error::{MdToXlsxError, StyleError, StyleWarning};
pub use output::derive_output_path;
pub use parser::{load_document, load_document_file};
pub use style::{normalize_color, ArgbColor};
pub use types::{Document, FontSpec, SheetSpec, StyleSpec, DEFAULT_SHEET_NAME};
