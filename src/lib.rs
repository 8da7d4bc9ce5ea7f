//! xlsxpopulate - Pure-Rust spreadsheet-driven template populator
//!
//! This crate reads the first worksheet of a spreadsheet, treats its first row as
//! headers, and renders a text template once per data row. Each rendered row becomes
//! one output, named after a chosen column or after the row's position.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use xlsxpopulate::{PopulatorBuilder, RunPaths};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let populator = PopulatorBuilder::new()
//!         .with_naming_column("Name")
//!         .with_extension("txt")
//!         .build()?;
//!
//!     let summary = populator.run(&RunPaths {
//!         template: PathBuf::from("template.txt"),
//!         spreadsheet: PathBuf::from("values.xlsx"),
//!         output_dir: PathBuf::from("out"),
//!     })?;
//!
//!     println!("{} files written", summary.files_written);
//!     Ok(())
//! }
//! ```
//!
//! For in-memory population, pass any reader:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsxpopulate::PopulatorBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let populator = PopulatorBuilder::new().build()?;
//! let workbook_bytes: Vec<u8> = vec![]; // Your spreadsheet bytes
//! let outputs = populator.populate("Hello {{ Name }}", Cursor::new(workbook_bytes))?;
//! for output in outputs {
//!     println!("{} -> {}", output.file_name, output.content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Formatting
//!
//! ```rust,no_run
//! use xlsxpopulate::{BoolStyle, CollisionPolicy, DateFormat, PopulatorBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let populator = PopulatorBuilder::new()
//!     .with_decimal_separator(',')
//!     .with_date_format(DateFormat::Custom("%d.%m.%Y".to_string()))
//!     .with_bool_style(BoolStyle::LowerCase)
//!     .with_collision_policy(CollisionPolicy::AppendIndex)
//!     .collapse_newlines(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod extractor;
mod formatter;
mod naming;
mod parser;
mod security;
mod template;
mod types;

// 公開API
pub use api::{
    BoolStyle, CollisionPolicy, DateFormat, DuplicateHeaderPolicy, FormatContext, TemplateOptions,
};
pub use builder::{Populator, PopulatorBuilder, RunPaths, DEFAULT_EXTENSION};
pub use error::PopulateError;
pub use template::{CompiledTemplate, RECORD_VARIABLE};
pub use types::{OutputDescriptor, Record, RunSummary};
