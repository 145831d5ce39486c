//! Report card parsing: fragments -> rows -> course records.
//!
//! ```text
//! TextSource -> assemble_rows -> { MetadataScanner, classify_row } -> ImportResult
//! ```
//!
//! Everything below `report` is pure and synchronous; only fetching page
//! content from a [`TextSource`](crate::domain::ports::TextSource) awaits.

pub mod classifier;
pub mod credits;
pub mod level;
pub mod metadata;
pub mod patterns;
pub mod report;
pub mod rows;

pub use classifier::classify_row;
pub use credits::{default_credits, extract_credits, resolve_credits};
pub use level::detect_level;
pub use metadata::{MetadataScanner, PLACEHOLDER_YEAR_LABEL};
pub use report::{assemble_pages, parse_document, ReportAssembler};
pub use rows::assemble_rows;
