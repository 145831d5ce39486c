pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::{decode_document, JsonTextSource, PdfTextSource};
pub use core::etl::{EtlEngine, RunReport};
pub use core::import_pipeline::ImportPipeline;
pub use core::parser::{assemble_pages, classify_row, parse_document};
pub use domain::model::{CourseLevel, CourseRecord, Credits, ImportResult, LetterGrade};
pub use utils::error::{EtlError, Result};
