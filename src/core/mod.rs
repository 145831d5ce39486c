pub mod etl;
pub mod import_pipeline;
pub mod parser;

pub use crate::domain::model::{ImportResult, ParsedDocument, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TextSource};
pub use crate::utils::error::Result;
