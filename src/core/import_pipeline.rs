pub use crate::app::pipelines::import_pipeline::{
    Decoder, ImportPipeline, COURSES_CSV, DISCARDED_JSON, IMPORT_JSON,
};
