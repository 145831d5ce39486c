pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::{
    adapters::SUPPORTED_EXTENSIONS,
    core::ConfigProvider,
    utils::error::Result,
    utils::validation::{
        validate_file_extensions, validate_non_empty_list, validate_output_formats,
        validate_path, validate_positive_number, validate_range, Validate,
    },
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "reportcard-etl")]
#[command(about = "Import course records from report card PDFs")]
pub struct CliConfig {
    /// Report cards to import (.pdf, or .json fragment dumps)
    #[arg(long, value_delimiter = ',', required = true)]
    pub inputs: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_values_t = ["csv".to_string(), "json".to_string()])]
    pub output_formats: Vec<String>,

    #[arg(long, default_value = "4")]
    pub concurrent_documents: usize,

    #[arg(long, help = "Give up on a single document after this many seconds")]
    pub document_timeout_secs: Option<u64>,

    #[arg(long, help = "Write plain files instead of a zip archive")]
    pub no_compress: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn inputs(&self) -> &[String] {
        &self.inputs
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn compress_output(&self) -> bool {
        !self.no_compress
    }

    fn concurrent_documents(&self) -> usize {
        self.concurrent_documents
    }

    fn document_timeout_secs(&self) -> Option<u64> {
        self.document_timeout_secs
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("inputs", &self.inputs)?;
        validate_file_extensions("inputs", &self.inputs, &SUPPORTED_EXTENSIONS)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        validate_positive_number("concurrent_documents", self.concurrent_documents, 1)?;
        validate_range("concurrent_documents", self.concurrent_documents, 1, 64)?;
        if let Some(timeout) = self.document_timeout_secs {
            validate_range("document_timeout_secs", timeout, 1, 3600)?;
        }
        Ok(())
    }
}
