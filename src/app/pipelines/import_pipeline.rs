use crate::adapters::decode_document;
use crate::core::parser::parse_document;
use crate::core::{ConfigProvider, Pipeline, Storage, TextSource};
use crate::domain::model::{
    BatchSummary, DiscardedDocument, DocumentOutcome, ImportResult, ImportedYear, ParsedDocument,
    TransformResult,
};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use zip::write::{FileOptions, ZipWriter};

pub const COURSES_CSV: &str = "courses.csv";
pub const IMPORT_JSON: &str = "import.json";
pub const DISCARDED_JSON: &str = "discarded.json";

const NO_COURSES_REASON: &str = "no courses found";

#[derive(Serialize)]
struct CourseCsvRow<'a> {
    document: &'a str,
    year_label: &'a str,
    name: &'a str,
    grade: &'static str,
    level: &'static str,
    credits: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportExport<'a> {
    generated_at: DateTime<Utc>,
    summary: &'a BatchSummary,
    years: &'a [ImportedYear],
}

/// Turns raw document bytes into a text source.
pub type Decoder = fn(&str, &[u8]) -> Result<Box<dyn TextSource>>;

/// Decode and parse one document. Decoding runs on the blocking pool.
async fn parse_bytes(name: String, bytes: Vec<u8>, decoder: Decoder) -> Result<ImportResult> {
    let decode_name = name.clone();
    let source = tokio::task::spawn_blocking(move || decoder(&decode_name, &bytes))
        .await
        .map_err(|e| EtlError::decode(&name, e))??;
    parse_document(source.as_ref()).await
}

/// A timed-out parse yields an error, never a partial result.
pub(crate) async fn parse_with_timeout(
    name: String,
    bytes: Vec<u8>,
    decoder: Decoder,
    timeout_secs: Option<u64>,
) -> Result<ImportResult> {
    match timeout_secs {
        Some(seconds) => {
            let parse = parse_bytes(name.clone(), bytes, decoder);
            match tokio::time::timeout(Duration::from_secs(seconds), parse).await {
                Ok(result) => result,
                Err(_) => Err(EtlError::TimeoutError {
                    document: name,
                    seconds,
                }),
            }
        }
        None => parse_bytes(name, bytes, decoder).await,
    }
}

pub struct ImportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    decoder: Decoder,
}

impl<S: Storage, C: ConfigProvider> ImportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            decoder: decode_document,
        }
    }

    /// Replace the extension-based decoder, e.g. for additional formats.
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    fn failed(source: &str, reason: String) -> ParsedDocument {
        ParsedDocument {
            source: source.to_string(),
            outcome: DocumentOutcome::Failed { reason },
        }
    }

    fn render_csv(years: &[ImportedYear]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for year in years {
            for course in &year.result.courses {
                writer.serialize(CourseCsvRow {
                    document: &year.source,
                    year_label: &year.result.year_label,
                    name: &course.name,
                    grade: course.grade.as_str(),
                    level: course.level.as_str(),
                    credits: course.credits.to_string(),
                })?;
            }
        }
        let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    /// (file name, content) pairs selected by the configured formats.
    fn output_files(&self, result: &TransformResult) -> Result<Vec<(&'static str, String)>> {
        let mut files = Vec::new();
        if self.wants("csv") {
            files.push((COURSES_CSV, result.csv_output.clone()));
        }
        if self.wants("json") {
            files.push((IMPORT_JSON, result.json_output.clone()));
        }
        if !result.discarded.is_empty() {
            files.push((DISCARDED_JSON, serde_json::to_string_pretty(&result.discarded)?));
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ImportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ParsedDocument>> {
        let inputs = self.config.inputs();
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_documents().max(1)));
        let timeout_secs = self.config.document_timeout_secs();
        let decoder = self.decoder;

        let mut slots: Vec<Option<ParsedDocument>> = vec![None; inputs.len()];
        let mut tasks = JoinSet::new();

        for (index, input) in inputs.iter().enumerate() {
            let bytes = match self.storage.read_file(input).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("⚠️ Failed to read {}: {}", input, e);
                    slots[index] = Some(Self::failed(input, e.to_string()));
                    continue;
                }
            };

            tracing::debug!("Queued {} ({} bytes)", input, bytes.len());
            let name = input.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // 限制同時解析的文件數量
                let _permit = semaphore.acquire_owned().await.ok();
                let result = parse_with_timeout(name.clone(), bytes, decoder, timeout_secs).await;
                (index, name, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, name, result) = joined.map_err(|e| EtlError::ProcessingError {
                message: format!("Document parse task failed: {}", e),
            })?;

            slots[index] = Some(match result {
                Ok(import) => {
                    tracing::info!(
                        "📄 {}: {} courses, {}",
                        name,
                        import.courses.len(),
                        import.year_label
                    );
                    ParsedDocument {
                        source: name,
                        outcome: DocumentOutcome::Parsed(import),
                    }
                }
                Err(e) => {
                    tracing::warn!("⚠️ Failed to parse {}: {}", name, e);
                    Self::failed(&name, e.to_string())
                }
            });
        }

        // 依輸入順序回傳
        Ok(slots.into_iter().flatten().collect())
    }

    async fn transform(&self, documents: Vec<ParsedDocument>) -> Result<TransformResult> {
        let total = documents.len();
        let mut years = Vec::new();
        let mut discarded = Vec::new();

        for document in documents {
            match document.outcome {
                DocumentOutcome::Parsed(result) if !result.courses.is_empty() => {
                    years.push(ImportedYear {
                        source: document.source,
                        result,
                    });
                }
                DocumentOutcome::Parsed(_) => discarded.push(DiscardedDocument {
                    source: document.source,
                    reason: NO_COURSES_REASON.to_string(),
                }),
                DocumentOutcome::Failed { reason } => discarded.push(DiscardedDocument {
                    source: document.source,
                    reason,
                }),
            }
        }

        if years.is_empty() {
            return Err(EtlError::ProcessingError {
                message: "No courses found in selected documents".to_string(),
            });
        }

        let summary = BatchSummary {
            total,
            accepted: years.len(),
            discarded: discarded.len(),
        };

        let csv_output = Self::render_csv(&years)?;
        let json_output = serde_json::to_string_pretty(&ImportExport {
            generated_at: Utc::now(),
            summary: &summary,
            years: &years,
        })?;

        Ok(TransformResult {
            summary,
            years,
            discarded,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let files = self.output_files(&result)?;

        if !self.config.compress_output() {
            for (name, content) in &files {
                tracing::debug!("Writing {} ({} bytes)", name, content.len());
                self.storage.write_file(name, content.as_bytes()).await?;
            }
            return Ok(self.config.output_path().to_string());
        }

        let archive_name = self.config.archive_filename();
        tracing::debug!("Creating {} with {} files", archive_name, files.len());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, content) in &files {
                zip.start_file::<_, ()>(*name, FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }
            // 完成並取回底層 Vec<u8>
            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing archive ({} bytes) to storage", zip_data.len());
        self.storage.write_file(archive_name, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), archive_name))
    }
}
