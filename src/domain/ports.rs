use crate::domain::model::{Fragment, ParsedDocument, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub const DEFAULT_ARCHIVE_NAME: &str = "reportcard_import.zip";

pub trait ConfigProvider: Send + Sync {
    fn inputs(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn compress_output(&self) -> bool;
    fn concurrent_documents(&self) -> usize;
    fn document_timeout_secs(&self) -> Option<u64>;

    fn archive_filename(&self) -> &str {
        DEFAULT_ARCHIVE_NAME
    }
}

/// Positioned text of a decoded document, one page at a time.
///
/// Pages are zero-based. Fetching a page may suspend; the parser awaits
/// page N before building page N's rows.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn page_count(&self) -> usize;
    async fn page_fragments(&self, page: usize) -> Result<Vec<Fragment>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ParsedDocument>>;
    async fn transform(&self, documents: Vec<ParsedDocument>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
