use crate::core::parser::classifier::classify_row;
use crate::core::parser::metadata::MetadataScanner;
use crate::core::parser::rows::assemble_rows;
use crate::domain::model::{CourseRecord, Fragment, ImportResult};
use crate::domain::ports::TextSource;
use crate::utils::error::Result;

/// Accumulates one document's pages. Pages must be pushed in order.
#[derive(Debug, Default)]
pub struct ReportAssembler {
    metadata: MetadataScanner,
    courses: Vec<CourseRecord>,
    pages: usize,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&mut self, fragments: Vec<Fragment>) {
        let rows = assemble_rows(fragments);
        self.metadata.scan_rows(&rows);

        let before = self.courses.len();
        self.courses.extend(rows.iter().filter_map(classify_row));
        self.pages += 1;

        tracing::debug!(
            "Page {}: {} rows, {} courses",
            self.pages,
            rows.len(),
            self.courses.len() - before
        );
    }

    pub fn finish(self) -> ImportResult {
        ImportResult {
            year_label: self.metadata.year_label(),
            courses: self.courses,
        }
    }
}

/// Parse already-decoded pages in document order.
pub fn assemble_pages<I>(pages: I) -> ImportResult
where
    I: IntoIterator<Item = Vec<Fragment>>,
{
    let mut assembler = ReportAssembler::new();
    for page in pages {
        assembler.push_page(page);
    }
    assembler.finish()
}

/// Parse every page of `source` into one [`ImportResult`].
///
/// A failing page aborts the document; nothing partial is returned.
pub async fn parse_document<S>(source: &S) -> Result<ImportResult>
where
    S: TextSource + ?Sized,
{
    let mut assembler = ReportAssembler::new();
    for page in 0..source.page_count() {
        let fragments = source.page_fragments(page).await?;
        assembler.push_page(fragments);
    }
    Ok(assembler.finish())
}
