use crate::domain::model::Fragment;
use crate::domain::ports::TextSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use pdfplumber::{Pdf, WordOptions};

/// Characters closer than `x_tolerance` stay in one fragment, spaces
/// included, so "AP Biology" survives as a single cell.
fn cell_options() -> WordOptions {
    WordOptions {
        keep_blank_chars: true,
        ..WordOptions::default()
    }
}

/// A PDF decoded with font-aware text extraction (ToUnicode maps, CID fonts
/// and real glyph widths).
pub struct PdfTextSource {
    name: String,
    pdf: Pdf,
}

impl std::fmt::Debug for PdfTextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfTextSource")
            .field("name", &self.name)
            .field("pages", &self.pdf.page_count())
            .finish()
    }
}

impl PdfTextSource {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let pdf = Pdf::open(bytes, None).map_err(|e| EtlError::decode(name, e))?;
        tracing::debug!("Loaded '{}' with {} pages", name, pdf.page_count());

        Ok(Self {
            name: name.to_string(),
            pdf,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fragments of one page. `y` is measured from the bottom of the page,
    /// so larger values are higher up.
    pub fn extract_page(&self, page: usize) -> Result<Vec<Fragment>> {
        let page_data = self
            .pdf
            .page(page)
            .map_err(|e| EtlError::decode(&self.name, e))?;
        let height = page_data.height();

        let fragments: Vec<Fragment> = page_data
            .extract_words(&cell_options())
            .into_iter()
            .filter_map(|word| {
                Fragment::new(
                    &word.text,
                    word.bbox.x0,
                    height - word.bbox.bottom,
                    word.bbox.x1 - word.bbox.x0,
                )
            })
            .collect();

        tracing::trace!("Page {} of '{}': {} fragments", page, self.name, fragments.len());
        Ok(fragments)
    }
}

#[async_trait]
impl TextSource for PdfTextSource {
    fn page_count(&self) -> usize {
        self.pdf.page_count()
    }

    async fn page_fragments(&self, page: usize) -> Result<Vec<Fragment>> {
        self.extract_page(page)
    }
}
