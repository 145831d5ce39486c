use crate::domain::model::Fragment;
use crate::domain::ports::TextSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawFragment {
    text: String,
    x: f64,
    y: f64,
    #[serde(default)]
    width: f64,
}

#[derive(Debug, Deserialize)]
struct FragmentDump {
    pages: Vec<Vec<RawFragment>>,
}

/// Pages of positioned text produced by another extractor, stored as JSON:
///
/// ```json
/// { "pages": [ [ { "text": "AP Biology", "x": 36.2, "y": 512.0, "width": 48.1 } ] ] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonTextSource {
    pages: Vec<Vec<Fragment>>,
}

impl JsonTextSource {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let dump: FragmentDump =
            serde_json::from_slice(bytes).map_err(|e| EtlError::decode(name, e))?;

        let pages = dump
            .pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .filter_map(|raw| Fragment::new(&raw.text, raw.x, raw.y, raw.width))
                    .collect()
            })
            .collect();

        Ok(Self { pages })
    }

    /// Wrap fragments already extracted in memory.
    pub fn from_pages(pages: Vec<Vec<Fragment>>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl TextSource for JsonTextSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page_fragments(&self, page: usize) -> Result<Vec<Fragment>> {
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_dump_is_trimmed_and_rounded() {
        let json = br#"{"pages": [[
            {"text": " Chemistry ", "x": 36.4, "y": 511.6, "width": 40.0},
            {"text": "   ", "x": 90.0, "y": 512.0},
            {"text": "B+", "x": 120.0, "y": 512.0}
        ], []]}"#;

        let source = JsonTextSource::from_bytes("card.json", json).unwrap();
        assert_eq!(source.page_count(), 2);

        let first = source.page_fragments(0).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].text, "Chemistry");
        assert_eq!((first[0].x, first[0].y), (36, 512));
        assert_eq!(first[1].width, 0.0);
        assert!(source.page_fragments(1).await.unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = JsonTextSource::from_bytes("card.json", b"{\"pages\": 3}").unwrap_err();
        assert!(matches!(err, EtlError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_in_memory_pages_parse_like_a_dump() {
        let fragments: Vec<Fragment> = [("Geometry", 40.0), ("B", 300.0), ("A-", 340.0)]
            .iter()
            .filter_map(|(text, x)| Fragment::new(text, *x, 600.0, 20.0))
            .collect();
        let source = JsonTextSource::from_pages(vec![Vec::new(), fragments]);
        assert_eq!(source.page_count(), 2);

        let result = crate::core::parser::parse_document(&source).await.unwrap();
        assert_eq!(result.year_label, "Imported Year");
        assert_eq!(result.courses.len(), 1);
        assert_eq!(result.courses[0].name, "Geometry");
        assert_eq!(result.courses[0].grade.as_str(), "A-");
    }
}
