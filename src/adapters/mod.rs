// Adapters layer: concrete TextSource implementations for document formats.

pub mod fragments;
pub mod pdf;

pub use fragments::JsonTextSource;
pub use pdf::PdfTextSource;

use crate::domain::ports::TextSource;
use crate::utils::error::{EtlError, Result};
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "json"];

/// Pick a decoder by file extension and decode `bytes`.
///
/// Decoding is CPU bound; callers on the async runtime should run it
/// inside `spawn_blocking`.
pub fn decode_document(name: &str, bytes: &[u8]) -> Result<Box<dyn TextSource>> {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => Ok(Box::new(PdfTextSource::from_bytes(name, bytes)?)),
        Some("json") => Ok(Box::new(JsonTextSource::from_bytes(name, bytes)?)),
        _ => Err(EtlError::decode(
            name,
            format!(
                "unsupported document type, expected one of: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            ),
        )),
    }
}
