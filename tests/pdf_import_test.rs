mod common;

use common::{
    pdf_document, pdf_document_with_font, FontKind, AP_BIOLOGY, HONORS_CHEMISTRY, JUNIOR_HEADER,
    PHYSICAL_ED,
};
use reportcard_etl::core::TextSource;
use reportcard_etl::{
    parse_document, CourseLevel, EtlEngine, ImportPipeline, LetterGrade, LocalStorage,
    PdfTextSource, TomlConfig,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_parse_generated_pdf() -> anyhow::Result<()> {
    let bytes = pdf_document(&[&[JUNIOR_HEADER, AP_BIOLOGY, HONORS_CHEMISTRY], &[PHYSICAL_ED]]);

    let source = PdfTextSource::from_bytes("junior.pdf", &bytes)?;
    assert_eq!(source.page_count(), 2);

    let result = parse_document(&source).await?;
    assert_eq!(result.year_label, "Junior Year (2024-25)");

    let names: Vec<&str> = result.courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["AP Biology", "Hon Chemistry", "Physical Ed"]);

    assert_eq!(result.courses[0].level, CourseLevel::Ap);
    assert_eq!(result.courses[1].level, CourseLevel::Honors);
    assert_eq!(result.courses[1].grade, LetterGrade::AMinus);
    assert_eq!(result.courses[2].credits.to_string(), "3.75");

    Ok(())
}

#[tokio::test]
async fn test_parse_pdf_with_subset_cid_font() -> anyhow::Result<()> {
    let bytes = pdf_document_with_font(
        &[&[JUNIOR_HEADER, AP_BIOLOGY, HONORS_CHEMISTRY]],
        FontKind::SubsetCid,
    );

    let source = PdfTextSource::from_bytes("generated.pdf", &bytes)?;
    let result = parse_document(&source).await?;

    assert_eq!(result.year_label, "Junior Year (2024-25)");
    let names: Vec<&str> = result.courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["AP Biology", "Hon Chemistry"]);
    assert_eq!(result.courses[0].grade, LetterGrade::AMinus);
    assert_eq!(result.courses[0].credits.to_string(), "5");

    Ok(())
}

#[test]
fn test_pdf_fragments_keep_page_coordinates() {
    let bytes = pdf_document(&[&[AP_BIOLOGY]]);
    let source = PdfTextSource::from_bytes("single.pdf", &bytes).unwrap();

    let fragments = tokio_test::block_on(source.page_fragments(0)).unwrap();
    let first = fragments.iter().find(|f| f.text == "AP Biology").unwrap();
    assert_eq!(first.x, 72);
    assert!((first.y - 700).abs() <= 3);
    assert_eq!(fragments.len(), AP_BIOLOGY.cells.len());

    assert!(tokio_test::block_on(source.page_fragments(1)).is_err());
}

#[tokio::test]
async fn test_toml_driven_import_counts_corrupt_pdf() -> anyhow::Result<()> {
    let input_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;

    let good = input_dir.path().join("junior.pdf");
    std::fs::write(&good, pdf_document(&[&[JUNIOR_HEADER, AP_BIOLOGY]]))?;
    let corrupt = input_dir.path().join("corrupt.pdf");
    std::fs::write(&corrupt, b"not a pdf at all")?;

    let toml_content = format!(
        r#"
[import]
name = "pdf-test"
inputs = ["{}", "{}"]
document_timeout_secs = 30

[load]
output_path = "{}"
output_formats = ["csv"]

[load.compression]
enabled = true
filename = "junior.zip"
"#,
        good.display(),
        corrupt.display(),
        output_dir.path().display()
    );
    let config = TomlConfig::from_toml_str(&toml_content)?;

    let storage = LocalStorage::new(output_dir.path().to_str().unwrap().to_string());
    let engine = EtlEngine::new(ImportPipeline::new(storage, config));

    let report = engine.run().await?;
    assert_eq!(report.summary.accepted, 1);
    assert_eq!(report.summary.discarded, 1);

    let zip_data = std::fs::read(output_dir.path().join("junior.zip"))?;
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["courses.csv", "discarded.json"]);

    Ok(())
}
