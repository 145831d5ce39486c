#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// One text row: fragments laid out left to right at the given baseline.
pub struct Line<'a> {
    pub y: i64,
    pub cells: &'a [(&'a str, i64)],
}

/// Fragment dump accepted by `JsonTextSource`, one entry per page.
pub fn fragment_dump(pages: &[&[Line]]) -> Vec<u8> {
    let pages: Vec<Vec<serde_json::Value>> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .flat_map(|line| {
                    line.cells.iter().map(move |(text, x)| {
                        serde_json::json!({ "text": text, "x": x, "y": line.y, "width": 40.0 })
                    })
                })
                .collect()
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({ "pages": pages })).unwrap()
}

/// Glyph ids of a subset TrueType font: printable ASCII shifted down by 0x1D,
/// so "A" is drawn as glyph 0x0024.
const GLYPH_OFFSET: u32 = 0x1D;

#[derive(Clone, Copy, PartialEq)]
pub enum FontKind {
    /// Standard Type1 Courier with literal strings.
    Courier,
    /// Type0 / Identity-H font whose codes only decode through `/ToUnicode`.
    SubsetCid,
}

fn show_text(text: &str, font: FontKind) -> Object {
    match font {
        FontKind::Courier => Object::string_literal(text),
        FontKind::SubsetCid => Object::String(
            text.chars()
                .flat_map(|c| ((c as u32 - GLYPH_OFFSET) as u16).to_be_bytes())
                .collect(),
            StringFormat::Hexadecimal,
        ),
    }
}

fn page_content(lines: &[Line], font: FontKind) -> Content {
    let mut operations = Vec::new();
    for line in lines {
        for (text, x) in line.cells {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), line.y.into()]));
            operations.push(Operation::new("Tj", vec![show_text(text, font)]));
            operations.push(Operation::new("ET", vec![]));
        }
    }
    Content { operations }
}

fn font_object(doc: &mut Document, font: FontKind) -> ObjectId {
    match font {
        FontKind::Courier => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        }),
        FontKind::SubsetCid => {
            let to_unicode = format!(
                "/CIDInit /ProcSet findresource begin\n\
                 12 dict begin\n\
                 begincmap\n\
                 /CMapName /Adobe-Identity-UCS def\n\
                 /CMapType 2 def\n\
                 1 begincodespacerange\n\
                 <0000> <FFFF>\n\
                 endcodespacerange\n\
                 1 beginbfrange\n\
                 <{:04X}> <{:04X}> <0020>\n\
                 endbfrange\n\
                 endcmap\n",
                0x20 - GLYPH_OFFSET,
                0x7E - GLYPH_OFFSET
            );
            let to_unicode_id =
                doc.add_object(Stream::new(dictionary! {}, to_unicode.into_bytes()));
            let cid_font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType2",
                "BaseFont" => "ABCDEF+Arial",
                "DW" => 500,
                "CIDToGIDMap" => "Identity",
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::string_literal("Adobe"),
                    "Ordering" => Object::string_literal("Identity"),
                    "Supplement" => 0,
                },
            });
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => "ABCDEF+Arial",
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![cid_font_id.into()],
                "ToUnicode" => to_unicode_id,
            })
        }
    }
}

/// Minimal PDF in standard Courier, one content stream per page.
pub fn pdf_document(pages: &[&[Line]]) -> Vec<u8> {
    pdf_document_with_font(pages, FontKind::Courier)
}

pub fn pdf_document_with_font(pages: &[&[Line]], font: FontKind) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font_object(&mut doc, font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let content = page_content(lines, font);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub const JUNIOR_HEADER: Line<'static> = Line {
    y: 760,
    cells: &[("2024-25", 72), ("Grade 11", 200)],
};

pub const AP_BIOLOGY: Line<'static> = Line {
    y: 700,
    cells: &[
        ("AP Biology", 72),
        ("5750-1", 200),
        ("A", 300),
        ("A-", 340),
        ("5.000", 400),
    ],
};

pub const HONORS_CHEMISTRY: Line<'static> = Line {
    y: 680,
    cells: &[("Hon Chemistry", 72), ("B+", 300), ("A-", 340)],
};

pub const PHYSICAL_ED: Line<'static> = Line {
    y: 700,
    cells: &[("Physical Ed", 72), ("A", 300), ("A", 340)],
};
