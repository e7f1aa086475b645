//! In-memory PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object, Stream};

/// Name/Age table: two full rows under the header, then a row with
/// nothing drawn in the Age column.
pub const TABLE_PAGE: &[u8] = b"
    BT /F1 10 Tf 100 700 Td (Name) Tj ET
    BT /F1 10 Tf 200 700 Td (Age) Tj ET
    BT /F1 10 Tf 100 680 Td (Ann) Tj ET
    BT /F1 10 Tf 200 680 Td (30) Tj ET
    BT /F1 10 Tf 100 660 Td (Bo) Tj ET
";

/// Same table, but the Bo row draws a single space in the Age column.
pub const BLANK_CELL_PAGE: &[u8] = b"
    BT /F1 10 Tf 100 700 Td (Name) Tj ET
    BT /F1 10 Tf 200 700 Td (Age) Tj ET
    BT /F1 10 Tf 100 680 Td (Ann) Tj ET
    BT /F1 10 Tf 200 680 Td (30) Tj ET
    BT /F1 10 Tf 100 660 Td (Bo) Tj ET
    BT /F1 10 Tf 200 660 Td ( ) Tj ET
";

/// Two lines of free text: "x y" then "z".
pub const TEXT_PAGE: &[u8] = b"
    BT /F1 12 Tf 72 720 Td (x y) Tj ET
    BT /F1 12 Tf 72 700 Td (z) Tj ET
";

/// A page that draws only lines.
pub const BLANK_PAGE: &[u8] = b"1 w 100 700 m 300 700 l S";

/// Build a PDF with one page per content stream.
pub fn pdf_with_pages(contents: &[&[u8]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(font_id),
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(kids.len() as i64),
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write a PDF built from `contents` into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, contents: &[&[u8]]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_pages(contents)).unwrap();
    path
}
