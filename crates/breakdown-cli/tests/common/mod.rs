//! Fixtures shared by the CLI integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;

pub fn cmd() -> Command {
    Command::cargo_bin("breakdown").unwrap()
}

/// A word drawn at (`x`, `y`) in PDF user space, baseline `y` from the bottom.
pub type Word = (&'static str, f64, f64);

/// Build a PDF with one page per entry, each word placed with its own text
/// object so its left edge is exactly `x`.
pub fn pdf_with_words(pages: &[Vec<Word>]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for words in pages {
        let mut content = String::new();
        for (text, x, y) in words {
            content.push_str(&format!("BT /F1 10 Tf {x} {y} Td ({text}) Tj ET\n"));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
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
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
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

/// Page 1: a two-column role legend. Page 2: two scenes with a cast column.
pub fn schedule_pdf() -> Vec<u8> {
    pdf_with_words(&[
        vec![
            ("1", 40.0, 740.0),
            ("ANNA", 60.0, 740.0),
            ("3", 340.0, 740.0),
            ("BEN", 360.0, 740.0),
            ("2", 40.0, 720.0),
            ("CARLA", 60.0, 720.0),
        ],
        vec![
            ("1", 20.0, 700.0),
            ("/", 35.0, 700.0),
            ("1", 50.0, 700.0),
            ("Flur", 80.0, 700.0),
            ("I/T", 200.0, 700.0),
            ("1", 400.0, 700.0),
            ("Anna", 80.0, 685.0),
            ("wartet", 120.0, 685.0),
            ("3", 400.0, 685.0),
            ("1", 20.0, 650.0),
            ("2", 50.0, 650.0),
            ("Zimmer", 80.0, 650.0),
            ("AN", 200.0, 650.0),
            ("2", 400.0, 650.0),
            ("Schlaf", 80.0, 635.0),
            ("5", 400.0, 635.0),
            ("Komparsen", 420.0, 635.0),
        ],
    ])
}

/// The schedule of [`schedule_pdf`] as a token dump.
pub const SCHEDULE_TOKENS: &str = r#"{"pages":[
  {"width":612.0,"tokens":[
    {"text":"1","x0":40.0,"top":50.0},{"text":"ANNA","x0":60.0,"top":50.0},
    {"text":"3","x0":340.0,"top":50.0},{"text":"BEN","x0":360.0,"top":50.0},
    {"text":"2","x0":40.0,"top":70.0},{"text":"CARLA","x0":60.0,"top":70.0}]},
  {"width":612.0,"tokens":[
    {"text":"1","x0":20.0,"top":90.0},{"text":"/","x0":35.0,"top":90.0},
    {"text":"1","x0":50.0,"top":90.0},{"text":"Flur","x0":80.0,"top":90.0},
    {"text":"I/T","x0":200.0,"top":90.0},{"text":"1","x0":400.0,"top":90.0},
    {"text":"Anna","x0":80.0,"top":105.0},{"text":"wartet","x0":120.0,"top":105.0},
    {"text":"3","x0":400.0,"top":105.0},
    {"text":"1","x0":20.0,"top":140.0},{"text":"2","x0":50.0,"top":140.0},
    {"text":"Zimmer","x0":80.0,"top":140.0},{"text":"AN","x0":200.0,"top":140.0},
    {"text":"2","x0":400.0,"top":140.0},
    {"text":"Schlaf","x0":80.0,"top":155.0},{"text":"5","x0":400.0,"top":155.0},
    {"text":"Komparsen","x0":420.0,"top":155.0}]}
]}"#;

pub const HEADER: [&str; 7] = ["Tag", "Bild", "Zeit", "Inhalt", "Rollen", "SFX", "Notizen"];

/// A DOCX whose first table holds `rows`, row 0 being the header.
pub fn template_docx(rows: &[[&str; 7]]) -> Vec<u8> {
    let mut table = String::from("<w:tbl><w:tblGrid>");
    for width in [700, 700, 900, 3000, 2500, 1200, 1200] {
        table.push_str(&format!(r#"<w:gridCol w:w="{width}"/>"#));
    }
    table.push_str("</w:tblGrid>");
    for row in rows {
        table.push_str("<w:tr>");
        for cell in row {
            table.push_str(&format!("<w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc>"));
        }
        table.push_str("</w:tr>");
    }
    table.push_str("</w:tbl>");
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{table}<w:sectPr/></w:body></w:document>"#
    );
    docx_with_document(&xml)
}

pub fn docx_with_document(document_xml: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// The previous breakdown: scene (1, 1) annotated, scene (9, 9) since cut.
pub fn previous_breakdown() -> Vec<u8> {
    template_docx(&[
        HEADER,
        ["1", "1", "I/T", "old", "old", "blood", "check wig"],
        ["9", "9", "I/N", "cut", "", "", "gone"],
    ])
}

/// Write `bytes` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
