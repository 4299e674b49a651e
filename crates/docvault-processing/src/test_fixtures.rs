//! Small PDFs built with lopdf, shared with the API integration tests through
//! the `test-fixtures` feature.

use bytes::Bytes;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

/// One page per entry, each showing its text in Helvetica. Empty entries
/// produce blank pages.
pub fn pdf_with_pages(pages: &[&str]) -> Bytes {
    let doc = document_with_pages(pages);
    save(doc)
}

/// A single page with no text operators.
pub fn blank_pdf() -> Bytes {
    pdf_with_pages(&[""])
}

/// Header followed by a truncated object and no cross-reference table.
pub fn corrupt_pdf() -> Bytes {
    Bytes::from_static(b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog\ntruncated")
}

/// A one-page document behind the standard security handler (RC4, revision 2)
/// whose user password is not empty, so it cannot be opened without one.
pub fn password_protected_pdf() -> Bytes {
    let mut doc = document_with_pages(&["Confidential"]);

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "P" => -44,
        "O" => Object::String(vec![0x4f; 32], StringFormat::Hexadecimal),
        "U" => Object::String(vec![0x55; 32], StringFormat::Hexadecimal),
    });
    let file_id = Object::String(b"docvault-fixture".to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    save(doc)
}

fn document_with_pages(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn save(mut doc: Document) -> Bytes {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize pdf");
    Bytes::from(buffer)
}
