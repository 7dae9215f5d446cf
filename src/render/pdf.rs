use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::render::errors::RenderError;
use crate::render::layout::{Font, Page};

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = "swish2pdf";

/// Resource names of the two built-in fonts.
const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Assembles laid-out pages into a PDF file.
///
/// Output is a pure function of the input: no creation date, no document ID
/// and no compression, so the same pages always produce the same bytes.
pub fn write_pdf(pages: &[Page], width: i64, height: i64, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut document = Document::with_version(PDF_VERSION);
    let pages_id = document.new_object_id();

    let regular_id = document.add_object(font_dictionary("Helvetica"));
    let bold_id = document.add_object(font_dictionary("Helvetica-Bold"));

    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());

    for page in pages {
        let content = Content { operations: page_operations(page) };
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;

    document.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(width), Object::Integer(height)],
    }));

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    let info_id = document.add_object(dictionary! {
        "Title" => Object::string_literal(encode_text(title)),
        "Producer" => Object::string_literal(PRODUCER),
    });

    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;

    Ok(bytes)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.texts.len() * 5 + page.rules.len() * 3 + 1);

    if !page.rules.is_empty() {
        operations.push(Operation::new("w", vec![Object::Integer(1)]));

        for rule in &page.rules {
            operations.push(Operation::new("m", vec![Object::Integer(rule.x1), Object::Integer(rule.y)]));
            operations.push(Operation::new("l", vec![Object::Integer(rule.x2), Object::Integer(rule.y)]));
            operations.push(Operation::new("S", vec![]));
        }
    }

    for item in &page.texts {
        let font = match item.font {
            Font::Regular => REGULAR_FONT,
            Font::Bold => BOLD_FONT
        };

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(item.size)]));
        operations.push(Operation::new("Td", vec![Object::Integer(item.x), Object::Integer(item.y)]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(encode_text(&item.text))]));
        operations.push(Operation::new("ET", vec![]));
    }

    operations
}

/// Encodes text for the WinAnsi encoded standard fonts.
///
/// Latin-1 maps directly, a handful of common punctuation marks map to their
/// Windows-1252 slots and anything else becomes `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) => c as u32 as u8,
            _ => b'?'
        })
        .collect()
}
