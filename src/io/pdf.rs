//! Single-page PDF report.
//!
//! The page is first laid out as a list of [`Mark`]s in millimetres measured
//! from the top-left corner, then rendered into PDF content operators.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::domain::{SnapshotRow, format_fixed2};

use super::ExportError;

pub const REPORT_TITLE: &str = "Calculator Report";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

const LEFT_X: f32 = 20.0;
const VALUE_X: f32 = 60.0;
const RULE_END_X: f32 = 180.0;
const TITLE_Y: f32 = 20.0;
const HEADER_Y: f32 = 40.0;
const LINE_STEP: f32 = 10.0;
const TOTAL_GAP: f32 = 5.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const RULE_WIDTH_MM: f32 = 0.2;

const FONT_KEY: &str = "F1";

/// Something drawn on the report page. Coordinates are in millimetres from
/// the top-left corner; `y` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
    },
    Rule {
        from_x: f32,
        to_x: f32,
        y: f32,
    },
}

impl Mark {
    fn text(x: f32, y: f32, size: f32, text: impl Into<String>) -> Self {
        Mark::Text {
            x,
            y,
            size,
            text: text.into(),
        }
    }

    fn rule(y: f32) -> Self {
        Mark::Rule {
            from_x: LEFT_X,
            to_x: RULE_END_X,
            y,
        }
    }
}

/// Lay out the report: title, column headers, a rule, one line per entry,
/// a second rule and the total line.
pub fn layout_report(rows: &[SnapshotRow], total: f64) -> Vec<Mark> {
    let mut marks = Vec::with_capacity(rows.len() * 2 + 7);
    marks.push(Mark::text(LEFT_X, TITLE_Y, TITLE_SIZE, REPORT_TITLE));

    let mut y = HEADER_Y;
    marks.push(Mark::text(LEFT_X, y, BODY_SIZE, "Order"));
    marks.push(Mark::text(VALUE_X, y, BODY_SIZE, "Number"));
    y += LINE_STEP;

    marks.push(Mark::rule(y));
    y += LINE_STEP;

    for row in rows {
        marks.push(Mark::text(LEFT_X, y, BODY_SIZE, row.display_index.to_string()));
        marks.push(Mark::text(VALUE_X, y, BODY_SIZE, format_fixed2(row.value)));
        y += LINE_STEP;
    }

    y += TOTAL_GAP;
    marks.push(Mark::rule(y));
    y += LINE_STEP;
    marks.push(Mark::text(LEFT_X, y, BODY_SIZE, "Total:"));
    marks.push(Mark::text(VALUE_X, y, BODY_SIZE, format_fixed2(total)));

    marks
}

fn to_pt_x(mm: f32) -> f32 {
    mm * PT_PER_MM
}

fn to_pt_y(mm: f32) -> f32 {
    (PAGE_HEIGHT_MM - mm) * PT_PER_MM
}

fn render_operations(marks: &[Mark]) -> Vec<Operation> {
    let mut operations = vec![Operation::new("w", vec![(RULE_WIDTH_MM * PT_PER_MM).into()])];

    for mark in marks {
        match mark {
            Mark::Text { x, y, size, text } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(FONT_KEY.as_bytes().to_vec()), (*size).into()],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![to_pt_x(*x).into(), to_pt_y(*y).into()],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
                operations.push(Operation::new("ET", vec![]));
            }
            Mark::Rule { from_x, to_x, y } => {
                operations.push(Operation::new(
                    "m",
                    vec![to_pt_x(*from_x).into(), to_pt_y(*y).into()],
                ));
                operations.push(Operation::new(
                    "l",
                    vec![to_pt_x(*to_x).into(), to_pt_y(*y).into()],
                ));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    operations
}

/// Render the report as a one-page A4 PDF document.
pub fn to_pdf_bytes(rows: &[SnapshotRow], total: f64) -> Result<Vec<u8>, ExportError> {
    let marks = layout_report(rows, total);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_KEY => font_id,
        },
    });

    let content = Content {
        operations: render_operations(&marks),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            to_pt_x(PAGE_WIDTH_MM).into(),
            to_pt_x(PAGE_HEIGHT_MM).into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(REPORT_TITLE),
        "Producer" => Object::string_literal(concat!("tallysheet ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
