//! PDF rendering.
//!
//! Builds a paginated table on US-letter pages: title line on the first
//! page, a shaded header row repeated on every page, weighted column widths
//! and a light grid. Cell text is truncated with an ellipsis to fit its
//! column.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::{AppError, Result};

use super::{column_weight, Report};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN_LEFT: f32 = 18.0;
const MARGIN_RIGHT: f32 = 18.0;
const MARGIN_TOP: f32 = 24.0;
const MARGIN_BOTTOM: f32 = 24.0;

const TITLE_SIZE: f32 = 16.0;
const HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 8.0;
const HEADER_HEIGHT: f32 = 18.0;
const ROW_HEIGHT: f32 = 14.0;
const CELL_PADDING: f32 = 3.0;

/// Rough advance width of a Helvetica glyph as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Map text to WinAnsi bytes. Latin-1 passes through, the 0x80-0x9F glyphs
/// WinAnsi adds on top of it (euro sign, typographic quotes, dashes) map
/// explicitly, and anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // €
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85, // …
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91, // '
            '\u{2019}' => 0x92, // '
            '\u{201C}' => 0x93, // "
            '\u{201D}' => 0x94, // "
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Truncate text so it fits a column width at the given font size.
fn fit_text(text: &str, width: f32, font_size: f32) -> String {
    let max_chars = ((width - 2.0 * CELL_PADDING) / (GLYPH_WIDTH_RATIO * font_size)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}...")
}

fn show_text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![font.into(), Object::Real(size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![Object::Real(x), Object::Real(y)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn fill_rect(ops: &mut Vec<Operation>, rgb: (f32, f32, f32), x: f32, y: f32, w: f32, h: f32) {
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(rgb.0), Object::Real(rgb.1), Object::Real(rgb.2)],
    ));
    ops.push(Operation::new(
        "re",
        vec![Object::Real(x), Object::Real(y), Object::Real(w), Object::Real(h)],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn stroke_line(ops: &mut Vec<Operation>, x1: f32, y1: f32, x2: f32, y2: f32) {
    ops.push(Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]));
    ops.push(Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]));
    ops.push(Operation::new("S", vec![]));
}

/// Per-column layout: left edge and width of every column.
fn column_layout(columns: &[&'static str]) -> (Vec<f32>, Vec<f32>) {
    let content_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let total_weight: f32 = columns.iter().map(|c| column_weight(c)).sum();

    let widths: Vec<f32> = columns
        .iter()
        .map(|c| column_weight(c) / total_weight * content_width)
        .collect();

    let mut edges = Vec::with_capacity(widths.len());
    let mut x = MARGIN_LEFT;
    for w in &widths {
        edges.push(x);
        x += w;
    }
    (edges, widths)
}

/// Draw the shaded header row at `y_top`; returns the y of the row body area.
fn draw_header(
    ops: &mut Vec<Operation>,
    columns: &[&'static str],
    edges: &[f32],
    widths: &[f32],
    y_top: f32,
) -> f32 {
    let y_bottom = y_top - HEADER_HEIGHT;
    let content_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

    fill_rect(ops, (0.18, 0.31, 0.31), MARGIN_LEFT, y_bottom, content_width, HEADER_HEIGHT);
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(1.0), Object::Real(1.0), Object::Real(1.0)],
    ));
    for (i, column) in columns.iter().enumerate() {
        let text = fit_text(column, widths[i], HEADER_SIZE);
        show_text(
            ops,
            "F2",
            HEADER_SIZE,
            edges[i] + CELL_PADDING,
            y_bottom + 5.0,
            &text,
        );
    }
    // Back to black for the body
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
    ));

    y_bottom
}

/// Render a report as PDF bytes.
pub fn render(report: &Report) -> Result<Vec<u8>> {
    let (edges, widths) = column_layout(&report.columns);
    let content_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let right_edge = MARGIN_LEFT + content_width;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let mut row_index = 0;
    let mut first_page = true;

    // At least one page is emitted even for an empty report.
    while first_page || row_index < report.rows.len() {
        let mut ops: Vec<Operation> = Vec::new();

        let mut y_top = PAGE_HEIGHT - MARGIN_TOP;
        if first_page {
            show_text(
                &mut ops,
                "F2",
                TITLE_SIZE,
                MARGIN_LEFT,
                y_top - TITLE_SIZE,
                &report.title,
            );
            y_top -= TITLE_SIZE + 10.0;
        }

        let header_bottom = draw_header(&mut ops, &report.columns, &edges, &widths, y_top);

        // Fill rows until the bottom margin
        let mut y = header_bottom;
        let page_first_row = row_index;
        while row_index < report.rows.len() && y - ROW_HEIGHT >= MARGIN_BOTTOM {
            y -= ROW_HEIGHT;
            let row = &report.rows[row_index];
            for (i, cell) in row.iter().enumerate().take(report.columns.len()) {
                let text = fit_text(cell, widths[i], BODY_SIZE);
                show_text(&mut ops, "F1", BODY_SIZE, edges[i] + CELL_PADDING, y + 4.0, &text);
            }
            row_index += 1;
        }

        // Light grid: row separators plus column edges over the filled area
        ops.push(Operation::new(
            "RG",
            vec![Object::Real(0.7), Object::Real(0.7), Object::Real(0.7)],
        ));
        ops.push(Operation::new("w", vec![Object::Real(0.5)]));
        let rows_on_page = row_index - page_first_row;
        for r in 0..=rows_on_page {
            let line_y = header_bottom - r as f32 * ROW_HEIGHT;
            stroke_line(&mut ops, MARGIN_LEFT, line_y, right_edge, line_y);
        }
        let grid_bottom = header_bottom - rows_on_page as f32 * ROW_HEIGHT;
        for (i, edge) in edges.iter().enumerate() {
            stroke_line(&mut ops, *edge, y_top, *edge, grid_bottom);
            if i == edges.len() - 1 {
                stroke_line(&mut ops, right_edge, y_top, right_edge, grid_bottom);
            }
        }

        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Report(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());

        first_page = false;
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Report(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_rows(n: usize) -> Report {
        Report {
            title: "Workstation Inventory".into(),
            columns: vec!["Company", "Name", "User", "IP"],
            rows: (0..n)
                .map(|i| {
                    vec![
                        "Acme".into(),
                        format!("WS-{i:03}"),
                        "jdoe".into(),
                        format!("192.168.3.{}", i % 254 + 1),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        let long = "a very long description that cannot possibly fit";
        let fitted = fit_text(long, 60.0, BODY_SIZE);
        assert!(fitted.ends_with("..."));
        assert!(fitted.chars().count() < long.chars().count());

        assert_eq!(fit_text("short", 120.0, BODY_SIZE), "short");
    }

    #[test]
    fn test_encode_win_ansi_maps_latin1_and_replaces_rest() {
        let bytes = encode_win_ansi("Almacén");
        assert_eq!(bytes[5], 0xE9); // é
        assert_eq!(bytes[6], b'n');
        assert_eq!(encode_win_ansi("日本"), vec![b'?', b'?']);
    }

    #[test]
    fn test_encode_win_ansi_keeps_the_extended_glyphs() {
        assert_eq!(encode_win_ansi("€120"), vec![0x80, b'1', b'2', b'0']);
        assert_eq!(encode_win_ansi("\u{2018}x\u{2019}"), vec![0x91, b'x', 0x92]);
        assert_eq!(
            encode_win_ansi("a\u{2013}b\u{2026}"),
            vec![b'a', 0x96, b'b', 0x85]
        );
    }

    #[test]
    fn test_column_layout_spans_content_width() {
        let (edges, widths) = column_layout(&["Company", "Name", "User", "IP"]);
        assert_eq!(edges[0], MARGIN_LEFT);
        let total: f32 = widths.iter().sum();
        assert!((total - (PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT)).abs() < 0.01);
    }

    #[test]
    fn test_empty_report_renders_single_page() {
        let bytes = render(&report_with_rows(0)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_report_paginates() {
        // Far more rows than fit on one page
        let bytes = render(&report_with_rows(200)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }
}
