//! PDF rendering for report page plans.
//!
//! The layout plan is authoritative; this module only translates positioned
//! elements into printpdf calls. Geometry here is the one place floats are
//! permitted; amounts were already formatted to strings during layout.
#![allow(clippy::float_arithmetic, clippy::cast_precision_loss)]

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use super::error::ReportError;
use super::layout::{MARGIN, PAGE_HEIGHT, PAGE_WIDTH, PagePlan, RuleElement, TextElement};

/// Converts PDF points to millimetres.
fn mm(points: i32) -> Mm {
    Mm(points as f32 * 25.4 / 72.0)
}

/// Grey percentage to an RGB color (0 is black).
fn grey(percent: u8) -> Color {
    let level = f32::from(percent) / 100.0;
    Color::Rgb(Rgb::new(level, level, level, None))
}

/// Renders a planned document to PDF bytes.
///
/// # Errors
///
/// Returns `ReportError::Render` if font embedding or serialization fails.
pub fn render(title: &str, pages: &[PagePlan]) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(e.to_string()))?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..pages.len() {
        let (page, layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for (plan, layer) in pages.iter().zip(layers.iter()) {
        for text in &plan.texts {
            draw_text(layer, text, &font, &bold);
        }
        for rule in &plan.rules {
            draw_rule(layer, *rule);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn draw_text(
    layer: &PdfLayerReference,
    element: &TextElement,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.set_fill_color(grey(element.grey));
    layer.use_text(
        element.text.clone(),
        f32::from(element.size),
        mm(element.x),
        mm(element.y),
        if element.bold { bold } else { font },
    );
}

fn draw_rule(layer: &PdfLayerReference, rule: RuleElement) {
    layer.set_outline_color(grey(80));
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(MARGIN), mm(rule.y)), false),
            (Point::new(mm(PAGE_WIDTH - MARGIN), mm(rule.y)), false),
        ],
        is_closed: false,
    });
}
