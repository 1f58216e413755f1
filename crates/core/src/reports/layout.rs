//! Report page layout planning.
//!
//! Produces a deterministic plan of positioned text and rule elements from a
//! report selection. All geometry is integer PDF points on an A4 page so
//! regenerating the same period yields a visually identical document; the
//! renderer in `pdf` converts to physical units without making decisions.

use super::types::{ReportEntry, ReportTotals};

/// Page width in PDF points (A4).
pub const PAGE_WIDTH: i32 = 595;
/// Page height in PDF points (A4).
pub const PAGE_HEIGHT: i32 = 842;
/// Page margin in PDF points.
pub const MARGIN: i32 = 50;
/// Vertical step between table rows.
pub const ROW_STEP: i32 = 15;
/// A row is placed only while the cursor is at or above this line; below it
/// the table continues on a fresh page.
pub const PAGE_BREAK_Y: i32 = MARGIN + 50;

/// Table column headers.
pub const TABLE_HEADERS: [&str; 6] = [
    "Date",
    "Branch From-To",
    "Sender - Receiver",
    "MTCN",
    "Amount",
    "Status",
];

/// Table column widths in PDF points.
pub const COLUMN_WIDTHS: [i32; 6] = [40, 70, 185, 65, 65, 40];

/// A positioned piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    /// X position in points from the left edge.
    pub x: i32,
    /// Y position in points from the bottom edge.
    pub y: i32,
    /// Font size in points.
    pub size: u8,
    /// Bold (Helvetica-Bold) or regular.
    pub bold: bool,
    /// Grey level as a percentage: 0 is black, 100 is white.
    pub grey: u8,
    /// The text content.
    pub text: String,
}

/// A horizontal separator rule spanning the content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleElement {
    /// Y position in points from the bottom edge.
    pub y: i32,
}

/// All elements placed on one page.
#[derive(Debug, Clone, Default)]
pub struct PagePlan {
    /// Text elements on this page.
    pub texts: Vec<TextElement>,
    /// Separator rules on this page.
    pub rules: Vec<RuleElement>,
}

/// One table row, cells already truncated and formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Cell contents in column order.
    pub cells: [String; 6],
}

/// Truncates a cell to `keep` characters plus ".." when it exceeds `max`.
#[must_use]
pub fn truncate_cell(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() > max {
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str("..");
        truncated
    } else {
        text.to_string()
    }
}

/// First `n` characters of a string.
fn prefix_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// Formats an amount with thousands separators, e.g. `1,234,567.5`.
#[must_use]
pub fn format_amount(amount: rust_decimal::Decimal) -> String {
    let normalized = amount.normalize().to_string();
    let (sign, rest) = normalized
        .strip_prefix('-')
        .map_or(("", normalized.as_str()), |r| ("-", r));
    let (int_part, frac_part) = rest
        .split_once('.')
        .map_or((rest, None), |(i, f)| (i, Some(f)));

    let grouped = group_thousands(int_part);
    frac_part.map_or_else(
        || format!("{sign}{grouped}"),
        |f| format!("{sign}{grouped}.{f}"),
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Builds the table row for one report entry.
#[must_use]
pub fn build_row(entry: &ReportEntry) -> TableRow {
    let from_to = format!(
        "{} - {}",
        prefix_chars(&entry.from_branch, 7),
        prefix_chars(&entry.to_branch, 7)
    );
    let staff = format!("{} - {}", entry.from_staff, entry.to_staff);
    let code = entry.confirmation_code.as_deref().unwrap_or("N/A");

    TableRow {
        cells: [
            entry.transaction_date.format("%d/%m/%Y").to_string(),
            truncate_cell(&from_to, 15, 13),
            truncate_cell(&staff, 38, 36),
            truncate_cell(code, 11, 9),
            format!("{} {}", format_amount(entry.amount), entry.currency),
            prefix_chars(&entry.status, 5).to_uppercase(),
        ],
    }
}

/// Plans the full document: header block, paginated table, footer.
///
/// Pagination is driven purely by the vertical cursor: a row is placed while
/// the cursor is at or above `PAGE_BREAK_Y`, otherwise the table continues at
/// the top of a fresh page. Continuation pages carry rows only; the header
/// block and column headers appear on the first page.
#[must_use]
pub fn plan_document(
    entries: &[ReportEntry],
    branch_name: &str,
    period_description: &str,
    totals: &ReportTotals,
    generated_on: &str,
) -> Vec<PagePlan> {
    let mut pages = Vec::new();
    let mut current = PagePlan::default();
    let mut y = PAGE_HEIGHT - MARGIN;

    current.texts.push(TextElement {
        x: MARGIN,
        y,
        size: 20,
        bold: true,
        grey: 10,
        text: "Monthly Transaction Report".to_string(),
    });
    y -= 30;

    current.texts.push(TextElement {
        x: MARGIN,
        y,
        size: 12,
        bold: false,
        grey: 30,
        text: format!("Branch: {branch_name}"),
    });
    y -= 20;

    current.texts.push(TextElement {
        x: MARGIN,
        y,
        size: 12,
        bold: false,
        grey: 30,
        text: format!("Period: {period_description}"),
    });
    y -= 30;

    current.texts.push(TextElement {
        x: MARGIN,
        y,
        size: 11,
        bold: true,
        grey: 0,
        text: format!("Total Transactions: {}", entries.len()),
    });
    y -= 18;

    for line in totals.summary_lines() {
        current.texts.push(TextElement {
            x: MARGIN,
            y,
            size: 11,
            bold: true,
            grey: 0,
            text: line,
        });
        y -= 18;
    }
    y -= 17;

    current.rules.push(RuleElement { y });
    y -= 20;

    let mut x = MARGIN;
    for (i, header) in TABLE_HEADERS.iter().enumerate() {
        current.texts.push(TextElement {
            x,
            y,
            size: 8,
            bold: true,
            grey: 20,
            text: (*header).to_string(),
        });
        x += COLUMN_WIDTHS[i];
    }
    y -= 18;

    for entry in entries {
        if y < PAGE_BREAK_Y {
            pages.push(std::mem::take(&mut current));
            y = PAGE_HEIGHT - MARGIN;
        }

        let row = build_row(entry);
        let mut x = MARGIN;
        for (i, cell) in row.cells.iter().enumerate() {
            current.texts.push(TextElement {
                x,
                y,
                size: 6,
                bold: false,
                grey: 30,
                text: cell.clone(),
            });
            x += COLUMN_WIDTHS[i];
        }
        y -= ROW_STEP;
    }

    y -= 10;
    current.rules.push(RuleElement { y });
    y -= 20;

    current.texts.push(TextElement {
        x: MARGIN,
        y,
        size: 8,
        bold: false,
        grey: 50,
        text: format!("Generated on: {generated_on}"),
    });

    pages.push(current);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(from_branch: &str, to_branch: &str) -> ReportEntry {
        ReportEntry {
            transaction_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            from_branch: from_branch.to_string(),
            to_branch: to_branch.to_string(),
            from_staff: "Ahmad Rahimi".to_string(),
            to_staff: "Sara Ahmadi".to_string(),
            confirmation_code: Some("MG12345678901".to_string()),
            amount: dec!(12500),
            currency: "AFN".to_string(),
            status: "confirmed".to_string(),
        }
    }

    #[test]
    fn test_truncate_cell_over_limit() {
        // 20 characters renders as the first 13 plus "..".
        let text = "a".repeat(20);
        assert_eq!(truncate_cell(&text, 15, 13), format!("{}..", "a".repeat(13)));
    }

    #[test]
    fn test_truncate_cell_at_limit_unchanged() {
        let text = "b".repeat(15);
        assert_eq!(truncate_cell(&text, 15, 13), text);
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(300)), "300");
        assert_eq!(format_amount(dec!(12500)), "12,500");
        assert_eq!(format_amount(dec!(1234567)), "1,234,567");
        assert_eq!(format_amount(dec!(1234567.5)), "1,234,567.5");
        assert_eq!(format_amount(dec!(-4200)), "-4,200");
    }

    #[test]
    fn test_build_row_cells() {
        let row = build_row(&entry("Kabul Central", "Herat"));

        assert_eq!(row.cells[0], "15/03/2025");
        // Branch names are each cut to 7 characters before pairing; the
        // 15-character pair is exactly at the truncation limit.
        assert_eq!(row.cells[1], "Kabul C - Herat");
        assert_eq!(row.cells[2], "Ahmad Rahimi - Sara Ahmadi");
        assert_eq!(row.cells[3], "MG1234567..");
        assert_eq!(row.cells[4], "12,500 AFN");
        assert_eq!(row.cells[5], "CONFI");
    }

    #[test]
    fn test_build_row_truncates_long_branch_pair() {
        let row = build_row(&entry("Kabul Central", "Mazar-i-Sharif"));

        // "Kabul C - Mazar-i" is 17 characters, over the 15 limit.
        assert_eq!(row.cells[1], "Kabul C - Maz..");
    }

    #[test]
    fn test_build_row_missing_code() {
        let mut e = entry("Kabul", "Herat");
        e.confirmation_code = None;
        assert_eq!(build_row(&e).cells[3], "N/A");
    }

    fn row_count(page: &PagePlan) -> usize {
        page.texts.iter().filter(|t| t.size == 6).count() / 6
    }

    #[test]
    fn test_single_page_holds_35_rows_single_currency() {
        let entries: Vec<_> = (0..35).map(|_| entry("Kabul", "Herat")).collect();
        let totals = ReportTotals::from_entries(&entries);
        let pages = plan_document(&entries, "All Branches", "March 2025", &totals, "x");

        assert_eq!(pages.len(), 1);
        assert_eq!(row_count(&pages[0]), 35);
    }

    #[test]
    fn test_thirty_sixth_row_starts_second_page() {
        let entries: Vec<_> = (0..36).map(|_| entry("Kabul", "Herat")).collect();
        let totals = ReportTotals::from_entries(&entries);
        let pages = plan_document(&entries, "All Branches", "March 2025", &totals, "x");

        assert_eq!(pages.len(), 2);
        assert_eq!(row_count(&pages[0]), 35);
        assert_eq!(row_count(&pages[1]), 1);
    }

    #[test]
    fn test_continuation_page_holds_47_rows() {
        let entries: Vec<_> = (0..35 + 48).map(|_| entry("Kabul", "Herat")).collect();
        let totals = ReportTotals::from_entries(&entries);
        let pages = plan_document(&entries, "All Branches", "March 2025", &totals, "x");

        assert_eq!(pages.len(), 3);
        assert_eq!(row_count(&pages[1]), 47);
        assert_eq!(row_count(&pages[2]), 1);
    }

    #[test]
    fn test_footer_lands_on_last_page() {
        let entries: Vec<_> = (0..36).map(|_| entry("Kabul", "Herat")).collect();
        let totals = ReportTotals::from_entries(&entries);
        let pages = plan_document(&entries, "All Branches", "March 2025", &totals, "now");

        let last = pages.last().unwrap();
        assert!(
            last.texts
                .iter()
                .any(|t| t.text.starts_with("Generated on: now"))
        );
        assert!(
            !pages[0]
                .texts
                .iter()
                .any(|t| t.text.starts_with("Generated on:"))
        );
    }

    #[test]
    fn test_header_block_only_on_first_page() {
        // 90 entries: 35 + 47 + 8, so the middle page carries rows only.
        let entries: Vec<_> = (0..90).map(|_| entry("Kabul", "Herat")).collect();
        let totals = ReportTotals::from_entries(&entries);
        let pages = plan_document(&entries, "Herat", "March 2025", &totals, "x");

        assert_eq!(pages.len(), 3);
        assert!(pages[0].texts.iter().any(|t| t.text == "Branch: Herat"));
        assert!(pages[1].texts.iter().all(|t| t.size == 6));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Truncated cells never exceed keep + 2 characters, and strings within
    // the limit pass through unchanged.
    proptest! {
        #[test]
        fn prop_truncate_cell_bounds(text in ".{0,60}") {
            let out = truncate_cell(&text, 15, 13);
            let in_len = text.chars().count();

            if in_len > 15 {
                prop_assert_eq!(out.chars().count(), 15);
                prop_assert!(out.ends_with(".."));
            } else {
                prop_assert_eq!(out, text);
            }
        }
    }

    // Grouped amounts strip back to the original digits.
    proptest! {
        #[test]
        fn prop_format_amount_preserves_digits(n in 0i64..10_000_000_000) {
            let amount = rust_decimal::Decimal::from(n);
            let formatted = format_amount(amount);
            let stripped: String = formatted.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
