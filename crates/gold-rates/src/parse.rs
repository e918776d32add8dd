//! Price extraction from the rates page HTML.
//!
//! The page lists one table per purity. A table belongs to a purity when its
//! text mentions both the purity marker (`"22 Carat"`) and the `"1 Gram"`
//! row label. The price is the second cell of the first `1 Gram` row.

use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ParseError;
use crate::types::{GoldRates, Purity};

/// Row label that identifies the single-gram price row.
pub const GRAM_MARKER: &str = "1 Gram";

/// Parses the page and returns both unit prices.
///
/// Later matching tables overwrite earlier ones. Fails with
/// [`ParseError::MissingPrice`] unless both prices are positive.
pub fn parse_rates(html: &str) -> Result<GoldRates, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| ParseError::Html(e.to_string()))?;

    let mut tables = Vec::new();
    collect_elements(&dom.document, "table", &mut tables);

    let mut k22 = 0.0;
    let mut k24 = 0.0;
    for table in &tables {
        let text = text_content(table);
        if !text.contains(GRAM_MARKER) {
            continue;
        }
        if text.contains(Purity::K22.table_marker()) {
            k22 = extract_price_from_table(table);
        }
        if text.contains(Purity::K24.table_marker()) {
            k24 = extract_price_from_table(table);
        }
    }

    if is_resolved(k22) && is_resolved(k24) {
        Ok(GoldRates::new(k22, k24))
    } else {
        Err(ParseError::MissingPrice { k22, k24 })
    }
}

/// Converts a price cell such as `"₹8,120"` to a number.
///
/// Strips the rupee sign and thousands separators, then reads the leading
/// decimal number. Returns `None` when no number is present.
///
/// ```
/// assert_eq!(gold_rates::parse_price_text("₹8,120"), Some(8120.0));
/// assert_eq!(gold_rates::parse_price_text(" ₹ 7,350.50 (+10)"), Some(7350.5));
/// assert_eq!(gold_rates::parse_price_text("n/a"), None);
/// ```
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '₹' | ',')).collect();
    leading_number(cleaned.trim())
}

/// Reads the longest numeric prefix, the way a lenient float parser would.
///
/// A leading sign and one decimal point are accepted; a trailing dot is
/// dropped. Returns `None` when the prefix holds no digit.
///
/// ```
/// assert_eq!(gold_rates::leading_number("27.5px"), Some(27.5));
/// assert_eq!(gold_rates::leading_number("-3.px"), Some(-3.0));
/// assert_eq!(gold_rates::leading_number("px"), None);
/// ```
pub fn leading_number(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            '-' | '+' if i == 0 => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

fn is_resolved(price: f64) -> bool {
    price.is_finite() && price != 0.0
}

/// Price in the second `td` of the first qualifying `1 Gram` row, or 0.
fn extract_price_from_table(table: &Handle) -> f64 {
    let mut rows = Vec::new();
    collect_elements(table, "tr", &mut rows);
    for row in &rows {
        if !text_content(row).contains(GRAM_MARKER) {
            continue;
        }
        let mut cells = Vec::new();
        collect_elements(row, "td", &mut cells);
        if let Some(cell) = cells.get(1) {
            return parse_price_text(&text_content(cell)).unwrap_or(0.0);
        }
    }
    0.0
}

/// Collects descendant elements with the given tag name, in document order.
fn collect_elements(handle: &Handle, tag: &str, out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                out.push(child.clone());
            }
        }
        collect_elements(child, tag, out);
    }
}

/// Concatenated text of all descendant text nodes.
fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    append_text(handle, &mut text);
    text
}

fn append_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        append_text(child, out);
    }
}
