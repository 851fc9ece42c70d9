use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use keytemper::geometry::Keyboard;
use keytemper::layout::Layout;

/// Formats with thousands separators and a fixed number of decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$}");
    let (integer, decimal) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut delimited = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            delimited.push(',');
        }
        delimited.push(ch);
    }

    match decimal {
        Some(d) => format!("{sign}{delimited}.{d}"),
        None => format!("{sign}{delimited}"),
    }
}

pub fn percentage(dividend: u64, divisor: u64) -> String {
    if divisor == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", dividend as f64 / divisor as f64 * 100.0)
}

/// Whitespace would render invisibly in the tables, so substitute glyphs.
pub fn display_char(ch: char) -> char {
    match ch {
        ' ' => '\u{2423}',
        '\n' => '\u{21a9}',
        '\t' => '\u{21e5}',
        other => other,
    }
}

pub fn display_ngram(ngram: &str) -> String {
    ngram.chars().map(display_char).collect()
}

pub fn print_heading(text: &str) {
    println!("\n{text}");
    println!("{}", "-".repeat(text.chars().count()));
}

/// Simple proportional bar chart, one row per label.
pub fn print_histogram(rows: &[(String, u64)], total: u64) {
    const BAR_WIDTH: f64 = 60.0;
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = rows
        .iter()
        .map(|(_, count)| format_number(*count as f64, 0).len())
        .max()
        .unwrap_or(0);

    for (label, count) in rows {
        let filled = if total > 0 {
            (*count as f64 / total as f64 * BAR_WIDTH).floor() as usize
        } else {
            0
        };
        let rest = BAR_WIDTH as usize - filled;
        println!(
            "{label:>label_width$}: {count:>count_width$} ({pct:>7}) |{bar}o{pad}|",
            count = format_number(*count as f64, 0),
            pct = percentage(*count, total),
            bar = "-".repeat(filled),
            pad = " ".repeat(rest),
        );
    }
}

pub fn print_ngram_table(label: &str, sorted: &[(String, u64)], top: usize, total: u64) {
    let top = top.min(sorted.len());
    print_heading(&format!(
        "{label} by frequency (top {top} of {}):",
        format_number(sorted.len() as f64, 0)
    ));

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["n-gram", "count", "share"]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (ngram, count) in sorted.iter().take(top) {
        table.add_row(vec![
            Cell::new(display_ngram(ngram)),
            Cell::new(format_number(*count as f64, 0)),
            Cell::new(percentage(*count, total)),
        ]);
    }
    println!("{table}");
}

/// Prints a layout's slot labels as a grid, one table row per physical
/// keyboard row.
pub fn print_layout(layout: &Layout, board: &Keyboard) {
    println!("\nLayout: {}", layout.name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut current_row = None;
    let mut cells: Vec<Cell> = Vec::new();
    for (slot, key) in layout.slots.iter().zip(board.keys.iter()) {
        if current_row != Some(key.row) {
            if !cells.is_empty() {
                table.add_row(std::mem::take(&mut cells));
            }
            current_row = Some(key.row);
        }
        let label = slot.display_label();
        // F-keys keep three characters; everything else truncates to one.
        let short: String = if label.starts_with('F') && label.len() <= 3 {
            label
        } else {
            label.chars().take(1).collect()
        };
        cells.push(Cell::new(short).set_alignment(CellAlignment::Center));
    }
    if !cells.is_empty() {
        table.add_row(cells);
    }
    println!("{table}");
}
