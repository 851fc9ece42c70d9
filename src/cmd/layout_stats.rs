use crate::reports;
use clap::Args;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use keytemper::corpus::{ngram_frequencies, sort_ngrams};
use keytemper::geometry::{FINGER_COUNT, FINGER_NAMES, ROW_NAMES};
use keytemper::layout::Layout;
use keytemper::scorer::{Scorer, FACTORS};
use keytemper::{KeytemperError, KtResult};

#[derive(Args, Debug, Clone)]
pub struct LayoutStatsArgs {
    /// Layout to report on (qwerty, colemak).
    #[arg(default_value = "qwerty")]
    pub layout: String,

    /// Top-K trigrams in the effort table.
    #[arg(long, default_value_t = 50)]
    pub report_depth: usize,
}

pub fn run(args: &LayoutStatsArgs, layout: &Layout, scorer: &Scorer, corpus: &str) -> KtResult<()> {
    scorer.check_layout(layout)?;
    reports::print_heading(&format!("{} layout stats:", layout.name));
    reports::print_layout(layout, &scorer.board);

    let lookup = layout.lookup()?;
    let board = &scorer.board;

    let (unigrams, _) = ngram_frequencies(corpus, 1);
    let mut finger_counts = [0u64; FINGER_COUNT];
    let mut row_counts = [0u64; 6];
    let mut total = 0u64;

    for (unigram, count) in &unigrams {
        // Single valid char by construction.
        let ch = unigram.chars().next().expect("unigram is non-empty");
        let press = lookup.get(&ch).ok_or(KeytemperError::Lookup {
            ch,
            layout: layout.name.clone(),
        })?;
        finger_counts[board.fingers[press.index] as usize] += count;
        row_counts[board.keys[press.index].row as usize] += count;
        total += count;
    }

    reports::print_heading("Finger utilization:");
    let mut finger_rows: Vec<(String, u64)> = finger_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(finger, &count)| (FINGER_NAMES[finger].to_string(), count))
        .collect();
    finger_rows.sort_by(|a, b| b.1.cmp(&a.1));
    reports::print_histogram(&finger_rows, total);

    reports::print_heading("Hand utilization:");
    let left: u64 = finger_counts[..4].iter().sum();
    let right: u64 = finger_counts[6..].iter().sum();
    reports::print_histogram(
        &[("Left".to_string(), left), ("Right".to_string(), right)],
        total,
    );

    reports::print_heading("Row usage:");
    let row_rows: Vec<(String, u64)> = row_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(row, &count)| (format!("Row {row} ({})", ROW_NAMES[row]), count))
        .collect();
    reports::print_histogram(&row_rows, total);

    reports::print_heading("Effort (per trigram):");
    let (trigrams, _) = ngram_frequencies(corpus, 3);
    let sorted_trigrams = sort_ngrams(&trigrams);
    let depth = args.report_depth.min(sorted_trigrams.len());

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["trigram", "count", "share", "score", "total"]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let mut total_effort = 0.0f32;
    for (trigram, count) in sorted_trigrams.iter().take(depth) {
        let score = scorer.score_trigram_with(trigram, layout, &lookup)?;
        let effort = score * *count as f32;
        total_effort += effort;
        table.add_row(vec![
            Cell::new(reports::display_ngram(trigram)),
            Cell::new(reports::format_number(*count as f64, 0)),
            Cell::new(reports::percentage(*count, total)),
            Cell::new(reports::format_number(score as f64, 4)),
            Cell::new(reports::format_number(effort as f64, 0)),
        ]);
    }
    println!("{table}");
    println!(
        "Total effort: {}",
        reports::format_number(total_effort as f64, 0)
    );

    // Mean multiplier per factor, weighted by trigram frequency.
    reports::print_heading("Factor summary:");
    let mut factor_totals = [0.0f32; FACTORS.len()];
    let mut weight = 0u64;
    for (trigram, count) in sorted_trigrams.iter().take(depth) {
        let values = scorer.factor_values(trigram, layout, &lookup)?;
        for (sum, value) in factor_totals.iter_mut().zip(values.iter()) {
            *sum += value * *count as f32;
        }
        weight += count;
    }
    if weight > 0 {
        for ((name, _), sum) in FACTORS.iter().zip(factor_totals.iter()) {
            println!(
                "{name}: {}",
                reports::format_number((sum / weight as f32) as f64, 4)
            );
        }
    }

    Ok(())
}
