use std::collections::HashMap;

/// An n-gram window is counted only when it contains no whitespace and
/// every character falls in the ASCII range. The upper bound is 0x7F
/// inclusive, so DEL is admitted; plain-text corpora never contain it.
fn is_valid_ngram(ngram: &[char]) -> bool {
    ngram.iter().all(|&c| {
        !matches!(c, ' ' | '\t' | '\n') && ('\u{20}'..='\u{7f}').contains(&c)
    })
}

/// Slides a window of width `n` across `corpus` and tallies every valid
/// window. Invalid windows are skipped entirely: they are neither counted
/// nor zero-scored. Returns the table plus the total valid-window count.
pub fn ngram_frequencies(corpus: &str, n: usize) -> (HashMap<String, u64>, u64) {
    let mut ngrams: HashMap<String, u64> = HashMap::new();
    let mut total = 0u64;

    if n == 0 {
        return (ngrams, total);
    }

    let chars: Vec<char> = corpus.chars().collect();
    if chars.len() < n {
        return (ngrams, total);
    }

    for window in chars.windows(n) {
        if is_valid_ngram(window) {
            let ngram: String = window.iter().collect();
            *ngrams.entry(ngram).or_default() += 1;
            total += 1;
        }
    }

    (ngrams, total)
}

/// Orders a frequency table by count descending, breaking ties by
/// lexicographically ascending n-gram. Downstream top-K slicing depends on
/// this order being a deterministic total order.
pub fn sort_ngrams(ngrams: &HashMap<String, u64>) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = ngrams
        .iter()
        .map(|(k, &v)| (k.clone(), v))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
