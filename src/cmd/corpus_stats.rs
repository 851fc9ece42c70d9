use crate::reports;
use clap::Args;
use keytemper::corpus::{ngram_frequencies, sort_ngrams};

#[derive(Args, Debug, Clone)]
pub struct CorpusStatsArgs {
    /// Top-K unigrams to list.
    #[arg(long, default_value_t = 100)]
    pub unigram_depth: usize,

    /// Top-K bigrams and trigrams to list.
    #[arg(long, default_value_t = 50)]
    pub ngram_depth: usize,
}

pub fn run(args: &CorpusStatsArgs, corpus: &str) {
    println!(
        "Corpus length: {} bytes",
        reports::format_number(corpus.len() as f64, 0)
    );

    let (unigrams, unigram_count) = ngram_frequencies(corpus, 1);
    let (bigrams, bigram_count) = ngram_frequencies(corpus, 2);
    let (trigrams, trigram_count) = ngram_frequencies(corpus, 3);

    let sorted_unigrams = sort_ngrams(&unigrams);
    let sorted_bigrams = sort_ngrams(&bigrams);
    let sorted_trigrams = sort_ngrams(&trigrams);

    reports::print_ngram_table("Unigrams", &sorted_unigrams, args.unigram_depth, unigram_count);
    reports::print_ngram_table("Bigrams", &sorted_bigrams, args.ngram_depth, bigram_count);
    reports::print_ngram_table("Trigrams", &sorted_trigrams, args.ngram_depth, trigram_count);

    let overview: String = sorted_unigrams
        .iter()
        .filter_map(|(ngram, _)| ngram.chars().next())
        .map(reports::display_char)
        .collect();
    reports::print_heading("Unigrams frequency overview:");
    println!("{overview}");
}
