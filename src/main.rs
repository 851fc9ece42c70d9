use clap::{Parser, Subcommand};
use keytemper::geometry::Keyboard;
use keytemper::layout::KnownLayout;
use keytemper::scorer::Scorer;
use std::fs;
use std::process;
use std::str::FromStr;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Corpus text file; trimmed and lowercased before analysis.
    #[arg(global = true, short, long, default_value = "data/corpus.txt")]
    corpus: String,

    /// Custom keyboard JSON; defaults to the standard 78-key board.
    #[arg(global = true, short, long)]
    keyboard: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// N-gram frequency reports for the corpus.
    CorpusStats(cmd::corpus_stats::CorpusStatsArgs),
    /// Utilization and effort reports for a layout.
    LayoutStats(cmd::layout_stats::LayoutStatsArgs),
    /// Anneal toward a lower-effort layout.
    Optimize(cmd::optimize::OptimizeArgs),
}

fn load_corpus(path: &str) -> std::io::Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_lowercase())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let board = match &cli.keyboard {
        Some(path) => Keyboard::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load keyboard '{path}': {e}");
            process::exit(1);
        }),
        None => Keyboard::standard(),
    };

    let scorer = Scorer::new(board).unwrap_or_else(|e| {
        eprintln!("Failed to initialize scorer: {e}");
        process::exit(1);
    });

    let corpus = load_corpus(&cli.corpus).unwrap_or_else(|e| {
        eprintln!("Failed to read corpus '{}': {e}", cli.corpus);
        process::exit(1);
    });

    let outcome = match &cli.command {
        Commands::CorpusStats(args) => {
            cmd::corpus_stats::run(args, &corpus);
            Ok(())
        }
        Commands::LayoutStats(args) => match KnownLayout::from_str(&args.layout) {
            Ok(known) => cmd::layout_stats::run(args, &known.layout(), &scorer, &corpus),
            Err(_) => {
                eprintln!("Unknown layout: {}", args.layout);
                process::exit(1);
            }
        },
        Commands::Optimize(args) => cmd::optimize::run(args, &scorer, &corpus),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
