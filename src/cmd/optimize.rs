use crate::reports;
use clap::Args;
use keytemper::config::Config;
use keytemper::corpus::{ngram_frequencies, sort_ngrams};
use keytemper::layout::{KnownLayout, Layout};
use keytemper::optimizer::{mutation, AnnealOptions, Optimizer};
use keytemper::scorer::Scorer;
use keytemper::KtResult;
use serde::Serialize;
use std::fs;
use std::str::FromStr;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Starting layout (qwerty, colemak). Omit to anneal from a
    /// randomized scramble of qwerty.
    pub layout: Option<String>,

    #[command(flatten)]
    pub config: Config,

    /// Seed for reproducible runs; omit for entropy.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write the best layout as JSON.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Serialize)]
struct SavedResult<'a> {
    layout: &'a Layout,
    fitness: f32,
}

pub fn resolve_start(
    args: &OptimizeArgs,
    scorer: &Scorer,
    rng: &mut fastrand::Rng,
) -> KtResult<Layout> {
    match &args.layout {
        Some(name) => {
            let known = KnownLayout::from_str(name).map_err(|_| {
                keytemper::KeytemperError::Validation(format!("unknown layout: {name}"))
            })?;
            Ok(known.layout())
        }
        None => {
            println!("Creating random layout...");
            let start = KnownLayout::Qwerty.layout();
            scorer.check_layout(&start)?;
            Ok(mutation::random_layout(
                &start,
                &scorer.board.mask,
                args.config.search.scramble_steps,
                rng,
            ))
        }
    }
}

pub fn run(args: &OptimizeArgs, scorer: &Scorer, corpus: &str) -> KtResult<()> {
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let (trigrams, _) = ngram_frequencies(corpus, 3);
    let sorted_trigrams = sort_ngrams(&trigrams);

    let start = resolve_start(args, scorer, &mut rng)?;
    let options = AnnealOptions::from(&args.config);
    let starting_fitness =
        scorer.fitness(&start, &sorted_trigrams, options.fitness_depth)?;

    println!("Optimizing {}:", start.name);
    println!(
        "Starting fitness: {}",
        reports::format_number(starting_fitness as f64, 2)
    );

    let begun = Instant::now();
    let optimizer = Optimizer::new(scorer, options);
    let result = optimizer.run(&start, &sorted_trigrams, &mut rng)?;
    let elapsed = begun.elapsed();

    println!("\nFinal layout:");
    reports::print_layout(&result.best_layout, &scorer.board);
    println!(
        "Final fitness: {}",
        reports::format_number(result.best_fitness as f64, 2)
    );
    println!(
        "(last accepted state: {})",
        reports::format_number(result.final_fitness as f64, 2)
    );
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = &args.out {
        let saved = SavedResult {
            layout: &result.best_layout,
            fitness: result.best_fitness,
        };
        fs::write(path, serde_json::to_string_pretty(&saved)?)?;
        println!("Wrote best layout to {path}");
    }

    Ok(())
}
