pub mod mutation;

use crate::config::Config;
use crate::layout::Layout;
use crate::scorer::Scorer;
use crate::KtResult;
use fastrand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct AnnealOptions {
    pub iterations: usize,
    /// How many of the top trigrams (by frequency) feed the fitness sum.
    pub fitness_depth: usize,
    pub initial_temperature: f32,
    pub cooling_rate: f32,
}

impl Default for AnnealOptions {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            fitness_depth: 100,
            initial_temperature: 250_000.0,
            cooling_rate: 10.0,
        }
    }
}

impl From<&Config> for AnnealOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            iterations: cfg.search.iteration_count,
            fitness_depth: cfg.search.fitness_depth,
            initial_temperature: cfg.anneal.initial_temperature,
            cooling_rate: cfg.anneal.cooling_rate,
        }
    }
}

/// Outcome of one annealing run. The final state is reported alongside
/// the best because the walk may wander away from its best point and
/// never return.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub best_layout: Layout,
    pub best_fitness: f32,
    pub final_layout: Layout,
    pub final_fitness: f32,
}

pub struct Optimizer<'a> {
    scorer: &'a Scorer,
    options: AnnealOptions,
}

impl<'a> Optimizer<'a> {
    pub fn new(scorer: &'a Scorer, options: AnnealOptions) -> Self {
        Self { scorer, options }
    }

    /// Exponential cooling: early iterations tolerate large fitness
    /// regressions, late iterations are strict hill-climbing.
    fn temperature(&self, iteration: usize) -> f32 {
        let progress = iteration as f32 * self.options.cooling_rate / self.options.iterations as f32;
        self.options.initial_temperature * (-progress).exp()
    }

    /// Metropolis criterion for a candidate that is `delta` worse than the
    /// current state.
    fn accept_regression(&self, delta: f32, iteration: usize, rng: &mut Rng) -> bool {
        let t = self.temperature(iteration);
        let p = (-delta / t).exp();
        rng.f32() < p
    }

    /// Anneals `start` against a pre-sorted trigram table. The table is
    /// fixed for the whole run; fitness is never recomputed from the
    /// corpus mid-run.
    pub fn run(
        &self,
        start: &Layout,
        sorted_trigrams: &[(String, u64)],
        rng: &mut Rng,
    ) -> KtResult<OptimizationResult> {
        self.scorer.check_layout(start)?;
        let opts = &self.options;
        let mask = &self.scorer.board.mask;

        let mut current = start.clone();
        let mut fitness = self
            .scorer
            .fitness(&current, sorted_trigrams, opts.fitness_depth)?;
        let mut best_layout = current.clone();
        let mut best_fitness = fitness;

        info!(layout = %start.name, fitness, iterations = opts.iterations, "starting anneal");

        let mut seen: HashSet<String> = HashSet::from([current.fingerprint()]);

        for iteration in 0..opts.iterations {
            let Some(candidate) = mutation::evolve(&current, &mut seen, mask, rng) else {
                debug!(iteration, "mutations exhausted, skipping iteration");
                continue;
            };

            let candidate_fitness =
                self.scorer
                    .fitness(&candidate, sorted_trigrams, opts.fitness_depth)?;
            let delta = candidate_fitness - fitness;

            if delta < 0.0 {
                debug!(iteration, fitness = candidate_fitness, "better, accepting");
                current = candidate;
                fitness = candidate_fitness;
            } else if self.accept_regression(delta, iteration, rng) {
                debug!(iteration, fitness = candidate_fitness, "worse, accepting");
                current = candidate;
                fitness = candidate_fitness;
            } else {
                debug!(iteration, fitness = candidate_fitness, "worse, rejecting");
            }

            if fitness < best_fitness {
                best_fitness = fitness;
                best_layout = current.clone();
            }
        }

        info!(best_fitness, final_fitness = fitness, "anneal finished");

        Ok(OptimizationResult {
            best_layout,
            best_fitness,
            final_layout: current,
            final_fitness: fitness,
        })
    }
}
