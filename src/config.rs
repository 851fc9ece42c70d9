use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub anneal: AnnealParams,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Annealing iterations per run.
    #[arg(long, default_value_t = 10_000)]
    pub iteration_count: usize,

    /// Top-K trigrams feeding the optimizer's fitness sum.
    #[arg(long, default_value_t = 100)]
    pub fitness_depth: usize,

    /// Top-K n-grams shown in reports.
    #[arg(long, default_value_t = 50)]
    pub report_depth: usize,

    /// Evolve steps used to scramble a random starting layout.
    #[arg(long, default_value_t = 1000)]
    pub scramble_steps: usize,
}

#[derive(Args, Debug, Clone)]
pub struct AnnealParams {
    #[arg(long, default_value_t = 250_000.0)]
    pub initial_temperature: f32,

    #[arg(long, default_value_t = 10.0)]
    pub cooling_rate: f32,
}
