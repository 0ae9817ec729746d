use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::error;

use kluster::data::load_csv;
use kluster::{fit_with, random, InitRule, KMeansConfig, Lcg, StopRule};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Init {
    Random,
    Forgy,
    PlusPlus,
}

impl From<Init> for InitRule {
    fn from(init: Init) -> Self {
        match init {
            Init::Random => InitRule::RandomPartition,
            Init::Forgy => InitRule::Forgy,
            Init::PlusPlus => InitRule::KMeansPlusPlus,
        }
    }
}

/// Cluster the rows of a numeric CSV file with k-means.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file with one observation per row
    file: PathBuf,

    /// Number of groups
    #[arg(short)]
    k: usize,

    /// Initialization rule
    #[arg(long, value_enum, default_value_t = Init::Random)]
    init: Init,

    /// Stop after this many iterations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Stop once the relative change of the mean distance drops below this
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// Stop once this many seconds have elapsed
    #[arg(long, value_parser = parse_seconds)]
    time_limit: Option<Duration>,

    /// Seed for the reproducible generator; system entropy is used otherwise
    #[arg(long)]
    seed: Option<u32>,

    /// The file has no header row
    #[arg(long)]
    no_headers: bool,

    /// Report progress of every iteration
    #[arg(short, long)]
    verbose: bool,
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value.parse().map_err(|e| format!("{}", e))?;
    if !threshold.is_finite() {
        return Err(format!("threshold must be a finite number, got {}", value));
    }
    Ok(threshold)
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("time limit must be a non-negative number of seconds, got {}", value))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cluster(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cluster(args: &Args) -> kluster::Result<()> {
    let data = load_csv(&args.file, !args.no_headers)?;

    let mut rules = Vec::new();
    if let Some(cap) = args.max_iterations {
        rules.push(StopRule::MaxIterations(cap));
    }
    if let Some(threshold) = args.threshold {
        rules.push(StopRule::RelativeChange(threshold));
    }
    if let Some(limit) = args.time_limit {
        rules.push(StopRule::TimeLimit(limit));
    }

    let config = KMeansConfig::new(data.view(), args.k)?
        .with_init(args.init.into())
        .with_stop_rules(rules)
        .with_diagnostics(args.verbose);

    let result = match args.seed {
        Some(seed) => fit_with(&config, &mut Lcg::new(seed)),
        None => fit_with(&config, &mut random::entropy()),
    };

    for group in &result.assignment {
        println!("{}", group);
    }
    for centroid in result.centroids.rows() {
        let fields: Vec<String> = centroid.iter().map(|v| v.to_string()).collect();
        println!("{}", fields.join(","));
    }
    Ok(())
}
