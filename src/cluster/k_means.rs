use std::time::{Duration, Instant};

use log::Level;
use ndarray::{Array2, ArrayView2};

use crate::cluster::distance::{centroids, nearest};
use crate::cluster::init::InitRule;
use crate::cluster::rebalance::rebalance;
use crate::cluster::stopping::{Progress, StopPolicy, StopRule};
use crate::data::check_finite;
use crate::error::{Error, Result};
use crate::random::{self, RandomSource};

/// Configuration options for k-means clustering.
///
/// The observation matrix is borrowed, so one configuration can drive any
/// number of independent runs, each with its own random source.
#[derive(Debug, Clone)]
pub struct KMeansConfig<'a> {
    data: ArrayView2<'a, f64>,
    k: usize,
    init: InitRule,
    stop: StopPolicy,
    diagnostics: bool,
}

impl<'a> KMeansConfig<'a> {
    /// Create a new config with random-partition initialization and the
    /// default relative-change stop rule (0.01).
    ///
    /// Fails if the matrix has no rows or no columns, holds a NaN or infinite
    /// value, or if `k` is 0.
    pub fn new(data: ArrayView2<'a, f64>, k: usize) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::EmptyData);
        }
        check_finite(data)?;
        if k == 0 {
            return Err(Error::InvalidClusterCount { k });
        }
        Ok(Self {
            data,
            k,
            init: InitRule::default(),
            stop: StopPolicy::default(),
            diagnostics: false,
        })
    }

    /// Customize the initialization rule.
    pub fn with_init(mut self, init: InitRule) -> Self {
        self.init = init;
        self
    }

    /// Replace the stop rules. Duplicates are dropped and an empty set falls
    /// back to the default rule.
    pub fn with_stop_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = StopRule>,
    {
        self.stop = StopPolicy::new(rules);
        self
    }

    /// Replace the stop rules with a single rule.
    pub fn with_stop_rule(self, rule: StopRule) -> Self {
        self.with_stop_rules([rule])
    }

    /// Log per-iteration progress at `info` instead of `debug` level.
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn data(&self) -> ArrayView2<'a, f64> {
        self.data
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn init(&self) -> InitRule {
        self.init
    }

    pub fn stop_rules(&self) -> &[StopRule] {
        self.stop.rules()
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    fn log_level(&self) -> Level {
        if self.diagnostics {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Group id of every observation, each in `[0, k)`.
    pub assignment: Vec<usize>,
    /// One mean vector per non-empty group, in ascending group order.
    pub centroids: Array2<f64>,
    /// Number of completed iterations.
    pub iterations: usize,
    /// Mean squared distance of the observations to their nearest centroid in
    /// the last iteration.
    pub mean_distance: f64,
    /// Rule that ended the run.
    pub stopped_by: StopRule,
    /// Wall-clock time from initialization to the final centroids.
    pub elapsed: Duration,
}

impl Clustering {
    /// Splits into the assignment and the centroid matrix.
    pub fn into_parts(self) -> (Vec<usize>, Array2<f64>) {
        (self.assignment, self.centroids)
    }
}

/// Runs k-means with a random source seeded from system entropy, returning
/// the assignment of every observation and the centroid matrix.
///
/// # Example
///
/// ```
/// use kluster::cluster::{run, KMeansConfig};
/// use ndarray::arr2;
///
/// let data = arr2(&[
///     [1.0, 2.0],
///     [1.5, 1.8],
///     [5.0, 8.0],
///     [8.0, 8.0],
/// ]);
///
/// let config = KMeansConfig::new(data.view(), 2).unwrap();
/// let (assignment, centroids) = run(&config);
///
/// assert_eq!(assignment.len(), 4);
/// assert_eq!(centroids.nrows(), 2);
/// ```
pub fn run(config: &KMeansConfig) -> (Vec<usize>, Array2<f64>) {
    let mut rng = random::entropy();
    run_with(config, &mut rng)
}

/// Runs k-means with the given random source. Identical configurations and
/// identically seeded sources give identical results.
pub fn run_with(
    config: &KMeansConfig,
    rng: &mut dyn RandomSource,
) -> (Vec<usize>, Array2<f64>) {
    fit_with(config, rng).into_parts()
}

/// Runs k-means with the given random source and reports how the run ended.
pub fn fit_with(config: &KMeansConfig, rng: &mut dyn RandomSource) -> Clustering {
    let data = config.data;
    let k = config.k;
    let n = data.nrows();
    let level = config.log_level();

    let start = Instant::now();
    let mut assignment = config.init.assign(data, k, rng);
    log::log!(
        level,
        "initialized {} observations into {} groups with {:?}",
        n,
        k,
        config.init
    );

    let mut previous = f64::MAX;
    let mut iterations = 0;
    let (mean_distance, stopped_by) = loop {
        let means = centroids(data, &assignment, k);
        let (nearest_groups, distances) = nearest(data, means.view());
        assignment = nearest_groups;

        let current = distances.iter().sum::<f64>() / n as f64;
        let change = relative_change(previous, current);
        previous = current;

        rebalance(&mut assignment, k);
        iterations += 1;

        let elapsed = start.elapsed();
        log::log!(
            level,
            "iteration {}: mean distance {:.6}, change {:.4}%, {:.3}s",
            iterations,
            current,
            change * 100.0,
            elapsed.as_secs_f64()
        );

        let progress = Progress {
            iterations,
            relative_change: change,
            elapsed,
        };
        if let Some(rule) = config.stop.check(&progress) {
            break (current, rule);
        }
    };

    let centroids = centroids(data, &assignment, k);
    let elapsed = start.elapsed();
    log::log!(level, "stopped: {}", stopped_by);
    log::log!(level, "total time {:.3}s", elapsed.as_secs_f64());

    Clustering {
        assignment,
        centroids,
        iterations,
        mean_distance,
        stopped_by,
        elapsed,
    }
}

/// Fractional improvement from `previous` to `current`. A perfect clustering
/// (`current == 0`) counts as no change.
fn relative_change(previous: f64, current: f64) -> f64 {
    if current == 0.0 {
        0.0
    } else {
        (previous - current) / current
    }
}
