use ndarray::{Array2, ArrayView2, Axis};

use crate::cluster::distance::{nearest, squared_distance};
use crate::random::RandomSource;

/// How the first assignment is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitRule {
    /// Round-robin groups of near-equal size, shuffled.
    #[default]
    RandomPartition,
    /// `k` distinct observations become the initial centroids.
    Forgy,
    /// Weighted farthest-point sampling (k-means++).
    KMeansPlusPlus,
}

impl InitRule {
    /// Produces an assignment with every id in `[0, k)`. Groups may be empty.
    pub fn assign(
        &self,
        data: ArrayView2<f64>,
        k: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<usize> {
        match self {
            InitRule::RandomPartition => random_partition(data.nrows(), k, rng),
            InitRule::Forgy => {
                let seeds = forgy_indices(data.nrows(), k, rng);
                nearest(data, seed_rows(data, &seeds).view()).0
            }
            InitRule::KMeansPlusPlus => {
                let seeds = plus_plus_indices(data, k, rng);
                nearest(data, seed_rows(data, &seeds).view()).0
            }
        }
    }
}

/// Observation `i` goes to group `i mod k`, then the assignment is shuffled.
pub fn random_partition(n: usize, k: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    let mut assignment: Vec<usize> = (0..n).map(|i| i % k).collect();
    rng.shuffle(&mut assignment);
    assignment
}

/// `min(k, n)` distinct row indices drawn uniformly without replacement.
pub fn forgy_indices(n: usize, k: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    let take = k.min(n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..take {
        let j = i + rng.next_index(n - i);
        indices.swap(i, j);
    }
    indices.truncate(take);
    indices
}

/// Exactly `k` row indices chosen by k-means++ seeding.
///
/// Each observation is weighted by its squared distance to the nearest seed
/// already chosen, so a chosen row (or an exact duplicate of one) has weight
/// zero and is only picked again when every remaining weight is zero.
pub fn plus_plus_indices(
    data: ArrayView2<f64>,
    k: usize,
    rng: &mut dyn RandomSource,
) -> Vec<usize> {
    let n = data.nrows();
    let mut seeds = Vec::with_capacity(k);
    seeds.push(rng.next_index(n));

    let mut weights: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|row| squared_distance(row, data.row(seeds[0])))
        .collect();

    while seeds.len() < k {
        let next = rng.weighted_choice(&weights);
        seeds.push(next);
        for (weight, row) in weights.iter_mut().zip(data.rows()) {
            let d = squared_distance(row, data.row(next));
            if d < *weight {
                *weight = d;
            }
        }
    }
    seeds
}

/// Rows of `data` picked by `indices`, in order.
pub fn seed_rows(data: ArrayView2<f64>, indices: &[usize]) -> Array2<f64> {
    data.select(Axis(0), indices)
}
