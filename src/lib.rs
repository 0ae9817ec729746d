pub mod cluster;
pub mod data;
pub mod error;
pub mod random;

pub use cluster::{fit_with, run, run_with, Clustering, InitRule, KMeansConfig, StopRule};
pub use error::{Error, Result};
pub use random::{Lcg, RandomSource};
