pub mod distance;
pub mod init;
pub mod k_means;
pub mod rebalance;
pub mod stopping;

pub use distance::{argmin, centroids, distance_matrix, squared_distance};
pub use init::InitRule;
pub use k_means::{fit_with, run, run_with, Clustering, KMeansConfig};
pub use rebalance::rebalance;
pub use stopping::{StopPolicy, StopRule};
