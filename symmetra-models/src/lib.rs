pub mod k_means;
pub mod normalization;
pub mod similarity;
pub mod symnmf;

pub use k_means::{cluster, EmptyClusterPolicy, KMeans, KMeansConfig};
pub use normalization::normalize;
pub use similarity::{degree, similarity};
pub use symnmf::{
    factorize, factorize_with, init_h, labels_from_h, run_goal, DegeneratePolicy, Factorization,
    Goal, SymNmf, SymNmfConfig,
};

/// Routes `log` output from tests through `env_logger`; set `RUST_LOG` to see it.
#[cfg(test)]
pub(crate) fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
