use std::fmt;

use log::info;
use symmetra_core::{Float, Matrix, Result};
use symmetra_models::{KMeans, KMeansConfig, SymNmf, SymNmfConfig};

use crate::metrics::silhouette_score;

/// Silhouette scores of both engines on one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub symnmf: Float,
    pub kmeans: Float,
}

impl Comparison {
    /// Name of the engine with the higher score; SymNMF wins ties.
    pub fn leader(&self) -> &'static str {
        if self.symnmf >= self.kmeans {
            "symnmf"
        } else {
            "kmeans"
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nmf: {:.4}", self.symnmf)?;
        write!(f, "kmeans: {:.4}", self.kmeans)
    }
}

/// Clusters `x` into `k` groups with both engines using default settings.
pub fn compare(x: &Matrix, k: usize) -> Result<Comparison> {
    compare_with(x, SymNmfConfig::new(k), KMeansConfig::new(k))
}

/// Clusters `x` with both engines and scores each labelling.
///
/// # Errors
///
/// Any error from either engine or from [`silhouette_score`], e.g. a run
/// that puts every point in one cluster cannot be scored.
pub fn compare_with(
    x: &Matrix,
    symnmf_config: SymNmfConfig,
    kmeans_config: KMeansConfig,
) -> Result<Comparison> {
    let mut symnmf = SymNmf::from_config(symnmf_config);
    symnmf.fit(x)?;
    let symnmf_labels = symnmf.labels().cloned().unwrap_or_default();
    let symnmf_score = silhouette_score(x, &symnmf_labels)?;

    let mut kmeans = KMeans::from_config(kmeans_config);
    kmeans.fit(x)?;
    let kmeans_labels = kmeans.labels().cloned().unwrap_or_default();
    let kmeans_score = silhouette_score(x, &kmeans_labels)?;

    let comparison = Comparison {
        symnmf: symnmf_score,
        kmeans: kmeans_score,
    };
    info!(
        "silhouette: symnmf={:.4} kmeans={:.4} (leader: {})",
        comparison.symnmf,
        comparison.kmeans,
        comparison.leader()
    );
    Ok(comparison)
}
