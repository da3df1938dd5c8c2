pub mod analysis;
pub mod io;
pub mod metrics;

// Re-export public API
pub use analysis::{compare, compare_with, Comparison};
pub use io::{format_labels, format_matrix, parse_dataset, read_dataset};
pub use metrics::silhouette_score;
pub use symmetra_core::*;
pub use symmetra_models::*;
