//! k-means over dense feature vectors under L2 or earth mover's distance.
mod kmeans;
mod metric;

pub use kmeans::*;
pub use metric::*;
