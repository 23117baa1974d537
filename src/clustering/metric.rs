use crate::Energy;

/// Distance between two feature vectors of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Metric {
    /// squared Euclidean distance, for OCHS win-rate vectors
    L2,
    /// earth mover's distance between histograms over ordered bins:
    /// the total absolute difference of their cumulative mass
    Emd,
}

impl Metric {
    /// the clustering objective between two points
    pub fn distance(&self, x: &[f32], y: &[f32]) -> Energy {
        assert_eq!(x.len(), y.len(), "points of different dimension");
        match self {
            Self::L2 => x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum(),
            Self::Emd => {
                x.iter()
                    .zip(y)
                    .scan(0., |cdf, (a, b)| {
                        *cdf += a - b;
                        Some(Energy::abs(*cdf))
                    })
                    .sum()
            }
        }
    }

    /// a true metric with the same nearest neighbors as distance.
    /// squared Euclidean breaks the triangle inequality, so we take its root.
    pub fn metric(&self, x: &[f32], y: &[f32]) -> Energy {
        self.energy_to_metric(self.distance(x, y))
    }

    /// distance recovered from metric
    pub fn metric_to_energy(&self, d: Energy) -> Energy {
        match self {
            Self::L2 => d * d,
            Self::Emd => d,
        }
    }
    fn energy_to_metric(&self, e: Energy) -> Energy {
        match self {
            Self::L2 => e.sqrt(),
            Self::Emd => e,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::L2 => write!(f, "L2"),
            Self::Emd => write!(f, "EMD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_zero() {
        let x = [0.1, 0.2, 0.3, 0.4];
        assert_eq!(Metric::L2.distance(&x, &x), 0.);
        assert_eq!(Metric::Emd.distance(&x, &x), 0.);
    }

    #[test]
    fn emd_grows_with_transport_length() {
        let x = [1., 0., 0., 0.];
        let near = [0., 1., 0., 0.];
        let far = [0., 0., 0., 1.];
        assert!((Metric::Emd.distance(&x, &near) - 1.).abs() < 1e-6);
        assert!((Metric::Emd.distance(&x, &far) - 3.).abs() < 1e-6);
        // L2 cannot tell the two apart
        assert_eq!(Metric::L2.distance(&x, &near), Metric::L2.distance(&x, &far));
    }

    #[test]
    fn l2_is_squared() {
        let x = [0., 0.];
        let y = [3., 4.];
        assert_eq!(Metric::L2.distance(&x, &y), 25.);
        assert_eq!(Metric::L2.metric(&x, &y), 5.);
        assert_eq!(Metric::L2.metric_to_energy(5.), 25.);
    }

    #[test]
    fn symmetric() {
        let x = [0.5, 0.25, 0.25];
        let y = [0.0, 0.5, 0.5];
        for metric in [Metric::L2, Metric::Emd] {
            assert_eq!(metric.distance(&x, &y), metric.distance(&y, &x));
        }
    }
}
