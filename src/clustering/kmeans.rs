use super::metric::Metric;
use crate::Energy;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// Parameters of a k-means run.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct KMeans {
    pub k: usize,
    pub iterations: usize,
    pub restarts: usize,
    pub metric: Metric,
    pub seed: u64,
}

/// Result of a k-means run over `n` points of dimension `dim`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// nearest center of every point
    pub assignments: Vec<usize>,
    /// k centers, flattened row-major
    pub centers: Vec<f32>,
    /// mean distance of points to their centers
    pub energy: Energy,
    /// assignment passes performed
    pub iterations: usize,
}

impl Clustering {
    pub fn center(&self, j: usize, dim: usize) -> &[f32] {
        &self.centers[j * dim..(j + 1) * dim]
    }
}

impl KMeans {
    /// Cluster `points`, a row-major matrix with rows of length `dim`.
    ///
    /// With `resume`, the previous assignments seed the centers and a single
    /// run refines them. Otherwise every restart seeds with k-means++ and
    /// the run with the lowest energy wins.
    pub fn fit(&self, points: &[f32], dim: usize, resume: Option<&[usize]>) -> Clustering {
        assert!(dim > 0 && points.len() % dim == 0, "ragged points");
        let n = points.len() / dim;
        assert!(n >= self.k, "{} points cannot fill {} clusters", n, self.k);
        assert!(self.k > 0, "zero clusters");
        match resume {
            Some(assignments) => {
                assert_eq!(assignments.len(), n, "resume assignments per point");
                let ref initial = vec![0.; self.k * dim];
                let centers = self.means(points, dim, assignments, initial);
                self.lloyd(points, dim, centers, Some(assignments.to_vec()))
            }
            None => (0..self.restarts.max(1))
                .map(|restart| {
                    let ref mut rng = self.rng(restart);
                    let centers = self.init(points, dim, rng);
                    let clustering = self.lloyd(points, dim, centers, None);
                    log::info!(
                        "{:<32}{:<32}",
                        format!("kmeans restart {}", restart),
                        format!("energy {:.6}", clustering.energy)
                    );
                    clustering
                })
                .min_by(|a, b| a.energy.total_cmp(&b.energy))
                .expect("at least one restart"),
        }
    }

    /// deterministic stream per restart
    fn rng(&self, restart: usize) -> SmallRng {
        let ref mut hasher = DefaultHasher::default();
        self.seed.hash(hasher);
        restart.hash(hasher);
        SmallRng::seed_from_u64(hasher.finish())
    }

    /// k-means++ seeding
    /// 1. choose the first center uniformly from the dataset
    /// 2. choose each next center with probability proportional to its distance from the nearest center
    /// 3. a chosen point has zero potential, so no point is chosen twice
    fn init(&self, points: &[f32], dim: usize, rng: &mut SmallRng) -> Vec<f32> {
        let n = points.len() / dim;
        let mut chosen = vec![false; n];
        let mut potentials = vec![Energy::INFINITY; n];
        let mut centers = Vec::with_capacity(self.k * dim);
        while centers.len() < self.k * dim {
            let i = match centers.is_empty() {
                true => rng.random_range(0..n),
                false => match WeightedIndex::new(potentials.iter()) {
                    Ok(weights) => weights.sample(rng),
                    // every remaining point duplicates a center
                    Err(_) => {
                        let unchosen = (0..n).filter(|i| !chosen[*i]).collect::<Vec<_>>();
                        unchosen[rng.random_range(0..unchosen.len())]
                    }
                },
            };
            let ref x = points[i * dim..(i + 1) * dim];
            centers.extend_from_slice(x);
            chosen[i] = true;
            potentials = points
                .par_chunks(dim)
                .zip(potentials.par_iter())
                .map(|(p, d)| Energy::min(*d, self.metric.distance(x, p)))
                .collect();
            potentials
                .iter_mut()
                .zip(chosen.iter())
                .filter(|(_, c)| **c)
                .for_each(|(p, _)| *p = 0.);
        }
        centers
    }

    /// Lloyd iterations until the energy stops improving or nothing moves
    fn lloyd(
        &self,
        points: &[f32],
        dim: usize,
        mut centers: Vec<f32>,
        mut assignments: Option<Vec<usize>>,
    ) -> Clustering {
        let mut energy = Energy::INFINITY;
        let mut iterations = 0;
        while iterations < self.iterations.max(1) {
            iterations += 1;
            let (next, moved, e) = self.assign(points, dim, &centers, assignments.as_deref());
            log::debug!(
                "{:<32}{:<32}",
                format!("kmeans iteration {}", iterations),
                format!("energy {:.6} moved {}", e, moved)
            );
            let converged = moved == 0 || e >= energy;
            if e <= energy {
                energy = e;
                assignments = Some(next);
            }
            if converged {
                break;
            }
            let ref current = assignments.as_ref().expect("just assigned");
            centers = self.means(points, dim, current, &centers);
        }
        Clustering {
            assignments: assignments.expect("at least one iteration"),
            centers,
            energy,
            iterations,
        }
    }

    /// the k by k matrix of center metrics
    fn pairwise(&self, centers: &[f32], dim: usize) -> Vec<Energy> {
        let k = self.k;
        (0..k * k)
            .into_par_iter()
            .map(|ij| (ij / k, ij % k))
            .map(|(i, j)| match i == j {
                true => 0.,
                false => self.metric.metric(
                    &centers[i * dim..(i + 1) * dim],
                    &centers[j * dim..(j + 1) * dim],
                ),
            })
            .collect()
    }

    /// s(c) = (1/2) min_{c' != c} d(c, c')
    fn midpoints(&self, pairwise: &[Energy]) -> Vec<Energy> {
        let k = self.k;
        (0..k)
            .map(|i| {
                (0..k)
                    .filter(|j| *j != i)
                    .map(|j| pairwise[i * k + j] * 0.5)
                    .fold(Energy::INFINITY, Energy::min)
            })
            .collect()
    }

    /// nearest center of every point, the number of points that moved,
    /// and the mean distance. points keep their center when the triangle
    /// inequality proves no other center can be closer.
    fn assign(
        &self,
        points: &[f32],
        dim: usize,
        centers: &[f32],
        previous: Option<&[usize]>,
    ) -> (Vec<usize>, usize, Energy) {
        let k = self.k;
        let n = points.len() / dim;
        let ref pairwise = self.pairwise(centers, dim);
        let ref midpoints = self.midpoints(pairwise);
        let shard = n.div_ceil(rayon::current_num_threads()).max(1);
        let center = |j: usize| &centers[j * dim..(j + 1) * dim];
        let nearest = |x: &[f32], start: Option<usize>| -> (usize, Energy) {
            let (mut best, mut d) = match start {
                Some(c) => (c, self.metric.metric(x, center(c))),
                None => (0, self.metric.metric(x, center(0))),
            };
            if start.is_some() && d <= midpoints[best] {
                return (best, d);
            }
            for j in 0..k {
                if j == best || pairwise[best * k + j] >= 2. * d {
                    continue;
                }
                let dj = self.metric.metric(x, center(j));
                if dj < d {
                    best = j;
                    d = dj;
                }
            }
            (best, d)
        };
        let results = points
            .par_chunks(shard * dim)
            .enumerate()
            .flat_map_iter(|(s, chunk)| {
                chunk.chunks(dim).enumerate().map(move |(i, x)| {
                    let start = previous.map(|p| p[s * shard + i]);
                    let (j, d) = nearest(x, start);
                    (j, start != Some(j), self.metric.metric_to_energy(d))
                })
            })
            .collect::<Vec<_>>();
        let moved = results.iter().filter(|(_, m, _)| *m).count();
        let total = results.iter().map(|(_, _, e)| *e as f64).sum::<f64>();
        let assignments = results.into_iter().map(|(j, _, _)| j).collect();
        (assignments, moved, (total / n as f64) as Energy)
    }

    /// coordinate-wise mean of each cluster. an empty cluster keeps its previous center.
    fn means(&self, points: &[f32], dim: usize, assignments: &[usize], previous: &[f32]) -> Vec<f32> {
        let k = self.k;
        let shard = assignments.len().div_ceil(rayon::current_num_threads()).max(1);
        let (sums, counts) = points
            .par_chunks(shard * dim)
            .zip(assignments.par_chunks(shard))
            .map(|(chunk, labels)| {
                let mut sums = vec![0f64; k * dim];
                let mut counts = vec![0usize; k];
                for (x, j) in chunk.chunks(dim).zip(labels) {
                    counts[*j] += 1;
                    sums[j * dim..(j + 1) * dim]
                        .iter_mut()
                        .zip(x)
                        .for_each(|(s, v)| *s += *v as f64);
                }
                (sums, counts)
            })
            .reduce(
                || (vec![0f64; k * dim], vec![0usize; k]),
                |(mut s1, mut c1), (s2, c2)| {
                    s1.iter_mut().zip(s2).for_each(|(a, b)| *a += b);
                    c1.iter_mut().zip(c2).for_each(|(a, b)| *a += b);
                    (s1, c1)
                },
            );
        (0..k * dim)
            .map(|ij| match counts[ij / dim] {
                0 => previous[ij],
                c => (sums[ij] / c as f64) as f32,
            })
            .collect()
    }
}
