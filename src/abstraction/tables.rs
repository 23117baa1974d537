use super::encoder::Indexers;
use super::equity;
use super::ochs::Opponents;
use crate::cards::Evaluate;
use crate::cards::Street;
use crate::clustering::KMeans;
use crate::clustering::Metric;
use crate::save::Blob;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Knobs of the offline abstraction build.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub bins: usize,
    pub samples_preflop: usize,
    pub samples_flop: usize,
    pub k_flop: usize,
    pub k_turn: usize,
    pub k_river: usize,
    pub k_opponents: usize,
    pub iterations: usize,
    pub restarts: usize,
    pub seed: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            bins: crate::EQUITY_BINS,
            samples_preflop: crate::EQUITY_SAMPLES_PREFLOP,
            samples_flop: crate::EQUITY_SAMPLES_FLOP,
            k_flop: crate::KMEANS_FLOP_CLUSTER_COUNT,
            k_turn: crate::KMEANS_TURN_CLUSTER_COUNT,
            k_river: crate::KMEANS_RIVER_CLUSTER_COUNT,
            k_opponents: crate::KMEANS_OCHS_CLUSTER_COUNT,
            iterations: crate::KMEANS_TRAINING_ITERATIONS,
            restarts: crate::KMEANS_RESTARTS,
            seed: 0,
        }
    }
}

impl Parameters {
    fn kmeans(&self, street: Street) -> KMeans {
        let (k, metric) = match street {
            Street::Pref => (self.k_opponents, Metric::Emd),
            Street::Flop => (self.k_flop, Metric::Emd),
            Street::Turn => (self.k_turn, Metric::Emd),
            Street::Rive => (self.k_river, Metric::L2),
        };
        KMeans {
            k,
            iterations: self.iterations,
            restarts: self.restarts,
            metric,
            seed: self.seed ^ street as u64,
        }
    }
}

/// Feature vectors of every canonical hand of one street, row-major.
/// Flop and turn rows are equity histograms, river rows are win rates
/// against each opponent archetype, preflop rows feed the archetypes.
#[derive(Debug, Clone, PartialEq)]
pub struct Histograms {
    street: Street,
    dim: usize,
    data: Vec<f32>,
}

impl Histograms {
    pub fn path(dir: &Path, street: Street) -> PathBuf {
        dir.join(format!("{}.{}.bin", Self::name(), street))
    }
    pub fn dim(&self) -> usize {
        self.dim
    }
    pub fn data(&self) -> &[f32] {
        &self.data
    }
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn preflop(evaluator: &dyn Evaluate, params: &Parameters) -> Self {
        log::info!("{:<32}{:<32}", "building histograms", Street::Pref);
        Self {
            street: Street::Pref,
            dim: params.bins,
            data: Opponents::histograms(evaluator, params.bins, params.samples_preflop, params.seed),
        }
    }

    /// equity histograms of every canonical flop or turn
    pub fn emd(evaluator: &dyn Evaluate, params: &Parameters, street: Street) -> Self {
        assert!(matches!(street, Street::Flop | Street::Turn), "emd features on flop or turn");
        log::info!("{:<32}{:<32}", "building histograms", street);
        let ref indexer = Indexers::indexer(street);
        let round = street.round();
        let data = (0..indexer.size(round))
            .into_par_iter()
            .map(|i| {
                let ref mut rng = SmallRng::seed_from_u64(params.seed ^ i);
                let cards = indexer.unindex(round, i).expect("index within street");
                let (hole, board) = equity::split(&cards);
                equity::histogram(evaluator, hole, board, params.bins, params.samples_flop, rng)
            })
            .flatten_iter()
            .collect();
        Self {
            street,
            dim: params.bins,
            data,
        }
    }

    /// win rates against each opponent archetype of every canonical river
    pub fn ochs(evaluator: &dyn Evaluate, opponents: &Opponents) -> Self {
        log::info!("{:<32}{:<32}", "building histograms", Street::Rive);
        let ref indexer = Indexers::indexer(Street::Rive);
        let round = Street::Rive.round();
        let data = (0..indexer.size(round))
            .into_par_iter()
            .map(|i| {
                let cards = indexer.unindex(round, i).expect("index within street");
                let (hole, board) = equity::split(&cards);
                opponents.features(evaluator, hole, board)
            })
            .flatten_iter()
            .collect();
        Self {
            street: Street::Rive,
            dim: opponents.k(),
            data,
        }
    }

    pub fn cluster(&self, params: &Parameters, resume: Option<&Clusters>) -> Clusters {
        log::info!("{:<32}{:<32}", "clustering", self.street);
        let clustering = params.kmeans(self.street).fit(
            &self.data,
            self.dim,
            resume.map(|c| c.assignments.iter().map(|a| *a as usize).collect::<Vec<_>>()).as_deref(),
        );
        log::info!(
            "{:<32}{:<32}",
            format!("clustered {}", self.street),
            format!("energy {:.6} after {} passes", clustering.energy, clustering.iterations)
        );
        Clusters {
            street: self.street,
            assignments: clustering.assignments.into_iter().map(|a| a as u32).collect(),
        }
    }
}

impl Blob for Histograms {
    fn name() -> &'static str {
        "histograms"
    }
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        crate::save::write_u32s(writer, &[self.street as u32, self.dim as u32])?;
        crate::save::write_f32s(writer, &self.data)
    }
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let header = crate::save::read_u32s(reader)?;
        anyhow::ensure!(header.len() == 2 && header[1] > 0, "malformed histogram header");
        let street = Street::all()
            .get(header[0] as usize)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown street {}", header[0]))?;
        let dim = header[1] as usize;
        let data = crate::save::read_f32s(reader)?;
        anyhow::ensure!(data.len() % dim == 0, "ragged histograms");
        Ok(Self { street, dim, data })
    }
}

/// Cluster id of every canonical hand of one street.
#[derive(Debug, Clone, PartialEq)]
pub struct Clusters {
    street: Street,
    assignments: Vec<u32>,
}

impl Clusters {
    pub fn path(dir: &Path, street: Street) -> PathBuf {
        dir.join(format!("{}.{}.bin", Self::name(), street))
    }
    pub fn assignments(&self) -> &[u32] {
        &self.assignments
    }
}

impl From<(Street, Vec<u32>)> for Clusters {
    fn from((street, assignments): (Street, Vec<u32>)) -> Self {
        Self { street, assignments }
    }
}

impl Blob for Clusters {
    fn name() -> &'static str {
        "clusters"
    }
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        crate::save::write_u32s(writer, &[self.street as u32])?;
        crate::save::write_u32s(writer, &self.assignments)
    }
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let header = crate::save::read_u32s(reader)?;
        let street = header
            .first()
            .and_then(|s| Street::all().get(*s as usize))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("malformed cluster header"))?;
        let assignments = crate::save::read_u32s(reader)?;
        Ok(Self { street, assignments })
    }
}

/// Bucket lookup of every canonical flop, turn and river hand.
/// Preflop needs no table: its 169 canonical indices are the buckets.
pub struct AbstractionTables {
    pub(super) flop: Vec<u32>,
    pub(super) turn: Vec<u32>,
    pub(super) river: Vec<u32>,
    pub(super) opponents: Opponents,
    pub(super) indexers: Indexers,
}

impl AbstractionTables {
    pub fn opponents(&self) -> &Opponents {
        &self.opponents
    }
    /// number of buckets on this street
    pub fn buckets(&self, street: Street) -> usize {
        match street {
            Street::Pref => street.n_isomorphisms(),
            Street::Flop => Self::count(&self.flop),
            Street::Turn => Self::count(&self.turn),
            Street::Rive => Self::count(&self.river),
        }
    }
    fn count(table: &[u32]) -> usize {
        table.iter().max().map(|m| *m as usize + 1).unwrap_or(0)
    }

    /// Load every table from `dir`. A missing file is rebuilt together with
    /// everything that depends on it:
    ///
    /// - preflop histograms, opponent archetypes, river features, river clusters
    /// - flop histograms, flop clusters
    /// - turn histograms, turn clusters
    pub fn learn(dir: &Path, evaluator: &dyn Evaluate, params: &Parameters) -> anyhow::Result<Self> {
        let ref mut stale = false;
        let preflop = Self::obtain(&Histograms::path(dir, Street::Pref), stale, || {
            Histograms::preflop(evaluator, params)
        })?;
        let opponents = Self::obtain(&dir.join("opponents.preflop.bin"), stale, || {
            let clusters = preflop.cluster(params, None);
            Opponents::from((clusters.assignments, params.k_opponents))
        })?;
        let river = Self::obtain(&Histograms::path(dir, Street::Rive), stale, || {
            Histograms::ochs(evaluator, &opponents)
        })?;
        let river = Self::obtain(&Clusters::path(dir, Street::Rive), stale, || {
            river.cluster(params, None)
        })?;
        let mut streets = Vec::new();
        for street in [Street::Flop, Street::Turn] {
            let ref mut stale = false;
            let histograms = Self::obtain(&Histograms::path(dir, street), stale, || {
                Histograms::emd(evaluator, params, street)
            })?;
            let clusters = Self::obtain(&Clusters::path(dir, street), stale, || {
                histograms.cluster(params, None)
            })?;
            streets.push(clusters.assignments);
        }
        let turn = streets.pop().expect("turn clusters");
        let flop = streets.pop().expect("flop clusters");
        Self::from_parts(flop, turn, river.assignments, opponents)
    }

    /// Refine an existing street's clusters by resuming k-means from them.
    pub fn refine(dir: &Path, params: &Parameters, street: Street) -> anyhow::Result<()> {
        anyhow::ensure!(street != Street::Pref, "preflop buckets are lossless");
        let histograms = Histograms::load(&Histograms::path(dir, street))?;
        let ref path = Clusters::path(dir, street);
        let previous = Clusters::load(path)?;
        anyhow::ensure!(
            previous.assignments.len() == histograms.len(),
            "clusters and histograms disagree on {}",
            street
        );
        histograms.cluster(params, Some(&previous)).save(path)
    }

    pub fn from_parts(flop: Vec<u32>, turn: Vec<u32>, river: Vec<u32>, opponents: Opponents) -> anyhow::Result<Self> {
        let indexers = Indexers::default();
        for (street, table) in [(Street::Flop, &flop), (Street::Turn, &turn), (Street::Rive, &river)] {
            anyhow::ensure!(
                table.len() as u64 == indexers.size(street),
                "{} table has {} entries, expected {}",
                street,
                table.len(),
                indexers.size(street)
            );
        }
        Ok(Self {
            flop,
            turn,
            river,
            opponents,
            indexers,
        })
    }

    /// load from disk, or rebuild and save if missing or upstream was rebuilt
    fn obtain<T, F>(path: &Path, stale: &mut bool, build: F) -> anyhow::Result<T>
    where
        T: Blob,
        F: FnOnce() -> T,
    {
        if !*stale && T::done(path) {
            T::load(path)
        } else {
            log::info!("{:<32}{:<32}", "rebuilding", path.display());
            *stale = true;
            let built = build();
            built.save(path)?;
            Ok(built)
        }
    }
}
