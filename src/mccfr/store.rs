use super::infoset::Infoset;
use super::key::InfosetKey;
use crate::save::Blob;
use dashmap::DashMap;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Every information set met during training, shared by all workers.
///
/// The first touch of a key inserts exactly one infoset even when several
/// workers race for it; the map's shard lock decides the winner and every
/// caller gets the same `Arc`.
#[derive(Debug, Default)]
pub struct Store {
    infosets: DashMap<InfosetKey, Arc<Infoset>>,
}

impl Store {
    /// checkpoint stamped with the time it was taken
    pub fn path(dir: &Path, secs: u64) -> PathBuf {
        dir.join(format!("blueprint.{}.bin", secs))
    }
    /// the checkpoint loaded at startup
    pub fn latest(dir: &Path) -> PathBuf {
        dir.join("blueprint.bin")
    }
    /// previous checkpoint if one exists, otherwise empty
    pub fn resume(dir: &Path) -> anyhow::Result<Self> {
        let ref path = Self::latest(dir);
        match Self::done(path) {
            true => Self::load(path),
            false => {
                log::info!("{:<32}{:<32}", "starting fresh blueprint", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.infosets.len()
    }
    pub fn is_empty(&self) -> bool {
        self.infosets.is_empty()
    }
    pub fn get(&self, key: &InfosetKey) -> Option<Arc<Infoset>> {
        self.infosets.get(key).map(|entry| entry.value().clone())
    }
    /// the infoset at `key`, created with `n` actions on first touch
    pub fn obtain(&self, key: &InfosetKey, n: usize) -> Arc<Infoset> {
        if let Some(infoset) = self.get(key) {
            assert_eq!(infoset.len(), n, "action count changed at {}", key);
            return infoset;
        }
        let infoset = self
            .infosets
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Infoset::new(n)))
            .value()
            .clone();
        assert_eq!(infoset.len(), n, "action count changed at {}", key);
        infoset
    }
    /// scale every regret and count
    pub fn discount(&self, factor: f32) {
        self.infosets.iter().for_each(|entry| entry.value().discount(factor));
    }
    pub fn keys(&self) -> Vec<InfosetKey> {
        self.infosets.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl Blob for Store {
    fn name() -> &'static str {
        "blueprint"
    }
    /// concurrent training may tear the snapshot across entries
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let snapshot = self
            .infosets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect::<Vec<_>>();
        crate::save::write_u32s(writer, &[snapshot.len() as u32])?;
        for (key, infoset) in snapshot {
            let (regrets, counts) = <(Vec<f32>, Vec<f32>)>::from(infoset.as_ref());
            crate::save::write_str(writer, key.as_str())?;
            crate::save::write_f32s(writer, &regrets)?;
            crate::save::write_f32s(writer, &counts)?;
        }
        Ok(())
    }
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let n = crate::save::read_u32s(reader)?;
        anyhow::ensure!(n.len() == 1, "malformed infoset count");
        let infosets = DashMap::with_capacity(n[0] as usize);
        for _ in 0..n[0] {
            let key = InfosetKey::from(crate::save::read_str(reader)?);
            let regrets = crate::save::read_f32s(reader)?;
            let counts = crate::save::read_f32s(reader)?;
            anyhow::ensure!(!regrets.is_empty(), "infoset {} without actions", key);
            anyhow::ensure!(regrets.len() == counts.len(), "infoset {} is ragged", key);
            infosets.insert(key, Arc::new(Infoset::from((regrets, counts))));
        }
        Ok(Self { infosets })
    }
}
