use crate::abstraction::AbstractionTables;
use crate::abstraction::Encoder;
use crate::abstraction::Parameters;
use crate::cards::Evaluate;
use crate::cards::Evaluator;
use crate::gameplay::Rules;
use crate::mccfr::Schedule;
use crate::mccfr::Store;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Every tunable of a run, grouped by the subsystem that reads it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// where evaluator tables, abstraction tables and checkpoints live
    pub dir: PathBuf,
    pub rules: Rules,
    pub abstraction: Parameters,
    pub schedule: Schedule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("blobs"),
            rules: Rules::default(),
            abstraction: Parameters::default(),
            schedule: Schedule::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        self.rules.validate()?;
        self.schedule.validate()?;
        Ok(())
    }
}

/// What every training worker shares: the rules, the card services and
/// the infoset store. Built once, then handed around behind an `Arc`.
pub struct TrainingContext {
    config: Config,
    rules: Arc<Rules>,
    evaluator: Box<dyn Evaluate>,
    encoder: Box<dyn Encoder>,
    store: Store,
}

impl TrainingContext {
    pub fn new(config: Config, evaluator: Box<dyn Evaluate>, encoder: Box<dyn Encoder>, store: Store) -> Self {
        Self {
            rules: Arc::new(config.rules.clone()),
            config,
            evaluator,
            encoder,
            store,
        }
    }
    /// loads or builds every artifact under the configured directory
    pub fn learn(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let ref dir = config.dir.clone();
        let evaluator = Evaluator::learn(dir, crate::EVALUATOR_TABLE_CARDS)?;
        let tables = AbstractionTables::learn(dir, &evaluator, &config.abstraction)?;
        let store = Store::resume(dir)?;
        log::info!("{:<32}{:<32}", "infosets loaded", store.len());
        Ok(Self::new(config, Box::new(evaluator), Box::new(tables), store))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn rules(&self) -> Arc<Rules> {
        self.rules.clone()
    }
    pub fn schedule(&self) -> &Schedule {
        &self.config.schedule
    }
    pub fn evaluator(&self) -> &dyn Evaluate {
        self.evaluator.as_ref()
    }
    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }
    pub fn store(&self) -> &Store {
        &self.store
    }
}
