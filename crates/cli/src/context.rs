//! Application context - wires engine, session and verifier together

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::path::PathBuf;

use fraudwatch_engine::{
    Clock, DecisionEngine, DistanceTable, EngineConfig, FixedClock, LabelPolicy, RngSource,
    StdRngSource, SystemClock, Variant,
};
use fraudwatch_session::{AuditLog, SampleGenerator, SimulatedVerifier, TransactionMonitor};

/// `--policy` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    AnyFlag,
    ScoreThreshold,
}

impl From<PolicyArg> for LabelPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AnyFlag => LabelPolicy::AnyFlag,
            PolicyArg::ScoreThreshold => LabelPolicy::ScoreThreshold,
        }
    }
}

/// `--variant` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Basic,
    Scored,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => Variant::Basic,
            VariantArg::Scored => Variant::Scored,
        }
    }
}

/// Global options, resolved before any command runs
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// JSON engine config; flags below override its variant and policy
    pub config: Option<PathBuf>,
    /// JSON distance table; the built-in Kenyan towns otherwise
    pub distances: Option<PathBuf>,
    /// Seed for every random draw; OS entropy otherwise
    pub seed: Option<u64>,
    /// Fixed evaluation time; the system clock otherwise
    pub at: Option<DateTime<Utc>>,
    pub policy: Option<PolicyArg>,
    pub variant: Option<VariantArg>,
    pub json: bool,
}

impl Settings {
    /// Resolve the engine config from file and flag overrides
    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if let Some(policy) = self.policy {
            config.label_policy = policy.into();
        }

        Ok(config)
    }

    pub fn distance_table(&self) -> anyhow::Result<DistanceTable> {
        match &self.distances {
            Some(path) => DistanceTable::from_file(path)
                .with_context(|| format!("Failed to load distances from {}", path.display())),
            None => Ok(DistanceTable::kenya_defaults()),
        }
    }

    fn clock(&self) -> Box<dyn Clock> {
        match self.at {
            Some(at) => Box::new(FixedClock::new(at)),
            None => Box::new(SystemClock),
        }
    }

    /// Engine and verifier sources, derived from one seed when given
    fn sources(&self) -> (StdRngSource, StdRngSource) {
        match self.seed {
            Some(seed) => (
                RngSource::seeded(seed),
                RngSource::seeded(seed.wrapping_add(1)),
            ),
            None => (RngSource::from_entropy(), RngSource::from_entropy()),
        }
    }
}

/// Application context - one monitor and one verifier per process
pub struct AppContext {
    pub monitor: TransactionMonitor,
    pub verifier: SimulatedVerifier,
    pub json: bool,
}

impl AppContext {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let config = settings.engine_config()?;
        let engine = DecisionEngine::new(config).context("Invalid engine configuration")?;
        let table = settings.distance_table()?;
        let (engine_rng, verifier_rng) = settings.sources();

        tracing::debug!(
            variant = ?engine.config().variant,
            policy = ?engine.config().label_policy,
            distances = table.len(),
            seeded = settings.seed.is_some(),
            "Context ready"
        );

        Ok(Self {
            monitor: TransactionMonitor::new(engine, table, engine_rng, settings.clock()),
            verifier: SimulatedVerifier::new(verifier_rng),
            json: settings.json,
        })
    }

    /// Start from the four demo records instead of an empty log
    pub fn with_seed_records(mut self) -> Self {
        self.monitor = self.monitor.with_log(AuditLog::with_seed_records());
        self
    }

    /// Generate simulated traffic with `generator`
    pub fn with_generator(mut self, generator: SampleGenerator) -> Self {
        self.monitor = self.monitor.with_generator(generator);
        self
    }
}
