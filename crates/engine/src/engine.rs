//! Decision Engine - runs the rules and builds the verdict

use fraudwatch_core::TransactionInput;

use crate::clock::Clock;
use crate::config::{EngineConfig, LabelPolicy};
use crate::decision::{
    Finding, RiskBand, VerdictLabel, VerdictResult, ALL_CHECKS_PASSED, HIGH_RISK_SCORE_DETECTED,
};
use crate::distance::DistanceTable;
use crate::error::EngineResult;
use crate::random::RandomSource;
use crate::rules;

/// Rule-based decision engine
///
/// Holds only its (validated) configuration, so one engine can be shared
/// by any number of threads. Every call gets its own random source and clock.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: EngineConfig,
}

impl DecisionEngine {
    /// Create an engine, rejecting inconsistent configuration
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one transaction.
    ///
    /// Validation runs before any rule. Random draws happen in a fixed order
    /// (fallback distance, then jitter), so a seeded source reproduces results.
    pub fn evaluate(
        &self,
        tx: &TransactionInput,
        table: &DistanceTable,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> EngineResult<VerdictResult> {
        tx.validate()?;

        let config = &self.config;
        let mut findings: Vec<Finding> = Vec::new();

        findings.extend(rules::amount_tier(tx.amount, config));
        findings.extend(rules::device_risk(tx.device_status, config));

        let distance = rules::resolve_distance(tx, table, config, rng);
        findings.extend(rules::location_jump(distance, tx, config));

        findings.extend(rules::round_number(tx.amount, config));

        let evaluated_at = config.is_scored().then(|| clock.now());
        if let Some(at) = evaluated_at {
            findings.extend(rules::off_hours(at, config));
        }

        let risk_score = config.is_scored().then(|| self.score(&findings, rng));

        let reasons: Vec<String> = findings.iter().filter_map(|f| f.reason.clone()).collect();

        let flagged = match config.label_policy {
            LabelPolicy::AnyFlag => !reasons.is_empty(),
            LabelPolicy::ScoreThreshold => {
                risk_score.is_some_and(|score| score > config.flag_score_threshold)
            }
        };
        let label = if flagged {
            VerdictLabel::Flagged
        } else {
            VerdictLabel::Legitimate
        };

        let reasons = if !reasons.is_empty() {
            reasons
        } else if flagged {
            vec![HIGH_RISK_SCORE_DETECTED.to_string()]
        } else {
            vec![ALL_CHECKS_PASSED.to_string()]
        };

        tracing::debug!(
            label = %label,
            risk_score = ?risk_score,
            reasons = reasons.len(),
            distance_km = distance.km,
            "Transaction evaluated"
        );

        Ok(VerdictResult {
            label,
            reasons,
            findings,
            risk_score,
            risk_band: risk_score.map(RiskBand::from_score),
            distance,
            evaluated_at,
        })
    }

    /// Weight sum plus jitter, clamped to [0, 100]
    fn score(&self, findings: &[Finding], rng: &mut dyn RandomSource) -> u8 {
        let sum = findings
            .iter()
            .fold(0i64, |acc, f| acc.saturating_add(i64::from(f.weight)));
        let jitter = rng.int_in(
            i64::from(self.config.jitter_min),
            i64::from(self.config.jitter_max),
        );
        // Clamped into [0, 100], so the cast is lossless
        sum.saturating_add(jitter).clamp(0, 100) as u8
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

/// Evaluate with the default configuration
pub fn evaluate(
    tx: &TransactionInput,
    table: &DistanceTable,
    rng: &mut dyn RandomSource,
    clock: &dyn Clock,
) -> EngineResult<VerdictResult> {
    DecisionEngine::default().evaluate(tx, table, rng, clock)
}
