//! Engine configuration with configurable thresholds and weights
//!
//! Every field has a serde default, so a config file only needs to name
//! the values it overrides. Defaults reproduce the dashboard's rule set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Largest UTC offset chrono accepts, in minutes
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Configuration for the Decision Engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // === Amount tiers ===
    /// Above this amount: "extremely high amount"
    #[serde(default = "default_extreme_amount")]
    pub extreme_amount: Decimal,

    /// Above this amount: "high amount"
    #[serde(default = "default_high_amount")]
    pub high_amount: Decimal,

    /// Above this amount: score weight only, no reason
    #[serde(default = "default_elevated_amount")]
    pub elevated_amount: Decimal,

    // === Round-number pattern ===
    /// Amounts that are exact multiples of this unit count as round
    #[serde(default = "default_round_number_unit")]
    pub round_number_unit: Decimal,

    /// Round amounts only count above this floor
    #[serde(default = "default_round_number_floor")]
    pub round_number_floor: Decimal,

    // === Location tiers (km) ===
    #[serde(default = "default_extreme_distance_km")]
    pub extreme_distance_km: u32,

    #[serde(default = "default_significant_distance_km")]
    pub significant_distance_km: u32,

    #[serde(default = "default_moderate_distance_km")]
    pub moderate_distance_km: u32,

    /// Inclusive range for the injected distance when a pair is missing
    #[serde(default = "default_fallback_distance_min")]
    pub fallback_distance_min: u32,

    #[serde(default = "default_fallback_distance_max")]
    pub fallback_distance_max: u32,

    // === Scoring ===
    #[serde(default)]
    pub weights: RuleWeights,

    /// Basic (reasons only) or scored (reasons + risk score + off-hours rule)
    #[serde(default)]
    pub variant: Variant,

    /// How the final label is derived
    #[serde(default)]
    pub label_policy: LabelPolicy,

    /// Scores strictly above this flag the transaction under `score_threshold`
    #[serde(default = "default_flag_score_threshold")]
    pub flag_score_threshold: u8,

    /// Inclusive jitter range added to the weight sum
    #[serde(default = "default_jitter_min")]
    pub jitter_min: i32,

    #[serde(default = "default_jitter_max")]
    pub jitter_max: i32,

    // === Off-hours ===
    /// First local hour considered normal
    #[serde(default = "default_active_hours_start")]
    pub active_hours_start: u32,

    /// Last local hour considered normal
    #[serde(default = "default_active_hours_end")]
    pub active_hours_end: u32,

    /// Offset applied to the injected UTC clock before reading the hour
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Score contribution of each rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub extreme_amount: u32,
    pub high_amount: u32,
    pub elevated_amount: u32,
    pub new_device: u32,
    pub suspicious_device: u32,
    pub extreme_distance: u32,
    pub significant_distance: u32,
    pub moderate_distance: u32,
    pub round_number: u32,
    pub off_hours: u32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            extreme_amount: 40,
            high_amount: 25,
            elevated_amount: 10,
            new_device: 30,
            suspicious_device: 45,
            extreme_distance: 35,
            significant_distance: 20,
            moderate_distance: 15,
            // The dashboard's score formula never counted these two
            round_number: 0,
            off_hours: 0,
        }
    }
}

/// Which of the two rule-set variants to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Rules 1-4, no score
    Basic,

    /// Rules 1-5 plus a clamped, jittered risk score
    #[default]
    Scored,
}

/// How the final label is derived from the rule outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Flagged if any rule produced a reason (STRICTER - DEFAULT)
    #[default]
    AnyFlag,

    /// Flagged only if the risk score exceeds `flag_score_threshold`.
    /// Rule reasons may be present on a Legitimate verdict.
    ScoreThreshold,
}

// Default value functions for serde
fn default_extreme_amount() -> Decimal {
    Decimal::new(100_000, 0)
}

fn default_high_amount() -> Decimal {
    Decimal::new(50_000, 0)
}

fn default_elevated_amount() -> Decimal {
    Decimal::new(20_000, 0)
}

fn default_round_number_unit() -> Decimal {
    Decimal::new(1_000, 0)
}

fn default_round_number_floor() -> Decimal {
    Decimal::new(20_000, 0)
}

fn default_extreme_distance_km() -> u32 {
    500
}

fn default_significant_distance_km() -> u32 {
    200
}

fn default_moderate_distance_km() -> u32 {
    100
}

fn default_fallback_distance_min() -> u32 {
    50
}

fn default_fallback_distance_max() -> u32 {
    300
}

fn default_flag_score_threshold() -> u8 {
    60
}

fn default_jitter_min() -> i32 {
    -5
}

fn default_jitter_max() -> i32 {
    10
}

fn default_active_hours_start() -> u32 {
    6
}

fn default_active_hours_end() -> u32 {
    23
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extreme_amount: default_extreme_amount(),
            high_amount: default_high_amount(),
            elevated_amount: default_elevated_amount(),
            round_number_unit: default_round_number_unit(),
            round_number_floor: default_round_number_floor(),
            extreme_distance_km: default_extreme_distance_km(),
            significant_distance_km: default_significant_distance_km(),
            moderate_distance_km: default_moderate_distance_km(),
            fallback_distance_min: default_fallback_distance_min(),
            fallback_distance_max: default_fallback_distance_max(),
            weights: RuleWeights::default(),
            variant: Variant::default(),
            label_policy: LabelPolicy::default(),
            flag_score_threshold: default_flag_score_threshold(),
            jitter_min: default_jitter_min(),
            jitter_max: default_jitter_max(),
            active_hours_start: default_active_hours_start(),
            active_hours_end: default_active_hours_end(),
            utc_offset_minutes: 0,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Basic variant with the "any flag" policy (the first dashboard)
    pub fn basic() -> Self {
        Self {
            variant: Variant::Basic,
            label_policy: LabelPolicy::AnyFlag,
            ..Self::default()
        }
    }

    /// Scored variant labelled by score threshold (the second dashboard)
    pub fn scored_threshold() -> Self {
        Self {
            variant: Variant::Scored,
            label_policy: LabelPolicy::ScoreThreshold,
            ..Self::default()
        }
    }

    /// Whether this config produces a risk score
    pub fn is_scored(&self) -> bool {
        self.variant == Variant::Scored
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> EngineResult<()> {
        if self.elevated_amount > self.high_amount || self.high_amount > self.extreme_amount {
            return Err(EngineError::Config(format!(
                "amount tiers must be ordered: elevated {} <= high {} <= extreme {}",
                self.elevated_amount, self.high_amount, self.extreme_amount
            )));
        }
        if self.elevated_amount < Decimal::ZERO || self.round_number_floor < Decimal::ZERO {
            return Err(EngineError::Config("amount thresholds cannot be negative".into()));
        }
        if self.round_number_unit <= Decimal::ZERO {
            return Err(EngineError::Config(format!(
                "round_number_unit must be positive, got {}",
                self.round_number_unit
            )));
        }
        if self.moderate_distance_km > self.significant_distance_km
            || self.significant_distance_km > self.extreme_distance_km
        {
            return Err(EngineError::Config(format!(
                "distance tiers must be ordered: moderate {} <= significant {} <= extreme {}",
                self.moderate_distance_km, self.significant_distance_km, self.extreme_distance_km
            )));
        }
        if self.fallback_distance_min > self.fallback_distance_max {
            return Err(EngineError::Config(format!(
                "fallback distance range is inverted: [{}, {}]",
                self.fallback_distance_min, self.fallback_distance_max
            )));
        }
        if self.weights.suspicious_device <= self.weights.new_device {
            return Err(EngineError::Config(format!(
                "suspicious_device weight ({}) must outrank new_device weight ({})",
                self.weights.suspicious_device, self.weights.new_device
            )));
        }
        if self.flag_score_threshold > 100 {
            return Err(EngineError::Config(format!(
                "flag_score_threshold must be within [0, 100], got {}",
                self.flag_score_threshold
            )));
        }
        if self.jitter_min > self.jitter_max {
            return Err(EngineError::Config(format!(
                "jitter range is inverted: [{}, {}]",
                self.jitter_min, self.jitter_max
            )));
        }
        if self.active_hours_end > 23 || self.active_hours_start > self.active_hours_end {
            return Err(EngineError::Config(format!(
                "active hours must satisfy start <= end <= 23, got [{}, {}]",
                self.active_hours_start, self.active_hours_end
            )));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(EngineError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        if self.label_policy == LabelPolicy::ScoreThreshold && !self.is_scored() {
            return Err(EngineError::Config(
                "score_threshold label policy requires the scored variant".into(),
            ));
        }
        Ok(())
    }
}
