//! Verdict types produced by the engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Canonical reason for a clean Legitimate verdict
pub const ALL_CHECKS_PASSED: &str = "all checks passed";

/// Reason for a score-flagged verdict where no rule produced text
pub const HIGH_RISK_SCORE_DETECTED: &str = "high risk score detected";

/// Final classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum VerdictLabel {
    Legitimate,
    Flagged,
}

/// Coarse band of the risk score, as shown next to the gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// `> 70` High, `> 40` Medium, else Low
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            RiskBand::High
        } else if score > 40 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }
}

/// Identifier of each rule outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    ExtremeAmount,
    HighAmount,
    /// Score-only tier, never produces a reason
    ElevatedAmount,
    NewDevice,
    SuspiciousDevice,
    ExtremeLocationJump,
    SignificantLocationChange,
    ModerateLocationChange,
    RoundNumber,
    OffHours,
}

impl RuleId {
    /// True for the three distance tiers
    pub fn is_location(&self) -> bool {
        matches!(
            self,
            RuleId::ExtremeLocationJump
                | RuleId::SignificantLocationChange
                | RuleId::ModerateLocationChange
        )
    }
}

/// A single rule hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleId,
    /// Score contribution
    pub weight: u32,
    /// Human-readable reason, `None` for score-only tiers
    pub reason: Option<String>,
}

impl Finding {
    pub fn flag(rule: RuleId, weight: u32, reason: impl Into<String>) -> Self {
        Self {
            rule,
            weight,
            reason: Some(reason.into()),
        }
    }

    pub fn weight_only(rule: RuleId, weight: u32) -> Self {
        Self {
            rule,
            weight,
            reason: None,
        }
    }

    /// Whether this finding produces a reason
    pub fn is_flag(&self) -> bool {
        self.reason.is_some()
    }
}

/// Where a distance value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    /// Location unchanged, distance defined as 0
    SameLocation,
    /// Found in the distance table
    Table,
    /// Pair missing: bounded pseudo-random noise, not a real measurement
    Fallback,
}

/// Resolved distance between the previous and current location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub km: u32,
    pub source: DistanceSource,
}

/// Engine output. Built fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub label: VerdictLabel,
    /// Never empty
    pub reasons: Vec<String>,
    /// Rule hits in evaluation order
    pub findings: Vec<Finding>,
    /// Scored variant only, always within [0, 100]
    pub risk_score: Option<u8>,
    pub risk_band: Option<RiskBand>,
    pub distance: Distance,
    /// Clock reading used by the off-hours rule (scored variant only)
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl VerdictResult {
    pub fn is_flagged(&self) -> bool {
        self.label == VerdictLabel::Flagged
    }

    pub fn is_legitimate(&self) -> bool {
        self.label == VerdictLabel::Legitimate
    }

    /// Whether a given rule fired (including score-only tiers)
    pub fn triggered(&self, rule: RuleId) -> bool {
        self.findings.iter().any(|f| f.rule == rule)
    }

    /// Ids of all rules that fired
    pub fn rules(&self) -> Vec<RuleId> {
        self.findings.iter().map(|f| f.rule).collect()
    }

    /// The location tier that fired, if any
    pub fn location_tier(&self) -> Option<RuleId> {
        self.findings
            .iter()
            .map(|f| f.rule)
            .find(|rule| rule.is_location())
    }

    /// Sum of the weights of every finding
    pub fn weight_sum(&self) -> u32 {
        self.findings
            .iter()
            .fold(0u32, |acc, f| acc.saturating_add(f.weight))
    }

    /// Reasons joined for single-line display
    pub fn reasons_line(&self) -> String {
        self.reasons.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(40), RiskBand::Low);
        assert_eq!(RiskBand::from_score(41), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(70), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(71), RiskBand::High);
        assert_eq!(RiskBand::from_score(100), RiskBand::High);
    }

    #[test]
    fn test_risk_band_ordering() {
        assert!(RiskBand::Low < RiskBand::Medium);
        assert!(RiskBand::Medium < RiskBand::High);
    }

    #[test]
    fn test_rule_id_display() {
        assert_eq!(RuleId::HighAmount.to_string(), "HIGH_AMOUNT");
        assert_eq!(RuleId::ExtremeLocationJump.to_string(), "EXTREME_LOCATION_JUMP");
        assert_eq!(RuleId::from_str("ROUND_NUMBER").unwrap(), RuleId::RoundNumber);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!(VerdictLabel::from_str("flagged").unwrap(), VerdictLabel::Flagged);
        assert_eq!(VerdictLabel::from_str("Legitimate").unwrap(), VerdictLabel::Legitimate);
        assert!(VerdictLabel::from_str("maybe").is_err());
    }

    #[test]
    fn test_finding_constructors() {
        let flag = Finding::flag(RuleId::NewDevice, 30, "new device detected");
        assert!(flag.is_flag());

        let tier = Finding::weight_only(RuleId::ElevatedAmount, 10);
        assert!(!tier.is_flag());
    }

    #[test]
    fn test_verdict_helpers() {
        let verdict = VerdictResult {
            label: VerdictLabel::Flagged,
            reasons: vec!["new device detected".into(), "location change".into()],
            findings: vec![
                Finding::weight_only(RuleId::ElevatedAmount, 10),
                Finding::flag(RuleId::NewDevice, 30, "new device detected"),
                Finding::flag(RuleId::ModerateLocationChange, 15, "location change"),
            ],
            risk_score: Some(55),
            risk_band: Some(RiskBand::Medium),
            distance: Distance {
                km: 160,
                source: DistanceSource::Table,
            },
            evaluated_at: None,
        };

        assert!(verdict.is_flagged());
        assert!(verdict.triggered(RuleId::NewDevice));
        assert!(!verdict.triggered(RuleId::SuspiciousDevice));
        assert_eq!(verdict.location_tier(), Some(RuleId::ModerateLocationChange));
        assert_eq!(verdict.weight_sum(), 55);
        assert_eq!(verdict.reasons_line(), "new device detected, location change");
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = VerdictResult {
            label: VerdictLabel::Legitimate,
            reasons: vec![ALL_CHECKS_PASSED.into()],
            findings: vec![],
            risk_score: None,
            risk_band: None,
            distance: Distance {
                km: 0,
                source: DistanceSource::SameLocation,
            },
            evaluated_at: None,
        };
        let json = serde_json::to_string(&verdict).unwrap();

        assert!(json.contains("legitimate"));
        assert!(json.contains("same_location"));

        let parsed: VerdictResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, verdict);
    }
}
