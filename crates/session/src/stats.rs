//! Session statistics

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::record::AuditRecord;

/// Fraud rate above which the session is high risk (percent)
pub const HIGH_RISK_RATE: f64 = 30.0;
/// Fraud rate above which the session is elevated (percent)
pub const ELEVATED_RATE: f64 = 15.0;

/// Coarse session-level risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "elevated")]
    Elevated,
    #[strum(serialize = "high risk")]
    HighRisk,
}

/// Totals over an audit log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub flagged: usize,
    /// Percentage of flagged records, 0 when the log is empty
    pub fraud_rate: f64,
}

impl SessionStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AuditRecord>) -> Self {
        let (total, flagged) = records
            .into_iter()
            .fold((0usize, 0usize), |(total, flagged), record| {
                (total + 1, flagged + usize::from(record.is_flagged()))
            });

        let fraud_rate = if total == 0 {
            0.0
        } else {
            flagged as f64 / total as f64 * 100.0
        };

        Self {
            total,
            flagged,
            fraud_rate,
        }
    }

    pub fn legitimate(&self) -> usize {
        self.total - self.flagged
    }

    pub fn risk_level(&self) -> RiskLevel {
        if self.fraud_rate > HIGH_RISK_RATE {
            RiskLevel::HighRisk
        } else if self.fraud_rate > ELEVATED_RATE {
            RiskLevel::Elevated
        } else {
            RiskLevel::Normal
        }
    }
}
