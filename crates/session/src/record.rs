//! Audit records - one row per submitted transaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fraudwatch_core::TransactionInput;
use fraudwatch_engine::{VerdictLabel, VerdictResult};

use crate::verification::VerificationRecord;

/// A logged transaction with its verdict and follow-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record id
    pub id: Uuid,
    /// Human-facing sequence id ("TXN001")
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub input: TransactionInput,
    pub label: VerdictLabel,
    pub reasons: Vec<String>,
    pub risk_score: Option<u8>,
    /// Display-only simulated confidence
    pub ml_confidence: Option<f64>,
    pub biometric_verified: bool,
    /// Attempts made, if verification was required
    pub verification: Option<VerificationRecord>,
}

impl AuditRecord {
    /// Build a record from an engine verdict.
    ///
    /// Legitimate verdicts count as verified; Flagged ones start unverified
    /// until [`AuditRecord::with_verification`] attaches an outcome.
    pub fn from_verdict(
        transaction_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        customer_name: impl Into<String>,
        input: TransactionInput,
        verdict: &VerdictResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id: transaction_id.into(),
            timestamp,
            customer_name: customer_name.into(),
            input,
            label: verdict.label,
            reasons: verdict.reasons.clone(),
            risk_score: verdict.risk_score,
            ml_confidence: None,
            biometric_verified: verdict.is_legitimate(),
            verification: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.ml_confidence = Some(confidence);
        self
    }

    pub fn with_verification(mut self, verification: VerificationRecord) -> Self {
        self.biometric_verified = verification.verified;
        self.verification = Some(verification);
        self
    }

    pub fn is_flagged(&self) -> bool {
        self.label == VerdictLabel::Flagged
    }

    /// Reasons joined for single-line display
    pub fn reasons_line(&self) -> String {
        self.reasons.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::{BiometricModality, VerificationAttempt};
    use chrono::TimeZone;
    use fraudwatch_core::DeviceStatus;
    use fraudwatch_engine::{DecisionEngine, DistanceTable, FixedClock, FixedSource};
    use rust_decimal_macros::dec;

    fn verdict_for(input: &TransactionInput) -> VerdictResult {
        DecisionEngine::default()
            .evaluate(
                input,
                &DistanceTable::kenya_defaults(),
                &mut FixedSource::new(0),
                &FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 20, 12, 0, 0).unwrap()),
            )
            .unwrap()
    }

    #[test]
    fn test_legitimate_record_is_verified() {
        let input = TransactionInput::new(dec!(12500), DeviceStatus::Trusted, "Nairobi", "Nairobi")
            .unwrap();
        let verdict = verdict_for(&input);
        let record = AuditRecord::from_verdict("TXN001", Utc::now(), "John Kamau", input, &verdict);

        assert!(verdict.is_legitimate());
        assert!(record.biometric_verified);
        assert_eq!(record.reasons, verdict.reasons);
        assert!(record.verification.is_none());
    }

    #[test]
    fn test_flagged_record_takes_verification_outcome() {
        let input = TransactionInput::new(dec!(75000), DeviceStatus::New, "Mombasa", "Nairobi")
            .unwrap();
        let verdict = verdict_for(&input);
        let record =
            AuditRecord::from_verdict("TXN002", Utc::now(), "Amina Ochieng", input, &verdict);

        assert!(record.is_flagged());
        assert!(!record.biometric_verified);

        let record = record.with_verification(VerificationRecord {
            attempts: vec![VerificationAttempt {
                modality: BiometricModality::Voice,
                success: true,
            }],
            verified: true,
        });
        assert!(record.biometric_verified);
        assert_eq!(record.verification.as_ref().unwrap().attempts.len(), 1);
    }

    #[test]
    fn test_record_serialization() {
        let input = TransactionInput::new(dec!(75000), DeviceStatus::New, "Mombasa", "Nairobi")
            .unwrap();
        let verdict = verdict_for(&input);
        let record = AuditRecord::from_verdict("TXN003", Utc::now(), "Test User", input, &verdict)
            .with_confidence(88.7);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("TXN003"));
        assert!(json.contains("flagged"));
        assert!(json.contains("88.7"));

        let parsed: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
