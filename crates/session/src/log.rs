//! Audit Log - append-only, caller-owned history of verdicts

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fraudwatch_core::{DeviceStatus, TransactionInput};
use fraudwatch_engine::{VerdictLabel, ALL_CHECKS_PASSED};

use crate::record::AuditRecord;
use crate::stats::SessionStats;

/// Record selection for display
///
/// Applied newest first. Records without a risk score count as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub status: Option<VerdictLabel>,
    pub min_risk_score: u8,
    pub limit: Option<usize>,
}

impl AuditFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: VerdictLabel) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_min_risk_score(mut self, score: u8) -> Self {
        self.min_risk_score = score;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &AuditRecord) -> bool {
        let status_ok = self.status.map_or(true, |status| record.label == status);
        status_ok && record.risk_score.unwrap_or(0) >= self.min_risk_score
    }
}

/// In-memory audit trail
///
/// Single writer: every mutation takes `&mut self`. Records are stored in
/// submission order and read back newest first.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
    /// Transaction ids handed out so far
    issued: u32,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-populated with four demo transactions (TXN001..TXN004)
    pub fn with_seed_records() -> Self {
        let seeds = [
            SeedRow {
                id: "TXN004",
                at: (7, 22, 33),
                customer: "Peter Mutua",
                amount: Decimal::from(8500),
                device: DeviceStatus::Trusted,
                location: "Nakuru",
                previous: "Nakuru",
                label: VerdictLabel::Legitimate,
                reasons: &[ALL_CHECKS_PASSED],
                risk_score: 8,
                confidence: 91.2,
                verified: true,
            },
            SeedRow {
                id: "TXN003",
                at: (8, 45, 20),
                customer: "Sarah Wanjiku",
                amount: Decimal::from(45000),
                device: DeviceStatus::Trusted,
                location: "Kisumu",
                previous: "Eldoret",
                label: VerdictLabel::Flagged,
                reasons: &["location change >100km (Eldoret -> Kisumu)"],
                risk_score: 72,
                confidence: 79.4,
                verified: false,
            },
            SeedRow {
                id: "TXN002",
                at: (9, 15, 42),
                customer: "John Kamau",
                amount: Decimal::from(12500),
                device: DeviceStatus::Trusted,
                location: "Nairobi",
                previous: "Nairobi",
                label: VerdictLabel::Legitimate,
                reasons: &[ALL_CHECKS_PASSED],
                risk_score: 15,
                confidence: 88.7,
                verified: true,
            },
            SeedRow {
                id: "TXN001",
                at: (10, 30, 15),
                customer: "Amina Ochieng",
                amount: Decimal::from(75000),
                device: DeviceStatus::New,
                location: "Mombasa",
                previous: "Nairobi",
                label: VerdictLabel::Flagged,
                reasons: &[
                    "high amount (>50000)",
                    "new device detected",
                    "significant location change: 480km (Nairobi -> Mombasa)",
                ],
                risk_score: 85,
                confidence: 92.3,
                verified: false,
            },
        ];

        Self {
            records: seeds.iter().map(SeedRow::to_record).collect(),
            issued: 4,
        }
    }

    /// Issue the next sequence id ("TXN005" after the seeds)
    pub fn next_transaction_id(&mut self) -> String {
        self.issued += 1;
        format!("TXN{:03}", self.issued)
    }

    pub fn append(&mut self, record: AuditRecord) {
        tracing::debug!(
            transaction_id = %record.transaction_id,
            label = %record.label,
            "Audit record appended"
        );
        self.records.push(record);
    }

    /// All records, newest first
    pub fn recent(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records. Ids keep counting up so they are never reused.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn filter(&self, filter: &AuditFilter) -> Vec<&AuditRecord> {
        let matching = self.recent().filter(|record| filter.matches(record));
        match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from_records(&self.records)
    }
}

struct SeedRow {
    id: &'static str,
    at: (u32, u32, u32),
    customer: &'static str,
    amount: Decimal,
    device: DeviceStatus,
    location: &'static str,
    previous: &'static str,
    label: VerdictLabel,
    reasons: &'static [&'static str],
    risk_score: u8,
    confidence: f64,
    verified: bool,
}

impl SeedRow {
    fn to_record(&self) -> AuditRecord {
        let (hour, minute, second) = self.at;
        let timestamp: DateTime<Utc> = Utc
            .with_ymd_and_hms(2024, 9, 20, hour, minute, second)
            .single()
            .unwrap_or_default();

        AuditRecord {
            id: Uuid::new_v4(),
            transaction_id: self.id.to_string(),
            timestamp,
            customer_name: self.customer.to_string(),
            input: TransactionInput {
                amount: self.amount,
                device_status: self.device,
                location: self.location.to_string(),
                previous_location: self.previous.to_string(),
            },
            label: self.label,
            reasons: self.reasons.iter().map(|r| r.to_string()).collect(),
            risk_score: Some(self.risk_score),
            ml_confidence: Some(self.confidence),
            biometric_verified: self.verified,
            verification: None,
        }
    }
}
