//! Transaction Monitor - orchestrates evaluation, verification and logging

use serde::Serialize;

use fraudwatch_core::TransactionInput;
use fraudwatch_engine::{Clock, DecisionEngine, DistanceTable, RandomSource, VerdictResult};

use crate::confidence::simulate_confidence;
use crate::error::{SessionError, SessionResult};
use crate::log::AuditLog;
use crate::record::AuditRecord;
use crate::sample::SampleGenerator;
use crate::stats::SessionStats;
use crate::verification::{verify_with, BiometricModality, Verifier};

/// Outcome of one submission
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// The row appended to the audit log
    pub record: AuditRecord,
    /// Full engine output, including findings and distance
    pub verdict: VerdictResult,
}

/// Owns everything around the stateless engine
///
/// The engine only decides. The monitor draws randomness, reads the clock,
/// asks for biometrics on flagged verdicts and appends to the log.
pub struct TransactionMonitor {
    engine: DecisionEngine,
    table: DistanceTable,
    log: AuditLog,
    generator: SampleGenerator,
    rng: Box<dyn RandomSource + Send>,
    clock: Box<dyn Clock>,
}

impl TransactionMonitor {
    pub fn new(
        engine: DecisionEngine,
        table: DistanceTable,
        rng: impl RandomSource + Send + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            engine,
            table,
            log: AuditLog::new(),
            generator: SampleGenerator::default(),
            rng: Box::new(rng),
            clock: Box::new(clock),
        }
    }

    /// Start from an existing log (e.g. [`AuditLog::with_seed_records`])
    pub fn with_log(mut self, log: AuditLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_generator(mut self, generator: SampleGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn log(&self) -> &AuditLog {
        &self.log
    }

    pub fn stats(&self) -> SessionStats {
        self.log.stats()
    }

    /// Evaluate, verify if flagged, and record one transaction.
    ///
    /// Invalid input is rejected before a transaction id is issued.
    pub async fn submit(
        &mut self,
        customer: &str,
        input: TransactionInput,
        verifier: &dyn Verifier,
        modalities: &[BiometricModality],
    ) -> SessionResult<Submission> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(SessionError::MissingCustomer);
        }

        let verdict = self.engine.evaluate(
            &input,
            &self.table,
            self.rng.as_mut(),
            self.clock.as_ref(),
        )?;

        let timestamp = verdict.evaluated_at.unwrap_or_else(|| self.clock.now());
        let transaction_id = self.log.next_transaction_id();
        let mut record =
            AuditRecord::from_verdict(transaction_id, timestamp, customer, input, &verdict);

        if self.engine.config().is_scored() {
            record = record.with_confidence(simulate_confidence(self.rng.as_mut()));
        }

        if verdict.is_flagged() {
            let verification = verify_with(verifier, modalities).await;
            record = record.with_verification(verification);
        }

        tracing::info!(
            transaction_id = %record.transaction_id,
            customer = %record.customer_name,
            label = %record.label,
            risk_score = ?record.risk_score,
            verified = record.biometric_verified,
            "Transaction processed"
        );

        self.log.append(record.clone());
        Ok(Submission { record, verdict })
    }

    /// Submit `count` generated transactions
    pub async fn simulate(
        &mut self,
        count: usize,
        verifier: &dyn Verifier,
        modalities: &[BiometricModality],
    ) -> SessionResult<Vec<Submission>> {
        let mut submissions = Vec::with_capacity(count);
        for _ in 0..count {
            let sample = self.generator.generate(self.rng.as_mut());
            let submission = self
                .submit(&sample.customer_name, sample.input, verifier, modalities)
                .await?;
            submissions.push(submission);
        }
        Ok(submissions)
    }
}
