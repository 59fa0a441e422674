//! Biometric verification - an external, non-deterministic capability
//!
//! A flagged transaction asks the customer to complete an out-of-band check.
//! The engine never calls a [`Verifier`]; the session layer does, and only
//! records the boolean outcome.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use fraudwatch_engine::RandomSource;

/// Kind of biometric check
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum BiometricModality {
    Fingerprint,
    Voice,
    Face,
}

/// External verification capability
///
/// Implementations may block on a human, a device, or a remote service.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verifier name for logging
    fn name(&self) -> &str;

    /// Attempt one check. `true` means the customer passed.
    async fn attempt_verification(&self, modality: BiometricModality) -> bool;
}

/// One attempt and its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAttempt {
    pub modality: BiometricModality,
    pub success: bool,
}

/// All attempts made for one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub attempts: Vec<VerificationAttempt>,
    pub verified: bool,
}

/// Try each modality in order until one succeeds
pub async fn verify_with(
    verifier: &dyn Verifier,
    modalities: &[BiometricModality],
) -> VerificationRecord {
    let mut record = VerificationRecord::default();

    for &modality in modalities {
        let success = verifier.attempt_verification(modality).await;
        tracing::info!(
            verifier = verifier.name(),
            modality = %modality,
            success,
            "Biometric verification attempt"
        );
        record.attempts.push(VerificationAttempt { modality, success });
        if success {
            record.verified = true;
            break;
        }
    }

    record
}

/// Random pass/fail with a configurable success probability per modality
pub struct SimulatedVerifier {
    fingerprint: f64,
    voice: f64,
    face: f64,
    /// Simulated scan time
    latency: Duration,
    rng: Mutex<Box<dyn RandomSource + Send>>,
}

impl SimulatedVerifier {
    /// Default success rates: fingerprint 75%, voice 85%, face 80%
    pub fn new(rng: impl RandomSource + Send + 'static) -> Self {
        Self {
            fingerprint: 0.75,
            voice: 0.85,
            face: 0.80,
            latency: Duration::ZERO,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Override success probabilities (each clamped to [0, 1])
    pub fn with_success_rates(mut self, fingerprint: f64, voice: f64, face: f64) -> Self {
        self.fingerprint = fingerprint.clamp(0.0, 1.0);
        self.voice = voice.clamp(0.0, 1.0);
        self.face = face.clamp(0.0, 1.0);
        self
    }

    /// Same probability for every modality
    pub fn with_uniform_rate(self, rate: f64) -> Self {
        self.with_success_rates(rate, rate, rate)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Success probability for a modality
    pub fn success_rate(&self, modality: BiometricModality) -> f64 {
        match modality {
            BiometricModality::Fingerprint => self.fingerprint,
            BiometricModality::Voice => self.voice,
            BiometricModality::Face => self.face,
        }
    }
}

#[async_trait]
impl Verifier for SimulatedVerifier {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn attempt_verification(&self, modality: BiometricModality) -> bool {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let roll = self.rng.lock().unwrap().unit();
        roll < self.success_rate(modality)
    }
}
