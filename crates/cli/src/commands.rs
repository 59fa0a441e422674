//! CLI commands
//!
//! Handlers return data; `render_*` turns it into text or JSON so the
//! binary only prints.

use rust_decimal::Decimal;
use serde_json::json;
use std::fmt::Write as _;

use fraudwatch_core::TransactionInput;
use fraudwatch_engine::{DistanceEntry, DistanceSource};
use fraudwatch_session::{
    AuditFilter, AuditRecord, BiometricModality, Scenario, SessionStats, Submission,
};

use crate::context::AppContext;

/// Modalities to try, in order. All three when none were requested.
pub fn resolve_modalities(requested: &[BiometricModality]) -> Vec<BiometricModality> {
    if requested.is_empty() {
        vec![
            BiometricModality::Fingerprint,
            BiometricModality::Voice,
            BiometricModality::Face,
        ]
    } else {
        requested.to_vec()
    }
}

/// Evaluate one transaction typed on the command line
pub async fn evaluate(
    ctx: &mut AppContext,
    customer: &str,
    amount: Decimal,
    device: &str,
    location: &str,
    previous_location: &str,
    modalities: &[BiometricModality],
) -> Result<Submission, anyhow::Error> {
    let input = TransactionInput::from_raw(amount, device, location, previous_location)?;
    let submission = ctx
        .monitor
        .submit(customer, input, &ctx.verifier, modalities)
        .await?;
    Ok(submission)
}

/// Run a canned quick-test transaction
pub async fn scenario(
    ctx: &mut AppContext,
    scenario: Scenario,
    modalities: &[BiometricModality],
) -> Result<Submission, anyhow::Error> {
    let sample = scenario.sample();
    let submission = ctx
        .monitor
        .submit(&sample.customer_name, sample.input, &ctx.verifier, modalities)
        .await?;
    Ok(submission)
}

/// Submit `count` generated transactions
pub async fn simulate(
    ctx: &mut AppContext,
    count: usize,
    modalities: &[BiometricModality],
) -> Result<Vec<Submission>, anyhow::Error> {
    let submissions = ctx
        .monitor
        .simulate(count, &ctx.verifier, modalities)
        .await?;
    Ok(submissions)
}

/// Audit log rows matching `filter`, newest first
pub fn history<'a>(ctx: &'a AppContext, filter: &AuditFilter) -> Vec<&'a AuditRecord> {
    ctx.monitor.log().filter(filter)
}

/// Known location pairs
pub fn distances(ctx: &AppContext) -> Vec<DistanceEntry> {
    ctx.monitor.table().entries().collect()
}

pub fn render_submission(submission: &Submission, as_json: bool) -> Result<String, anyhow::Error> {
    if as_json {
        return Ok(serde_json::to_string_pretty(submission)?);
    }

    let record = &submission.record;
    let verdict = &submission.verdict;
    let mut out = String::new();

    let icon = if record.is_flagged() { "🚨" } else { "✅" };
    writeln!(
        out,
        "{} {} | {} | {}",
        icon,
        record.transaction_id,
        record.customer_name,
        record.label.to_string().to_uppercase()
    )?;
    writeln!(
        out,
        "   Amount: {} ({} device, {} -> {})",
        record.input.amount,
        record.input.device_status,
        record.input.previous_location,
        record.input.location
    )?;
    writeln!(out, "   Reasons: {}", record.reasons_line())?;
    if let (Some(score), Some(band)) = (verdict.risk_score, verdict.risk_band) {
        writeln!(out, "   Risk score: {} ({})", score, band)?;
    }
    writeln!(
        out,
        "   Distance: {} km ({})",
        verdict.distance.km,
        source_label(verdict.distance.source)
    )?;
    if let Some(confidence) = record.ml_confidence {
        writeln!(out, "   Model confidence: {:.1}%", confidence)?;
    }
    if let Some(verification) = &record.verification {
        let attempts: Vec<String> = verification
            .attempts
            .iter()
            .map(|a| format!("{} {}", a.modality, if a.success { "✅" } else { "❌" }))
            .collect();
        let outcome = if verification.verified { "verified" } else { "not verified" };
        writeln!(out, "   Biometric: {} -> {}", attempts.join(", "), outcome)?;
    }

    Ok(out)
}

pub fn render_history(
    records: &[&AuditRecord],
    stats: &SessionStats,
    as_json: bool,
) -> Result<String, anyhow::Error> {
    if as_json {
        let value = json!({
            "stats": stats,
            "risk_level": stats.risk_level(),
            "records": records,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "📊 {} transactions, {} flagged ({:.1}%), risk level: {}",
        stats.total,
        stats.flagged,
        stats.fraud_rate,
        stats.risk_level()
    )?;

    for record in records {
        let score = record
            .risk_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let verified = if record.biometric_verified { "verified" } else { "unverified" };
        writeln!(
            out,
            "{} | {} | {} | {} | {} | score {} | {} | {}",
            record.transaction_id,
            record.timestamp.format("%H:%M:%S"),
            record.customer_name,
            record.input.amount,
            record.label,
            score,
            verified,
            record.reasons_line()
        )?;
    }

    Ok(out)
}

pub fn render_distances(entries: &[DistanceEntry], as_json: bool) -> Result<String, anyhow::Error> {
    if as_json {
        return Ok(serde_json::to_string_pretty(entries)?);
    }

    let mut out = String::new();
    for entry in entries {
        writeln!(out, "{:<10} <-> {:<10} {:>5} km", entry.from, entry.to, entry.km)?;
    }
    Ok(out)
}

fn source_label(source: DistanceSource) -> &'static str {
    match source {
        DistanceSource::SameLocation => "same location",
        DistanceSource::Table => "table",
        DistanceSource::Fallback => "estimated",
    }
}
