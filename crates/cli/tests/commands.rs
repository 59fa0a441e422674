//! Command handlers and rendering

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

use fraudwatch_cli::{commands, AppContext, PolicyArg, Settings, VariantArg};
use fraudwatch_engine::{LabelPolicy, Variant, VerdictLabel};
use fraudwatch_session::{AuditFilter, SampleGenerator, Scenario};

fn settings() -> Settings {
    Settings {
        seed: Some(7),
        at: Some(Utc.with_ymd_and_hms(2024, 9, 20, 12, 0, 0).unwrap()),
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_evaluate_flagged_text() {
    let mut ctx = AppContext::new(&settings()).unwrap();
    let modalities = commands::resolve_modalities(&[]);

    let submission = commands::evaluate(
        &mut ctx,
        "Amina Ochieng",
        dec!(75000),
        "new",
        "Mombasa",
        "Nairobi",
        &modalities,
    )
    .await
    .unwrap();

    assert_eq!(submission.record.label, VerdictLabel::Flagged);
    assert_eq!(submission.record.transaction_id, "TXN001");
    assert!(submission.record.verification.is_some());

    let text = commands::render_submission(&submission, false).unwrap();
    assert!(text.contains("TXN001 | Amina Ochieng | FLAGGED"));
    assert!(text.contains("new device detected"));
    assert!(text.contains("480 km (table)"));
    assert!(text.contains("Biometric:"));
}

#[tokio::test]
async fn test_evaluate_rejects_unknown_device() {
    let mut ctx = AppContext::new(&settings()).unwrap();

    let result = commands::evaluate(
        &mut ctx,
        "Test User",
        dec!(100),
        "borrowed",
        "Nairobi",
        "Nairobi",
        &[],
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("borrowed"));
    assert!(ctx.monitor.log().is_empty());
}

#[tokio::test]
async fn test_scenario_json_output() {
    let mut ctx = AppContext::new(&settings()).unwrap();

    let submission = commands::scenario(&mut ctx, Scenario::Legit, &[]).await.unwrap();
    let text = commands::render_submission(&submission, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["record"]["label"], "legitimate");
    assert_eq!(value["record"]["customer_name"], "Test User");
    assert_eq!(value["verdict"]["reasons"][0], "all checks passed");
}

#[tokio::test]
async fn test_simulate_and_history() {
    let mut ctx = AppContext::new(&settings()).unwrap().with_seed_records();
    let modalities = commands::resolve_modalities(&[]);

    let submissions = commands::simulate(&mut ctx, 6, &modalities).await.unwrap();
    assert_eq!(submissions.len(), 6);

    let all = commands::history(&ctx, &AuditFilter::new());
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].transaction_id, "TXN010");

    let limited = commands::history(&ctx, &AuditFilter::new().with_limit(3));
    let stats = ctx.monitor.stats();
    let text = commands::render_history(&limited, &stats, false).unwrap();
    assert!(text.starts_with("📊 10 transactions"));
    assert_eq!(text.lines().count(), 4);

    let json = commands::render_history(&limited, &stats, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["total"], 10);
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_seeded_runs_are_reproducible() {
    let mut first = AppContext::new(&settings()).unwrap();
    let mut second = AppContext::new(&settings()).unwrap();

    let a = commands::simulate(&mut first, 5, &[]).await.unwrap();
    let b = commands::simulate(&mut second, 5, &[]).await.unwrap();

    let verdicts = |subs: &[fraudwatch_session::Submission]| {
        subs.iter().map(|s| s.verdict.clone()).collect::<Vec<_>>()
    };
    assert_eq!(verdicts(&a), verdicts(&b));
}

#[tokio::test]
async fn test_simulate_with_custom_generator() {
    let generator = SampleGenerator::new()
        .with_towns(vec!["Lamu".to_string(), "Garissa".to_string()])
        .with_amount_range(100, 200);
    let mut ctx = AppContext::new(&settings()).unwrap().with_generator(generator);

    let submissions = commands::simulate(&mut ctx, 8, &[]).await.unwrap();

    for submission in &submissions {
        let input = &submission.record.input;
        assert!(["Lamu", "Garissa"].contains(&input.location.as_str()));
        assert!(input.amount >= dec!(100) && input.amount <= dec!(200));
    }
}

#[test]
fn test_flags_override_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"variant":"scored","label_policy":"score_threshold","flag_score_threshold":40}}"#
    )
    .unwrap();

    let loaded = Settings {
        config: Some(file.path().to_path_buf()),
        ..Settings::default()
    };
    let config = loaded.engine_config().unwrap();
    assert_eq!(config.label_policy, LabelPolicy::ScoreThreshold);
    assert_eq!(config.flag_score_threshold, 40);

    let overridden = Settings {
        policy: Some(PolicyArg::AnyFlag),
        variant: Some(VariantArg::Basic),
        ..loaded
    };
    let config = overridden.engine_config().unwrap();
    assert_eq!(config.label_policy, LabelPolicy::AnyFlag);
    assert_eq!(config.variant, Variant::Basic);
    assert_eq!(config.flag_score_threshold, 40);
}

#[test]
fn test_invalid_combination_rejected() {
    let settings = Settings {
        policy: Some(PolicyArg::ScoreThreshold),
        variant: Some(VariantArg::Basic),
        ..Settings::default()
    };
    assert!(AppContext::new(&settings).is_err());
}

#[test]
fn test_custom_distance_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{ "from": "Lamu", "to": "Garissa", "km": 390 }}]"#).unwrap();

    let settings = Settings {
        distances: Some(file.path().to_path_buf()),
        ..settings()
    };
    let ctx = AppContext::new(&settings).unwrap();
    let entries = commands::distances(&ctx);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].km, 390);

    let text = commands::render_distances(&entries, false).unwrap();
    assert!(text.contains("390 km"));
}

#[test]
fn test_missing_config_file_reports_path() {
    let settings = Settings {
        config: Some("/nonexistent/fraudwatch.json".into()),
        ..Settings::default()
    };
    let err = settings.engine_config().unwrap_err();
    assert!(err.to_string().contains("/nonexistent/fraudwatch.json"));
}
