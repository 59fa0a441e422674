//! Threshold rules
//!
//! Each rule is a small pure function returning at most one [`Finding`].
//! All thresholds are strict "greater than".

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::Decimal;

use fraudwatch_core::{DeviceStatus, TransactionInput};

use crate::config::EngineConfig;
use crate::decision::{Distance, DistanceSource, Finding, RuleId};
use crate::distance::DistanceTable;
use crate::random::RandomSource;

/// Rule 1: amount tier
pub fn amount_tier(amount: Decimal, config: &EngineConfig) -> Option<Finding> {
    let weights = &config.weights;
    if amount > config.extreme_amount {
        Some(Finding::flag(
            RuleId::ExtremeAmount,
            weights.extreme_amount,
            format!("extremely high amount (>{})", config.extreme_amount),
        ))
    } else if amount > config.high_amount {
        Some(Finding::flag(
            RuleId::HighAmount,
            weights.high_amount,
            format!("high amount (>{})", config.high_amount),
        ))
    } else if amount > config.elevated_amount {
        Some(Finding::weight_only(
            RuleId::ElevatedAmount,
            weights.elevated_amount,
        ))
    } else {
        None
    }
}

/// Rule 2: device risk
pub fn device_risk(status: DeviceStatus, config: &EngineConfig) -> Option<Finding> {
    match status {
        DeviceStatus::Trusted => None,
        DeviceStatus::New => Some(Finding::flag(
            RuleId::NewDevice,
            config.weights.new_device,
            "new device detected",
        )),
        DeviceStatus::Suspicious => Some(Finding::flag(
            RuleId::SuspiciousDevice,
            config.weights.suspicious_device,
            "suspicious device flagged",
        )),
    }
}

/// Resolve the distance between previous and current location.
///
/// Unchanged location is 0 km with no random draw. A pair missing from the
/// table draws a value in the configured fallback range from `rng`. That
/// value is deliberate noise injection standing in for an unknown route,
/// not a geodesic calculation.
pub fn resolve_distance(
    tx: &TransactionInput,
    table: &DistanceTable,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> Distance {
    if !tx.is_relocation() {
        return Distance {
            km: 0,
            source: DistanceSource::SameLocation,
        };
    }

    if let Some(km) = table.lookup(tx.current_location(), tx.last_location()) {
        return Distance {
            km,
            source: DistanceSource::Table,
        };
    }

    let drawn = rng.int_in(
        i64::from(config.fallback_distance_min),
        i64::from(config.fallback_distance_max),
    );
    let km = u32::try_from(drawn).unwrap_or(config.fallback_distance_min);
    tracing::warn!(
        from = tx.last_location(),
        to = tx.current_location(),
        km,
        "Distance pair missing, injecting fallback distance"
    );
    Distance {
        km,
        source: DistanceSource::Fallback,
    }
}

/// Rule 3: location jump tier
pub fn location_jump(
    distance: Distance,
    tx: &TransactionInput,
    config: &EngineConfig,
) -> Option<Finding> {
    let weights = &config.weights;
    let km = distance.km;
    let route = format!(
        "{}km ({} -> {})",
        km,
        tx.last_location(),
        tx.current_location()
    );

    if km > config.extreme_distance_km {
        Some(Finding::flag(
            RuleId::ExtremeLocationJump,
            weights.extreme_distance,
            format!("extreme location jump: {}", route),
        ))
    } else if km > config.significant_distance_km {
        Some(Finding::flag(
            RuleId::SignificantLocationChange,
            weights.significant_distance,
            format!("significant location change: {}", route),
        ))
    } else if km > config.moderate_distance_km {
        Some(Finding::flag(
            RuleId::ModerateLocationChange,
            weights.moderate_distance,
            format!("location change: {}", route),
        ))
    } else {
        None
    }
}

/// Rule 4: round-number pattern, a heuristic proxy for structuring
pub fn round_number(amount: Decimal, config: &EngineConfig) -> Option<Finding> {
    let is_round = (amount % config.round_number_unit).is_zero();
    if is_round && amount > config.round_number_floor {
        Some(Finding::flag(
            RuleId::RoundNumber,
            config.weights.round_number,
            "round-number pattern",
        ))
    } else {
        None
    }
}

/// Local hour of `at` after applying the configured UTC offset
pub fn local_hour(at: DateTime<Utc>, config: &EngineConfig) -> u32 {
    (at + Duration::minutes(i64::from(config.utc_offset_minutes))).hour()
}

/// Rule 5 (scored variant): transaction outside active hours
pub fn off_hours(at: DateTime<Utc>, config: &EngineConfig) -> Option<Finding> {
    let hour = local_hour(at, config);
    if hour < config.active_hours_start || hour > config.active_hours_end {
        Some(Finding::flag(
            RuleId::OffHours,
            config.weights.off_hours,
            format!("unusual transaction time ({:02}:00)", hour),
        ))
    } else {
        None
    }
}
