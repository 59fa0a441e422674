//! Simulated model confidence
//!
//! There is no model. The dashboard showed a random figure in [75.0, 95.0]
//! next to each verdict; it is kept for display only and never feeds a decision.

use fraudwatch_engine::RandomSource;

const MIN_TENTHS: i64 = 750;
const MAX_TENTHS: i64 = 950;

/// Uniform in [75.0, 95.0] with one decimal place
pub fn simulate_confidence(rng: &mut dyn RandomSource) -> f64 {
    rng.int_in(MIN_TENTHS, MAX_TENTHS) as f64 / 10.0
}
