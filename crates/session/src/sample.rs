//! Sample data - generated demo traffic and quick-test scenarios

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use fraudwatch_core::{DeviceStatus, TransactionInput};
use fraudwatch_engine::RandomSource;

/// Customers used for generated traffic
pub const CUSTOMERS: [&str; 5] = ["Alex M.", "Beth K.", "Chris N.", "Diana W.", "Eric O."];

/// Towns used for generated traffic
pub const TOWNS: [&str; 5] = ["Nairobi", "Mombasa", "Kisumu", "Eldoret", "Nakuru"];

/// A customer name plus the transaction they submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleTransaction {
    pub customer_name: String,
    pub input: TransactionInput,
}

/// Random demo traffic
///
/// Only the inputs are random. Labels always come from the engine.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    customers: Vec<String>,
    towns: Vec<String>,
    min_amount: i64,
    max_amount: i64,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self {
            customers: CUSTOMERS.iter().map(|c| c.to_string()).collect(),
            towns: TOWNS.iter().map(|t| t.to_string()).collect(),
            min_amount: 500,
            max_amount: 80_000,
        }
    }
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-unit amount range (inclusive)
    pub fn with_amount_range(mut self, min: u32, max: u32) -> Self {
        self.min_amount = i64::from(min.min(max));
        self.max_amount = i64::from(max.max(min));
        self
    }

    /// Replace the town list. Blank names are dropped; an empty list keeps the defaults.
    pub fn with_towns(mut self, towns: Vec<String>) -> Self {
        let towns: Vec<String> = towns
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !towns.is_empty() {
            self.towns = towns;
        }
        self
    }

    pub fn generate(&self, rng: &mut dyn RandomSource) -> SampleTransaction {
        let customer_name = pick(&self.customers, rng).to_string();
        let amount = Decimal::from(rng.int_in(self.min_amount, self.max_amount));
        let device_status = match rng.int_in(0, 2) {
            0 => DeviceStatus::Trusted,
            1 => DeviceStatus::New,
            _ => DeviceStatus::Suspicious,
        };
        let location = pick(&self.towns, rng).to_string();
        let previous_location = pick(&self.towns, rng).to_string();

        SampleTransaction {
            customer_name,
            input: TransactionInput {
                amount,
                device_status,
                location,
                previous_location,
            },
        }
    }

    pub fn generate_batch(
        &self,
        rng: &mut dyn RandomSource,
        count: usize,
    ) -> Vec<SampleTransaction> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

fn pick<'a>(items: &'a [String], rng: &mut dyn RandomSource) -> &'a str {
    let last = items.len().saturating_sub(1) as i64;
    let index = rng.int_in(0, last).clamp(0, last) as usize;
    items.get(index).map(String::as_str).unwrap_or_default()
}

/// Canned quick-test transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// 85,000 from a new device, Nairobi to Mombasa
    Fraud,
    /// 15,000 from a trusted device without moving
    Legit,
}

impl Scenario {
    pub fn customer(&self) -> &'static str {
        "Test User"
    }

    pub fn input(&self) -> TransactionInput {
        match self {
            Scenario::Fraud => TransactionInput {
                amount: Decimal::from(85_000),
                device_status: DeviceStatus::New,
                location: "Mombasa".to_string(),
                previous_location: "Nairobi".to_string(),
            },
            Scenario::Legit => TransactionInput {
                amount: Decimal::from(15_000),
                device_status: DeviceStatus::Trusted,
                location: "Nairobi".to_string(),
                previous_location: "Nairobi".to_string(),
            },
        }
    }

    pub fn sample(&self) -> SampleTransaction {
        SampleTransaction {
            customer_name: self.customer().to_string(),
            input: self.input(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fraudwatch_engine::{
        DecisionEngine, DistanceTable, FixedClock, FixedSource, RngSource, SequenceSource,
        VerdictLabel,
    };
    use std::str::FromStr;

    #[test]
    fn test_generated_fields_in_range() {
        let generator = SampleGenerator::new();
        let mut rng = RngSource::seeded(11);

        for sample in generator.generate_batch(&mut rng, 200) {
            assert!(CUSTOMERS.contains(&sample.customer_name.as_str()));
            assert!(TOWNS.contains(&sample.input.location.as_str()));
            assert!(TOWNS.contains(&sample.input.previous_location.as_str()));
            assert!(sample.input.amount >= Decimal::from(500));
            assert!(sample.input.amount <= Decimal::from(80_000));
            assert!(sample.input.validate().is_ok());
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let generator = SampleGenerator::new();
        let a = generator.generate_batch(&mut RngSource::seeded(3), 10);
        let b = generator.generate_batch(&mut RngSource::seeded(3), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_generation() {
        // customer, amount, device, location, previous
        let mut rng = SequenceSource::new(vec![1, 42_000, 2, 0, 3]);
        let sample = SampleGenerator::new().generate(&mut rng);

        assert_eq!(sample.customer_name, "Beth K.");
        assert_eq!(sample.input.amount, Decimal::from(42_000));
        assert_eq!(sample.input.device_status, DeviceStatus::Suspicious);
        assert_eq!(sample.input.location, "Nairobi");
        assert_eq!(sample.input.previous_location, "Eldoret");
    }

    #[test]
    fn test_amount_range_override() {
        let generator = SampleGenerator::new().with_amount_range(900, 100);
        let sample = generator.generate(&mut FixedSource::new(0));
        assert_eq!(sample.input.amount, Decimal::from(100));
    }

    #[test]
    fn test_custom_towns() {
        let towns = vec![" Lamu ".to_string(), "Garissa".to_string(), "  ".to_string()];
        let generator = SampleGenerator::new().with_towns(towns);
        let mut rng = RngSource::seeded(5);

        for sample in generator.generate_batch(&mut rng, 50) {
            assert!(["Lamu", "Garissa"].contains(&sample.input.location.as_str()));
            assert!(["Lamu", "Garissa"].contains(&sample.input.previous_location.as_str()));
        }
    }

    #[test]
    fn test_empty_towns_keep_defaults() {
        let generator = SampleGenerator::new().with_towns(vec![]);
        let sample = generator.generate(&mut FixedSource::new(0));
        assert_eq!(sample.input.location, TOWNS[0]);

        let blank = SampleGenerator::new().with_towns(vec![" ".to_string()]);
        let sample = blank.generate(&mut FixedSource::new(0));
        assert_eq!(sample.input.location, TOWNS[0]);
    }

    #[test]
    fn test_scenario_sample_matches_input() {
        let sample = Scenario::Fraud.sample();
        assert_eq!(sample.customer_name, "Test User");
        assert_eq!(sample.input, Scenario::Fraud.input());
        assert_eq!(sample.input.location, "Mombasa");
    }

    #[test]
    fn test_scenarios_evaluate_as_named() {
        let engine = DecisionEngine::default();
        let table = DistanceTable::kenya_defaults();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 20, 12, 0, 0).unwrap());

        let fraud = engine
            .evaluate(&Scenario::Fraud.input(), &table, &mut FixedSource::new(0), &clock)
            .unwrap();
        let legit = engine
            .evaluate(&Scenario::Legit.input(), &table, &mut FixedSource::new(0), &clock)
            .unwrap();

        assert_eq!(fraud.label, VerdictLabel::Flagged);
        assert_eq!(legit.label, VerdictLabel::Legitimate);
    }

    #[test]
    fn test_scenario_parse() {
        assert_eq!(Scenario::from_str("fraud").unwrap(), Scenario::Fraud);
        assert_eq!(Scenario::from_str("LEGIT").unwrap(), Scenario::Legit);
        assert!(Scenario::from_str("maybe").is_err());
    }
}
