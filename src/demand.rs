//! Weekly demand forecast for both machine types.
//!
//! A series covers weeks `0..=N`. Week 0 is the initial-condition week and
//! its demand is never used; weeks `1..=N` are planned.
//!
//! Series can be read from CSV with one row per week:
//!
//! ```text
//! week,demand_a,demand_b
//! 0,0,0
//! 1,55,38
//! 2,55,38
//! ```

use std::{fs, io::Read, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::{PlanError, Product};

/// Forecast used when no demand file is given: nine planned weeks.
const DEFAULT_DEMAND_A: [i64; 10] = [0, 55, 55, 44, 0, 45, 45, 36, 35, 35];
const DEFAULT_DEMAND_B: [i64; 10] = [0, 38, 38, 30, 0, 48, 48, 58, 57, 58];

/// Two per-week order volumes, one per product.
///
/// Values are kept signed so that malformed input survives parsing and is
/// rejected by [`DemandSeries::validate`] with a precise message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandSeries {
    demand: [Vec<i64>; 2],
}

#[derive(Debug, Deserialize)]
struct DemandRecord {
    week: usize,
    demand_a: i64,
    demand_b: i64,
}

impl DemandSeries {
    pub fn new(demand_a: Vec<i64>, demand_b: Vec<i64>) -> Self {
        Self {
            demand: [demand_a, demand_b],
        }
    }

    /// The nine-week forecast the planner ships with.
    pub fn default_forecast() -> Self {
        Self::new(DEFAULT_DEMAND_A.to_vec(), DEFAULT_DEMAND_B.to_vec())
    }

    /// Number of planned weeks `N` (the series holds `N + 1` entries).
    pub fn weeks(&self) -> usize {
        self.demand[0].len().saturating_sub(1)
    }

    /// Demand of `product` in `week`, or 0 outside the series.
    pub fn get(&self, product: Product, week: usize) -> i64 {
        self.demand[product.index()].get(week).copied().unwrap_or(0)
    }

    pub fn series(&self, product: Product) -> &[i64] {
        &self.demand[product.index()]
    }

    /// Check the shape and sign of the series.
    pub fn validate(&self) -> Result<(), PlanError> {
        let [a, b] = &self.demand;
        if a.len() != b.len() {
            return Err(PlanError::InvalidInput(format!(
                "demand series lengths differ: A has {} weeks, B has {}",
                a.len(),
                b.len()
            )));
        }
        if a.len() < 2 {
            return Err(PlanError::InvalidInput(
                "demand series must cover week 0 and at least one planned week".into(),
            ));
        }
        for product in Product::ALL {
            if let Some((week, value)) = self
                .series(product)
                .iter()
                .enumerate()
                .find(|(_, value)| **value < 0)
            {
                return Err(PlanError::InvalidInput(format!(
                    "negative demand {} for product {} in week {}",
                    value, product, week
                )));
            }
        }
        Ok(())
    }

    /// Read a `week,demand_a,demand_b` CSV. Weeks must count up from 0.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PlanError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut demand_a = Vec::new();
        let mut demand_b = Vec::new();

        for (expected_week, record) in csv_reader.deserialize::<DemandRecord>().enumerate() {
            let record = record?;
            if record.week != expected_week {
                return Err(PlanError::InvalidInput(format!(
                    "demand rows must list weeks 0, 1, 2, ... in order; found week {} at row {}",
                    record.week,
                    expected_week + 1
                )));
            }
            demand_a.push(record.demand_a);
            demand_b.push(record.demand_b);
        }

        debug!(weeks = demand_a.len(), "read demand series");
        Ok(Self::new(demand_a, demand_b))
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, PlanError> {
        Self::from_csv_reader(fs::File::open(path)?)
    }
}
