//! Planning policy: capacities, costs, safety stock and initial conditions.
//!
//! Every field has a default, so a policy file only lists what it changes:
//!
//! ```toml
//! capacity_a = 20
//! capacity_b = 20
//! big_m = 20
//! safety_fraction = 0.0
//! initial_line_state = "A"
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{PlanError, Product};

/// Policy constants handed to the model builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConstants {
    /// Weekly production ceiling for A
    pub capacity_a: u32,
    /// Weekly production ceiling for B
    pub capacity_b: u32,
    /// Fraction of a week's demand that must already be in stock when the week starts
    pub safety_fraction: f64,
    /// Big-M of the line-selection constraints; at least the larger capacity
    pub big_m: u32,
    /// Production cost per unit of A
    pub cost_a: f64,
    /// Production cost per unit of B
    pub cost_b: f64,
    /// Holding cost per unit of A per week
    pub hold_rate_a: f64,
    /// Holding cost per unit of B per week
    pub hold_rate_b: f64,
    /// Fixed cost of switching the line between products
    pub changeover_cost: f64,
    pub initial_inventory_a: u32,
    pub initial_inventory_b: u32,
    /// Product the line is configured for in week 0
    pub initial_line_state: Product,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            capacity_a: 100,
            capacity_b: 80,
            safety_fraction: 0.8,
            big_m: 1000,
            cost_a: 225.0,
            cost_b: 310.0,
            hold_rate_a: 0.00375 * 225.0,
            hold_rate_b: 0.195 / 52.0 * 310.0,
            changeover_cost: 500.0,
            initial_inventory_a: 125,
            initial_inventory_b: 143,
            initial_line_state: Product::A,
        }
    }
}

impl PolicyConstants {
    pub fn capacity(&self, product: Product) -> u32 {
        match product {
            Product::A => self.capacity_a,
            Product::B => self.capacity_b,
        }
    }

    pub fn unit_cost(&self, product: Product) -> f64 {
        match product {
            Product::A => self.cost_a,
            Product::B => self.cost_b,
        }
    }

    pub fn hold_rate(&self, product: Product) -> f64 {
        match product {
            Product::A => self.hold_rate_a,
            Product::B => self.hold_rate_b,
        }
    }

    pub fn initial_inventory(&self, product: Product) -> u32 {
        match product {
            Product::A => self.initial_inventory_a,
            Product::B => self.initial_inventory_b,
        }
    }

    /// Smallest big-M that keeps the line-selection constraints exact.
    pub fn min_big_m(&self) -> u32 {
        self.capacity_a.max(self.capacity_b)
    }

    /// The same policy with big-M tightened to [`Self::min_big_m`].
    pub fn tight_big_m(mut self) -> Self {
        self.big_m = self.min_big_m();
        self
    }

    /// Reject values that would make the model meaningless or infeasible by construction.
    pub fn validate(&self) -> Result<(), PlanError> {
        let invalid = |msg: String| Err(PlanError::InvalidInput(msg));

        for product in Product::ALL {
            if self.capacity(product) == 0 {
                return invalid(format!("capacity for product {} must be positive", product));
            }
        }

        if !(0.0..=1.0).contains(&self.safety_fraction) {
            return invalid(format!(
                "safety fraction must lie in [0, 1], got {}",
                self.safety_fraction
            ));
        }

        if self.big_m < self.min_big_m() {
            return invalid(format!(
                "big-M {} is smaller than the weekly capacity {}",
                self.big_m,
                self.min_big_m()
            ));
        }

        let positive = [
            ("cost_a", self.cost_a),
            ("cost_b", self.cost_b),
            ("hold_rate_a", self.hold_rate_a),
            ("hold_rate_b", self.hold_rate_b),
            ("changeover_cost", self.changeover_cost),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return invalid(format!("{} must be a positive number, got {}", name, value));
        }

        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PlanError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
