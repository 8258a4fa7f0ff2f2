//! The weekly production plan read back from a solved model.

use crate::{DemandSeries, PolicyConstants, Product};

/// Whether the plan is proven cost-minimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanQuality {
    ProvenOptimal,
    /// Best plan found before the solver's time limit; optimality not proven.
    BestFound,
}

/// One week of the plan.
///
/// Week 0 only holds initial conditions: its production and changeover
/// entries are `None` ("not applicable"), which is different from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub week: usize,
    pub prod_a: Option<u32>,
    pub prod_b: Option<u32>,
    pub stock_a: u32,
    pub stock_b: u32,
    /// Product the line is configured for
    pub line: Product,
    pub changeover: Option<bool>,
}

impl WeekRow {
    pub fn production(&self, product: Product) -> Option<u32> {
        match product {
            Product::A => self.prod_a,
            Product::B => self.prod_b,
        }
    }

    pub fn stock(&self, product: Product) -> u32 {
        match product {
            Product::A => self.stock_a,
            Product::B => self.stock_b,
        }
    }
}

/// Production, stock and line configuration for weeks `0..=N`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPlan {
    rows: Vec<WeekRow>,
    objective: f64,
    quality: PlanQuality,
}

impl WeeklyPlan {
    pub fn new(rows: Vec<WeekRow>, objective: f64, quality: PlanQuality) -> Self {
        Self {
            rows,
            objective,
            quality,
        }
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn week(&self, week: usize) -> Option<&WeekRow> {
        self.rows.get(week)
    }

    /// Objective value reported by the solver.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn quality(&self) -> PlanQuality {
        self.quality
    }

    pub fn changeovers(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.changeover == Some(true))
            .count()
    }

    /// Production, holding and changeover cost of the plan under `policy`.
    pub fn total_cost(&self, policy: &PolicyConstants) -> f64 {
        let planned = self.rows.iter().skip(1);

        let production: f64 = planned
            .clone()
            .flat_map(|row| {
                Product::ALL
                    .map(|p| row.production(p).unwrap_or(0) as f64 * policy.unit_cost(p))
            })
            .sum();
        let holding: f64 = planned
            .flat_map(|row| Product::ALL.map(|p| row.stock(p) as f64 * policy.hold_rate(p)))
            .sum();

        production + holding + self.changeovers() as f64 * policy.changeover_cost
    }

    /// Every way the plan breaks the planning rules for `demand` and `policy`.
    pub fn violations(&self, demand: &DemandSeries, policy: &PolicyConstants) -> Vec<String> {
        let mut found = Vec::new();

        if self.rows.len() != demand.weeks() + 1 {
            found.push(format!(
                "plan covers {} weeks, demand covers {}",
                self.rows.len(),
                demand.weeks() + 1
            ));
            return found;
        }

        let initial = &self.rows[0];
        if initial.line != policy.initial_line_state {
            found.push(format!(
                "week 0 line is {} instead of {}",
                initial.line, policy.initial_line_state
            ));
        }
        for p in Product::ALL {
            if initial.stock(p) != policy.initial_inventory(p) {
                found.push(format!(
                    "week 0 stock of {} is {} instead of {}",
                    p,
                    initial.stock(p),
                    policy.initial_inventory(p)
                ));
            }
            if initial.production(p).is_some() {
                found.push(format!("week 0 has production of {}", p));
            }
        }

        for (prev, row) in self.rows.iter().zip(&self.rows[1..]) {
            let week = row.week;

            for p in Product::ALL {
                let Some(built) = row.production(p) else {
                    found.push(format!("week {} has no production of {}", week, p));
                    continue;
                };
                let wanted = demand.get(p, week);

                if built > policy.capacity(p) {
                    found.push(format!(
                        "week {} builds {} of {} above capacity {}",
                        week,
                        built,
                        p,
                        policy.capacity(p)
                    ));
                }
                if built > 0 && row.line != p {
                    found.push(format!(
                        "week {} builds {} while the line is set for {}",
                        week, p, row.line
                    ));
                }
                if prev.stock(p) as i64 + built as i64 - wanted != row.stock(p) as i64 {
                    found.push(format!("week {} stock of {} does not balance", week, p));
                }
                // Safety rule applies to the stock carried into the week
                if (prev.stock(p) as f64) < policy.safety_fraction * wanted as f64 - 1e-9 {
                    found.push(format!(
                        "week {} starts with {} of {}, below the safety stock",
                        week,
                        prev.stock(p),
                        p
                    ));
                }
            }

            match row.changeover {
                None => found.push(format!("week {} has no changeover entry", week)),
                Some(false) if prev.line != row.line => {
                    found.push(format!("week {} switches the line without a changeover", week))
                }
                _ => {}
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PolicyConstants {
        PolicyConstants {
            capacity_a: 20,
            capacity_b: 20,
            big_m: 20,
            safety_fraction: 0.0,
            initial_inventory_a: 0,
            initial_inventory_b: 0,
            ..PolicyConstants::default()
        }
    }

    fn row(week: usize, prod: Option<(u32, u32)>, stock: (u32, u32), line: Product) -> WeekRow {
        WeekRow {
            week,
            prod_a: prod.map(|(a, _)| a),
            prod_b: prod.map(|(_, b)| b),
            stock_a: stock.0,
            stock_b: stock.1,
            line,
            changeover: None,
        }
    }

    fn two_week_plan() -> WeeklyPlan {
        let mut rows = vec![
            row(0, None, (0, 0), Product::A),
            row(1, Some((10, 0)), (0, 0), Product::A),
            row(2, Some((0, 10)), (0, 0), Product::B),
        ];
        rows[1].changeover = Some(false);
        rows[2].changeover = Some(true);
        WeeklyPlan::new(rows, 0.0, PlanQuality::ProvenOptimal)
    }

    #[test]
    fn test_total_cost() {
        let policy = policy();
        let plan = two_week_plan();

        assert_eq!(plan.changeovers(), 1);
        assert_eq!(
            plan.total_cost(&policy),
            10.0 * policy.cost_a + 10.0 * policy.cost_b + policy.changeover_cost
        );
    }

    #[test]
    fn test_consistent_plan_has_no_violations() {
        let demand = DemandSeries::new(vec![0, 10, 0], vec![0, 0, 10]);
        let plan = two_week_plan();

        assert_eq!(plan.violations(&demand, &policy()), Vec::<String>::new());
    }

    #[test]
    fn test_violations_are_reported() {
        let demand = DemandSeries::new(vec![0, 10, 0], vec![0, 0, 10]);
        let mut plan = two_week_plan();
        plan.rows[2].changeover = Some(false);
        plan.rows[1].prod_b = Some(3);

        let violations = plan.violations(&demand, &policy());
        assert!(violations.iter().any(|v| v.contains("without a changeover")));
        assert!(violations.iter().any(|v| v.contains("while the line is set for A")));
        assert!(violations.iter().any(|v| v.contains("does not balance")));
    }

    #[test]
    fn test_safety_stock_violation() {
        let demand = DemandSeries::new(vec![0, 10, 0], vec![0, 0, 10]);
        let policy = PolicyConstants {
            safety_fraction: 0.5,
            ..policy()
        };

        let violations = two_week_plan().violations(&demand, &policy);
        assert!(violations.iter().any(|v| v.contains("below the safety stock")));
    }
}
