//! Mixed-integer model of the shared production line.
//!
//! For planned weeks `i = 1..=N` and products `p ∈ {A, B}` the model declares
//!
//! - `prod_p[i]`: units built (non-negative integer),
//! - `stock_p[i]` for `i = 0..=N`: end-of-week stock (non-negative integer),
//! - `line[i]` for `i = 0..=N`: line configuration (binary, 0 = A, 1 = B),
//! - `switch[i]`: changeover indicator (binary),
//!
//! and the constraints
//!
//! ```text
//! line[0] = initial state                 stock_p[0] = initial stock
//! prod_p[i] <= capacity_p
//! stock_p[i-1] >= safety * demand_p[i]
//! stock_p[i] = stock_p[i-1] + prod_p[i] - demand_p[i]
//! prod_a[i] <= M * (1 - line[i])          prod_b[i] <= M * line[i]
//! switch[i] >= line[i] - line[i-1]        switch[i] >= line[i-1] - line[i]
//! ```
//!
//! minimizing production, holding and changeover cost. Stock is never
//! negative, so the balance equation also forbids unmet demand.

use std::io;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::constraint;
use crate::lp_solver::*;
use crate::{DemandSeries, PlanError, PolicyConstants, Product};

pub mod weekly;

use weekly::{PlanQuality, WeekRow, WeeklyPlan};

/// Brand of the planning model's variables.
#[derive(Debug)]
pub struct Schedule;

pub type ScheduleVar = VariableId<Schedule>;

/// Largest distance from an integer accepted for integer variables.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// The complete planning model: variables, constraints and objective.
///
/// Built once by [`build`] and never changed afterwards.
pub struct ScheduleModel {
    builder: LPModelBuilder<Schedule>,
    demand: DemandSeries,
    policy: PolicyConstants,
    /// Weeks `1..=N`, stored at `i - 1`
    production: [Vec<ScheduleVar>; 2],
    /// Weeks `0..=N`
    stock: [Vec<ScheduleVar>; 2],
    /// Weeks `0..=N`
    line: Vec<ScheduleVar>,
    /// Weeks `1..=N`, stored at `i - 1`
    changeover: Vec<ScheduleVar>,
}

impl ScheduleModel {
    /// Number of planned weeks `N`.
    pub fn weeks(&self) -> usize {
        self.line.len() - 1
    }

    pub fn demand(&self) -> &DemandSeries {
        &self.demand
    }

    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    /// Production variable of `week`; week 0 has none.
    pub fn production(&self, product: Product, week: usize) -> Option<ScheduleVar> {
        week.checked_sub(1)
            .and_then(|i| self.production[product.index()].get(i).copied())
    }

    pub fn stock(&self, product: Product, week: usize) -> Option<ScheduleVar> {
        self.stock[product.index()].get(week).copied()
    }

    pub fn line_state(&self, week: usize) -> Option<ScheduleVar> {
        self.line.get(week).copied()
    }

    /// Changeover variable of `week`; week 0 has none.
    pub fn changeover(&self, week: usize) -> Option<ScheduleVar> {
        week.checked_sub(1)
            .and_then(|i| self.changeover.get(i).copied())
    }

    pub fn variables(&self) -> &[VariableInfo] {
        self.builder.variables()
    }

    pub fn variable(&self, var: ScheduleVar) -> &VariableInfo {
        self.builder.variable(var)
    }

    pub fn constraints(&self) -> &[Constraint<Schedule>] {
        self.builder.constraints()
    }

    pub fn objective(&self) -> Option<&ObjectiveInfo<Schedule>> {
        self.builder.objective()
    }

    /// Write the model in CPLEX LP format.
    pub fn write_lp<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.builder.write_lp(out)
    }
}

/// Build the planning model for `demand` under `policy`.
///
/// Fails with [`PlanError::InvalidInput`] before anything is built when the
/// demand series or the policy is malformed.
pub fn build(demand: &DemandSeries, policy: &PolicyConstants) -> Result<ScheduleModel, PlanError> {
    demand.validate()?;
    policy.validate()?;

    let weeks = demand.weeks();
    let big_m = policy.big_m as f64;
    let mut builder = LPModelBuilder::<Schedule>::new();

    let production = Product::ALL.map(|p| {
        (1..=weeks)
            .map(|i| {
                builder.add_variable(
                    format!("prod_{}[{}]", p.tag(), i),
                    VariableType::Integer,
                    0.0,
                    f64::INFINITY,
                )
            })
            .collect::<Vec<_>>()
    });
    let line: Vec<_> = (0..=weeks)
        .map(|i| builder.add_variable(format!("line[{}]", i), VariableType::Binary, 0.0, 1.0))
        .collect();
    let changeover: Vec<_> = (1..=weeks)
        .map(|i| builder.add_variable(format!("switch[{}]", i), VariableType::Binary, 0.0, 1.0))
        .collect();
    let stock = Product::ALL.map(|p| {
        (0..=weeks)
            .map(|i| {
                builder.add_variable(
                    format!("stock_{}[{}]", p.tag(), i),
                    VariableType::Integer,
                    0.0,
                    f64::INFINITY,
                )
            })
            .collect::<Vec<_>>()
    });

    builder.add_constraint(constraint!(
        "initial_line",
        (line[0]) == policy.initial_line_state.line_state()
    ));
    for p in Product::ALL {
        builder.add_constraint(constraint!(
            format!("initial_stock_{}", p.tag()),
            (stock[p.index()][0]) == policy.initial_inventory(p)
        ));
    }

    for i in 1..=weeks {
        for p in Product::ALL {
            let prod = production[p.index()][i - 1];
            builder.add_constraint(constraint!(
                format!("capacity_{}[{}]", p.tag(), i),
                (prod) <= policy.capacity(p)
            ));
        }

        for p in Product::ALL {
            builder.add_constraint(constraint!(
                format!("safety_{}[{}]", p.tag(), i),
                (stock[p.index()][i - 1]) >= policy.safety_fraction * demand.get(p, i) as f64
            ));
        }

        for p in Product::ALL {
            let (prev, cur) = (stock[p.index()][i - 1], stock[p.index()][i]);
            let prod = production[p.index()][i - 1];
            builder.add_constraint(constraint!(
                format!("balance_{}[{}]", p.tag(), i),
                (cur - prev - prod) == -demand.get(p, i)
            ));
        }

        // The line builds A while line[i] = 0 and B while line[i] = 1
        builder.add_constraint(constraint!(
            format!("line_a[{}]", i),
            (production[Product::A.index()][i - 1] + big_m * line[i]) <= big_m
        ));
        builder.add_constraint(constraint!(
            format!("line_b[{}]", i),
            (production[Product::B.index()][i - 1] - big_m * line[i]) <= 0.0
        ));
    }

    for (i, ((&prev, &cur), &switch)) in line.iter().tuple_windows().zip(&changeover).enumerate() {
        let week = i + 1;
        builder.add_constraint(constraint!(
            format!("switch_up[{}]", week),
            (cur - prev - switch) <= 0.0
        ));
        builder.add_constraint(constraint!(
            format!("switch_down[{}]", week),
            (prev - cur - switch) <= 0.0
        ));
    }

    let production_cost: LinearExpression<Schedule> = Product::ALL
        .iter()
        .flat_map(|&p| {
            production[p.index()]
                .iter()
                .map(move |&prod| policy.unit_cost(p) * prod)
        })
        .sum();
    let holding_cost: LinearExpression<Schedule> = Product::ALL
        .iter()
        .flat_map(|&p| {
            stock[p.index()][1..]
                .iter()
                .map(move |&s| policy.hold_rate(p) * s)
        })
        .sum();
    let changeover_cost: LinearExpression<Schedule> = changeover
        .iter()
        .map(|&switch| policy.changeover_cost * switch)
        .sum();

    builder.set_objective(
        production_cost + holding_cost + changeover_cost,
        OptimizationSense::Minimize,
    );

    debug!(
        weeks,
        variables = builder.variables().len(),
        constraints = builder.constraints().len(),
        big_m = policy.big_m,
        "built planning model"
    );

    Ok(ScheduleModel {
        builder,
        demand: demand.clone(),
        policy: policy.clone(),
        production,
        stock,
        line,
        changeover,
    })
}

/// Outcome of solving a [`ScheduleModel`].
pub struct ScheduleSolution<'m> {
    model: &'m ScheduleModel,
    solution: LPSolution<Schedule>,
}

impl<'m> ScheduleSolution<'m> {
    pub fn model(&self) -> &'m ScheduleModel {
        self.model
    }

    pub fn status(&self) -> OptimizationStatus {
        self.solution.status
    }

    /// Objective value; `None` unless the status carries an assignment.
    pub fn objective_value(&self) -> Option<f64> {
        self.solution.objective_value()
    }

    pub fn value(&self, var: ScheduleVar) -> Option<f64> {
        self.solution.get_value(var)
    }
}

/// Run the MILP backend on `model`.
///
/// Every terminal status, including infeasibility and time-outs, is returned
/// as a [`ScheduleSolution`]; only a solver that cannot run at all is an error.
pub fn solve<'m>(
    model: &'m ScheduleModel,
    options: &SolverOptions,
) -> Result<ScheduleSolution<'m>, PlanError> {
    let solution = model.builder.solve_with(options)?;

    info!(
        status = %solution.status,
        objective = ?solution.objective_value(),
        "solver finished"
    );

    Ok(ScheduleSolution { model, solution })
}

fn integer_value(solution: &ScheduleSolution<'_>, var: ScheduleVar) -> Result<u32, PlanError> {
    let name = &solution.model.variable(var).name;
    let value = solution
        .value(var)
        .ok_or_else(|| PlanError::Solver(format!("no value for {}", name)))?;
    let rounded = value.round();

    if (value - rounded).abs() > INTEGRALITY_TOLERANCE || rounded < 0.0 {
        return Err(PlanError::Solver(format!(
            "{} = {} is not a non-negative integer",
            name, value
        )));
    }
    if rounded > u32::MAX as f64 {
        return Err(PlanError::Solver(format!(
            "{} = {} exceeds the largest weekly quantity {}",
            name,
            value,
            u32::MAX
        )));
    }
    Ok(rounded as u32)
}

/// Turn a solved model into a [`WeeklyPlan`].
///
/// Only an optimal status yields a plan, unless `accept_best_found` is set
/// and the solver stopped at its time limit holding a feasible solution; that
/// plan is marked [`PlanQuality::BestFound`].
pub fn extract(
    solution: &ScheduleSolution<'_>,
    accept_best_found: bool,
) -> Result<WeeklyPlan, PlanError> {
    let quality = match solution.status() {
        OptimizationStatus::Optimal => PlanQuality::ProvenOptimal,
        OptimizationStatus::TimedOut { incumbent: true } if accept_best_found => {
            warn!("using the best plan found before the time limit; optimality is not proven");
            PlanQuality::BestFound
        }
        OptimizationStatus::TimedOut { .. } => return Err(PlanError::SolverTimeout),
        OptimizationStatus::Infeasible => return Err(PlanError::Infeasible),
        OptimizationStatus::Unbounded => return Err(PlanError::Unbounded),
        OptimizationStatus::Cancelled => return Err(PlanError::Cancelled),
        OptimizationStatus::Other(reason) => return Err(PlanError::Solver(reason.to_string())),
    };

    let model = solution.model;
    let objective = solution
        .objective_value()
        .ok_or_else(|| PlanError::Solver("solver reported no objective value".into()))?;

    let optional = |var: Option<ScheduleVar>| var.map(|v| integer_value(solution, v)).transpose();

    let rows = (0..=model.weeks())
        .map(|week| -> Result<WeekRow, PlanError> {
            let line_value = integer_value(solution, model.line[week])?;
            let line = u8::try_from(line_value)
                .ok()
                .and_then(Product::from_line_state)
                .ok_or_else(|| {
                    PlanError::Solver(format!("line[{}] = {} is not binary", week, line_value))
                })?;

            Ok(WeekRow {
                week,
                prod_a: optional(model.production(Product::A, week))?,
                prod_b: optional(model.production(Product::B, week))?,
                stock_a: integer_value(solution, model.stock[Product::A.index()][week])?,
                stock_b: integer_value(solution, model.stock[Product::B.index()][week])?,
                line,
                changeover: optional(model.changeover(week))?.map(|v| v != 0),
            })
        })
        .collect::<Result<Vec<_>, PlanError>>()?;

    let plan = WeeklyPlan::new(rows, objective, quality);

    let violations = plan.violations(&model.demand, &model.policy);
    if !violations.is_empty() {
        return Err(PlanError::Solver(format!(
            "solver returned an inconsistent plan: {}",
            violations.join("; ")
        )));
    }

    debug!(
        changeovers = plan.changeovers(),
        cost = plan.total_cost(&model.policy),
        "extracted weekly plan"
    );

    Ok(plan)
}
