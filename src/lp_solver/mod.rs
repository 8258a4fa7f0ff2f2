//! Mixed-integer linear programming (MILP) solver abstraction layer
//!
//! This module provides a trait-free, backend-agnostic description of a MILP
//! model together with a dispatcher that hands the model to a concrete solver
//! (COIN-OR CBC or Gurobi, selected by Cargo feature and environment).
//!
//! # Type Safety with Branded Types
//!
//! All core types (`VariableId`, `LinearExpression`, `Constraint`, `LPModelBuilder`)
//! carry a `Brand` type parameter. Variables from one builder cannot be used
//! in constraints of another builder: the mix-up is a compile-time error.
//! The brand is a zero-sized phantom type, so it costs nothing at runtime.
//!
//! ```rust
//! use lineplan::lp_solver::VariableType;
//! use lineplan::{constraint, lp_model_builder};
//!
//! let mut builder = lp_model_builder!(Production);
//! let a = builder.add_variable("a", VariableType::Integer, 0.0, f64::INFINITY);
//! let b = builder.add_variable("b", VariableType::Integer, 0.0, f64::INFINITY);
//!
//! builder.add_constraint(constraint!("capacity", (a + b) <= 100.0));
//! assert_eq!(builder.constraints().len(), 1);
//! ```
//!
//! # Solving
//!
//! [`LPModelBuilder::solve_with`] never assumes success. The returned
//! [`LPSolution`] carries an [`OptimizationStatus`] and only exposes an
//! objective value and variable assignment when the status has one:
//!
//! ```rust,no_run
//! use lineplan::lp_solver::{OptimizationSense, OptimizationStatus, SolverOptions, VariableType};
//! use lineplan::{constraint, lp_model_builder};
//!
//! let mut builder = lp_model_builder!();
//! let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
//! builder.add_constraint(constraint!((2.0 * x) >= 5.0));
//! builder.set_objective(x.into(), OptimizationSense::Minimize);
//!
//! let solution = builder.solve_with(&SolverOptions::default()).unwrap();
//! if solution.status == OptimizationStatus::Optimal {
//!     assert_eq!(solution.get_value(x), Some(3.0));
//! }
//! ```
//!
//! # Solver Selection
//!
//! The backend can be forced with [`SolverOptions::backend`] or with the
//! `LINEPLAN_LP_SOLVER` environment variable:
//! - `"gurobi"` - Use Gurobi (requires `gurobi` feature)
//! - `"coin_cbc"` or `"cbc"` - Use COIN-OR CBC (requires `coin_cbc` feature)
//!
//! If neither is given, the solver defaults to Gurobi if available, otherwise CBC.

use std::env;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Variable types supported by MILP solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum VariableType {
    /// Continuous variable (can take any real value)
    Continuous,
    /// Integer variable (can only take integer values)
    Integer,
    /// Binary variable (can only take values 0 or 1)
    Binary,
}

/// Constraint sense for linear constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// Less than or equal to (≤)
    LessEqual,
    /// Equal to (=)
    Equal,
    /// Greater than or equal to (≥)
    GreaterEqual,
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationSense {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Terminal status of a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// Proven optimal solution found
    Optimal,
    /// The time budget ran out before optimality was proven.
    /// `incumbent` tells whether a feasible solution was found on the way.
    TimedOut { incumbent: bool },
    /// Problem is infeasible (no solution exists)
    Infeasible,
    /// Problem is unbounded
    Unbounded,
    /// The cancellation token was triggered before the solver ran
    Cancelled,
    /// Solver error or a status the backend could not classify
    Other(&'static str),
}

impl OptimizationStatus {
    /// Whether a solution built with this status carries a variable assignment.
    pub fn has_assignment(&self) -> bool {
        matches!(
            self,
            OptimizationStatus::Optimal | OptimizationStatus::TimedOut { incumbent: true }
        )
    }
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStatus::Optimal => write!(f, "optimal"),
            OptimizationStatus::TimedOut { incumbent: true } => {
                write!(f, "time limit reached (feasible solution found)")
            }
            OptimizationStatus::TimedOut { incumbent: false } => {
                write!(f, "time limit reached (no feasible solution)")
            }
            OptimizationStatus::Infeasible => write!(f, "infeasible"),
            OptimizationStatus::Unbounded => write!(f, "unbounded"),
            OptimizationStatus::Cancelled => write!(f, "cancelled"),
            OptimizationStatus::Other(reason) => write!(f, "solver error: {}", reason),
        }
    }
}

/// Available MILP solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    /// Gurobi commercial solver
    Gurobi,
    /// Coin CBC open-source solver
    CoinCbc,
}

impl SolverBackend {
    /// Parse a backend name as accepted by `LINEPLAN_LP_SOLVER` and `--solver`.
    pub fn from_name(name: &str) -> Result<Self, SolveError> {
        match name.to_lowercase().as_str() {
            "gurobi" => Ok(SolverBackend::Gurobi),
            "coin_cbc" | "coin-cbc" | "cbc" => Ok(SolverBackend::CoinCbc),
            _ => Err(SolveError::Unavailable(format!(
                "invalid solver '{}'. Valid options: gurobi, coin_cbc",
                name
            ))),
        }
    }

    /// Check that the backend was compiled in.
    fn ensure_enabled(self) -> Result<Self, SolveError> {
        match self {
            SolverBackend::Gurobi if !cfg!(feature = "gurobi") => Err(SolveError::Unavailable(
                "Gurobi solver requested but the gurobi feature is not enabled".into(),
            )),
            SolverBackend::CoinCbc if !cfg!(feature = "coin_cbc") => {
                Err(SolveError::Unavailable(
                    "Coin CBC solver requested but the coin_cbc feature is not enabled".into(),
                ))
            }
            backend => Ok(backend),
        }
    }

    /// Resolve the backend from an explicit request, the environment, or the
    /// compiled-in fallback (Gurobi first, then CBC).
    pub fn resolve(requested: Option<SolverBackend>) -> Result<Self, SolveError> {
        if let Some(backend) = requested {
            return backend.ensure_enabled();
        }

        if let Ok(solver_name) = env::var("LINEPLAN_LP_SOLVER") {
            return Self::from_name(&solver_name)?.ensure_enabled();
        }

        if cfg!(feature = "gurobi") {
            Ok(SolverBackend::Gurobi)
        } else if cfg!(feature = "coin_cbc") {
            Ok(SolverBackend::CoinCbc)
        } else {
            Err(SolveError::Unavailable(
                "no MILP solver backend available; enable the 'coin_cbc' or 'gurobi' feature"
                    .into(),
            ))
        }
    }
}

/// Errors raised when the solver cannot be run at all.
///
/// A solver that runs and reports infeasibility is not an error; see
/// [`OptimizationStatus`].
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver unavailable: {0}")]
    Unavailable(String),
    #[error("solver backend failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Shared flag used to abandon a solve before it starts.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options passed to the backend for a single solve.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Force a backend instead of consulting `LINEPLAN_LP_SOLVER`.
    pub backend: Option<SolverBackend>,
    /// Wall-clock budget; reaching it yields [`OptimizationStatus::TimedOut`].
    pub time_limit: Option<Duration>,
    /// Checked once before the backend starts; a solve already running is not interrupted.
    pub cancel: Option<CancellationToken>,
    /// Redirect the backend's console chatter away from stdout.
    pub quiet: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            backend: None,
            time_limit: None,
            cancel: None,
            quiet: true,
        }
    }
}

/// A linear expression term: coefficient * variable
#[derive(Debug, Clone)]
pub struct LinearTerm<Brand> {
    pub coefficient: f64,
    pub variable: VariableId<Brand>,
}

impl<Brand> PartialEq for LinearTerm<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.variable == other.variable
    }
}

/// A linear expression: sum of terms plus constant
#[derive(Debug, Clone)]
pub struct LinearExpression<Brand> {
    pub terms: Vec<LinearTerm<Brand>>,
    pub constant: f64,
}

impl<Brand> PartialEq for LinearExpression<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.constant == other.constant && self.terms == other.terms
    }
}

impl<Brand> LinearExpression<Brand> {
    /// Create a new linear expression with a constant term
    pub fn new(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Add a term to the expression
    pub fn add_term(&mut self, coefficient: f64, variable: VariableId<Brand>) {
        self.terms.push(LinearTerm {
            coefficient,
            variable,
        });
    }

    /// Create a linear expression from a single variable
    pub fn from_variable(variable: VariableId<Brand>) -> Self {
        Self {
            terms: vec![LinearTerm {
                coefficient: 1.0,
                variable,
            }],
            constant: 0.0,
        }
    }

    /// Evaluate the expression against a dense assignment indexed by variable id.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|term| term.coefficient * values.get(term.variable.id).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl<Brand> From<VariableId<Brand>> for LinearExpression<Brand> {
    fn from(variable: VariableId<Brand>) -> Self {
        Self::from_variable(variable)
    }
}

impl<Brand> From<f64> for LinearExpression<Brand> {
    fn from(constant: f64) -> Self {
        Self::new(constant)
    }
}

/// Unique identifier for a variable in the model
///
/// The `Brand` type parameter ensures that variables can only be used with the
/// builder that created them. This is enforced at compile time.
pub struct VariableId<Brand> {
    id: usize,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> VariableId<Brand> {
    /// Position of the variable in the builder's declaration order.
    pub fn index(&self) -> usize {
        self.id
    }
}

// Manual trait implementations that don't require Brand to implement anything
impl<Brand> fmt::Debug for VariableId<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableId").field("id", &self.id).finish()
    }
}

impl<Brand> Clone for VariableId<Brand> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Brand> Copy for VariableId<Brand> {}

impl<Brand> PartialEq for VariableId<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Brand> Eq for VariableId<Brand> {}

impl<Brand> std::hash::Hash for VariableId<Brand> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Unique identifier for a constraint in the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

/// A named linear constraint `expression <sense> rhs`
///
/// ```rust
/// use lineplan::constraint;
/// use lineplan::lp_model_builder;
/// use lineplan::lp_solver::{Constraint, ConstraintSense, VariableType};
///
/// let mut builder = lp_model_builder!();
/// let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
/// let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);
///
/// let c1 = constraint!("total", (x + y) == 10.0);
/// let c2 = Constraint::new("total", x + y, ConstraintSense::Equal, 10.0);
/// assert_eq!(c1, c2);
/// ```
#[derive(Debug, Clone)]
pub struct Constraint<Brand> {
    name: String,
    expression: LinearExpression<Brand>,
    sense: ConstraintSense,
    rhs: f64,
}

impl<Brand> PartialEq for Constraint<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.sense == other.sense
            && self.rhs == other.rhs
            && self.expression == other.expression
    }
}

impl<Brand> Constraint<Brand> {
    pub fn new(
        name: impl Into<String>,
        expression: impl Into<LinearExpression<Brand>>,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            sense,
            rhs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &LinearExpression<Brand> {
        &self.expression
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Right-hand side with the expression's constant moved across.
    pub(crate) fn adjusted_rhs(&self) -> f64 {
        self.rhs - self.expression.constant
    }

    /// Amount by which `values` violate the constraint (0 when satisfied).
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.expression.evaluate(values);
        match self.sense {
            ConstraintSense::LessEqual => (lhs - self.rhs).max(0.0),
            ConstraintSense::GreaterEqual => (self.rhs - lhs).max(0.0),
            ConstraintSense::Equal => (lhs - self.rhs).abs(),
        }
    }
}

/// Variable information stored in the model
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub name: String,
    pub var_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Objective function information
#[derive(Debug, Clone)]
pub struct ObjectiveInfo<Brand> {
    pub expression: LinearExpression<Brand>,
    pub sense: OptimizationSense,
}

/// Result of solving a model
///
/// Values are only exposed when [`OptimizationStatus::has_assignment`] holds.
#[derive(Debug, Clone)]
pub struct LPSolution<Brand> {
    pub status: OptimizationStatus,
    objective_value: Option<f64>,
    variable_values: Vec<f64>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPSolution<Brand> {
    /// A solution carrying only a status.
    pub(crate) fn without_assignment(status: OptimizationStatus) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            _brand: PhantomData,
        }
    }

    pub(crate) fn with_assignment(
        status: OptimizationStatus,
        objective_value: f64,
        variable_values: Vec<f64>,
    ) -> Self {
        Self {
            status,
            objective_value: Some(objective_value),
            variable_values,
            _brand: PhantomData,
        }
    }

    /// Get the value of a variable from the solution
    pub fn get_value(&self, var_id: VariableId<Brand>) -> Option<f64> {
        if !self.status.has_assignment() {
            return None;
        }
        self.variable_values.get(var_id.id).copied()
    }

    pub fn objective_value(&self) -> Option<f64> {
        if self.status.has_assignment() {
            self.objective_value
        } else {
            None
        }
    }
}

/// Builder for MILP models that can work with different backends
///
/// ```rust
/// use lineplan::lp_solver::{LPModelBuilder, VariableType};
///
/// struct MyModel;
/// let mut builder = LPModelBuilder::<MyModel>::new();
/// let x = builder.add_variable("x", VariableType::Binary, 0.0, 1.0);
/// assert_eq!(builder.variable(x).name, "x");
/// ```
pub struct LPModelBuilder<Brand> {
    variables: Vec<VariableInfo>,
    constraints: Vec<Constraint<Brand>>,
    objective: Option<ObjectiveInfo<Brand>>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPModelBuilder<Brand> {
    /// Create a new model builder
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            _brand: PhantomData,
        }
    }

    /// Add a variable to the model. Binary variables ignore the bounds given.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        var_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> VariableId<Brand> {
        let (lower_bound, upper_bound) = match var_type {
            VariableType::Binary => (0.0, 1.0),
            _ => (lower_bound, upper_bound),
        };
        let var_id = VariableId {
            id: self.variables.len(),
            _brand: PhantomData,
        };
        self.variables.push(VariableInfo {
            name: name.into(),
            var_type,
            lower_bound,
            upper_bound,
        });
        var_id
    }

    /// Add a constraint to the model
    pub fn add_constraint(&mut self, constraint: Constraint<Brand>) -> ConstraintId {
        let constr_id = ConstraintId(self.constraints.len());
        self.constraints.push(constraint);
        constr_id
    }

    /// Set the objective function
    pub fn set_objective(&mut self, expression: LinearExpression<Brand>, sense: OptimizationSense) {
        self.objective = Some(ObjectiveInfo { expression, sense });
    }

    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }

    pub fn variable(&self, var_id: VariableId<Brand>) -> &VariableInfo {
        &self.variables[var_id.id]
    }

    pub fn constraints(&self) -> &[Constraint<Brand>] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&ObjectiveInfo<Brand>> {
        self.objective.as_ref()
    }

    /// Largest bound, constraint or integrality violation of a dense assignment.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let bounds = self.variables.iter().zip(values).map(|(info, &value)| {
            let integrality = match info.var_type {
                VariableType::Continuous => 0.0,
                _ => (value - value.round()).abs(),
            };
            (info.lower_bound - value)
                .max(value - info.upper_bound)
                .max(integrality)
                .max(0.0)
        });
        let rows = self.constraints.iter().map(|c| c.violation(values));

        bounds.chain(rows).fold(0.0, f64::max)
    }

    /// Solve the model with the backend chosen by `options`
    pub fn solve_with(&self, options: &SolverOptions) -> Result<LPSolution<Brand>, SolveError> {
        let backend = SolverBackend::resolve(options.backend)?;

        if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            debug!("solve cancelled before invoking {:?}", backend);
            return Ok(LPSolution::without_assignment(
                OptimizationStatus::Cancelled,
            ));
        }

        debug!(
            ?backend,
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            "invoking MILP solver"
        );

        match backend {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => Ok(crate::lp_solver::gurobi::solve_gurobi(self, options)?),

            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => Ok(crate::lp_solver::coin_cbc::solve_coin_cbc(self, options)?),

            #[allow(unreachable_patterns)]
            _ => Err(SolveError::Unavailable(format!(
                "{:?} backend not compiled in",
                backend
            ))),
        }
    }
}

impl<Brand> Default for LPModelBuilder<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

// Macros for convenient syntax
pub mod macros;

// Operator overloading for linear expressions
pub mod ops;

// CPLEX LP text export
pub mod lp_format;

pub mod output_suppression;

#[cfg(feature = "gurobi")]
pub mod gurobi;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constraint, lp_model_builder};

    #[test]
    fn test_constraint_macro() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);

        let c = constraint!((x + y) == 10.0);
        assert_eq!(c.sense, ConstraintSense::Equal);
        assert_eq!(c.rhs, 10.0);
        assert_eq!(c.name(), "");

        let c = constraint!("cap", (2.0 * x) <= 5.0);
        assert_eq!(c.sense, ConstraintSense::LessEqual);
        assert_eq!(c.name(), "cap");

        let c = constraint!((x - y) >= 0.0);
        assert_eq!(c.sense, ConstraintSense::GreaterEqual);
        assert_eq!(c.rhs, 0.0);
    }

    #[test]
    fn test_binary_bounds_are_normalised() {
        let mut builder = lp_model_builder!();
        let b = builder.add_variable("b", VariableType::Binary, -5.0, 7.0);

        let info = builder.variable(b);
        assert_eq!(info.lower_bound, 0.0);
        assert_eq!(info.upper_bound, 1.0);
    }

    #[test]
    fn test_constraint_violation() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);

        let le = constraint!((x + y) <= 10.0);
        let eq = constraint!((x - y + 1.0) == 0.0);

        assert_eq!(le.violation(&[4.0, 6.0]), 0.0);
        assert_eq!(le.violation(&[6.0, 6.0]), 2.0);
        assert_eq!(eq.violation(&[4.0, 5.0]), 0.0);
        assert_eq!(eq.violation(&[5.0, 5.0]), 1.0);
        assert_eq!(eq.adjusted_rhs(), -1.0);
    }

    #[test]
    fn test_expression_built_term_by_term() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);

        let mut expr = LinearExpression::new(1.5);
        expr.add_term(2.0, x);
        expr.add_term(-1.0, y);

        assert_eq!(expr, 2.0 * x - y + 1.5);
        assert_eq!(expr.evaluate(&[3.0, 4.0]), 3.5);
    }

    #[test]
    fn test_max_violation_checks_integrality_and_bounds() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        builder.add_constraint(constraint!((x) >= 2.0));

        assert_eq!(builder.max_violation(&[3.0]), 0.0);
        assert!((builder.max_violation(&[2.5]) - 0.5).abs() < 1e-12);
        assert_eq!(builder.max_violation(&[12.0]), 2.0);
        assert_eq!(builder.max_violation(&[0.0]), 2.0);
    }

    #[test]
    fn test_solution_without_assignment_hides_values() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);

        let solution = LPSolution::without_assignment(OptimizationStatus::Infeasible);
        assert_eq!(solution.get_value(x), None);
        assert_eq!(solution.objective_value(), None);

        let timed_out = LPSolution::with_assignment(
            OptimizationStatus::TimedOut { incumbent: false },
            4.0,
            vec![4.0],
        );
        assert_eq!(timed_out.get_value(x), None);

        let optimal = LPSolution::with_assignment(OptimizationStatus::Optimal, 4.0, vec![4.0]);
        assert_eq!(optimal.get_value(x), Some(4.0));
        assert_eq!(optimal.objective_value(), Some(4.0));
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(SolverBackend::from_name("CBC").unwrap(), SolverBackend::CoinCbc);
        assert_eq!(
            SolverBackend::from_name("coin-cbc").unwrap(),
            SolverBackend::CoinCbc
        );
        assert_eq!(SolverBackend::from_name("gurobi").unwrap(), SolverBackend::Gurobi);
        assert!(matches!(
            SolverBackend::from_name("glpk"),
            Err(SolveError::Unavailable(_))
        ));
    }

    #[test]
    fn test_cancelled_token_skips_solver() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        builder.set_objective(x.into(), OptimizationSense::Minimize);

        let token = CancellationToken::new();
        token.cancel();
        let options = SolverOptions {
            cancel: Some(token),
            ..SolverOptions::default()
        };

        // Without any backend compiled in the resolution error wins, which is fine too.
        match builder.solve_with(&options) {
            Ok(solution) => {
                assert_eq!(solution.status, OptimizationStatus::Cancelled);
                assert_eq!(solution.get_value(x), None);
            }
            Err(SolveError::Unavailable(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
