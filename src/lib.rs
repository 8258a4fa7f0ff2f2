//! Production and changeover planning for a line shared by two machine types
//!
//! The planner decides, week by week, how many machines of type A and B to
//! build, how much stock to carry and when to switch the line between the two
//! products. It minimizes production, holding and changeover cost subject to
//! weekly capacity and a safety-stock rule tied to the demand forecast.
//!
//! # Pipeline
//!
//! 1. [`schedule::build`] turns a [`DemandSeries`] and [`PolicyConstants`] into
//!    a mixed-integer model (a [`schedule::ScheduleModel`]).
//! 2. [`schedule::solve`] hands the model to a MILP backend (see [`lp_solver`])
//!    and returns its status-checked result.
//! 3. [`schedule::extract`] turns an optimal result into a [`WeeklyPlan`].
//! 4. [`report`] renders the plan as a table or CSV.
//!
//! ```no_run
//! # fn main() -> Result<(), lineplan::PlanError> {
//! use lineplan::lp_solver::SolverOptions;
//! use lineplan::{DemandSeries, PolicyConstants, schedule};
//!
//! let model = schedule::build(&DemandSeries::default_forecast(), &PolicyConstants::default())?;
//! let solution = schedule::solve(&model, &SolverOptions::default())?;
//! let plan = schedule::extract(&solution, false)?;
//! println!("total cost {:.2}", plan.objective());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - **[`demand`]**: the weekly demand forecast and its CSV reader
//! - **[`policy`]**: capacities, costs and initial conditions, read from TOML
//! - **[`schedule`]**: model builder, solver adapter and plan extraction
//! - **[`report`]**: table and CSV rendering of a plan
//! - **[`lp_solver`]**: backend-agnostic MILP modelling layer

use clap::Parser;
use thiserror::Error;

pub mod demand;
pub mod export;
pub mod logging;
pub mod lp_solver;
pub mod plan;
pub mod policy;
pub mod product;
pub mod report;
pub mod schedule;

pub use demand::DemandSeries;
pub use export::{ExportArgs, export_main};
pub use plan::{PlanArgs, plan_main};
pub use policy::PolicyConstants;
pub use product::Product;
pub use schedule::weekly::{PlanQuality, WeekRow, WeeklyPlan};

/// Everything that can stop a planning run.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed demand series or policy constants, caught before solving.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no plan satisfies the capacity and safety-stock constraints (model infeasible)")]
    Infeasible,
    #[error("the planning model is unbounded")]
    Unbounded,
    #[error("solver time limit reached without a proven optimum")]
    SolverTimeout,
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),
    #[error("planning run cancelled")]
    Cancelled,
    #[error("solver error: {0}")]
    Solver(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("demand file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("policy file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PlanError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlanError::InvalidInput(_)
            | PlanError::Io(_)
            | PlanError::Csv(_)
            | PlanError::Toml(_) => 2,
            PlanError::Infeasible => 3,
            PlanError::Unbounded => 4,
            PlanError::SolverTimeout => 5,
            PlanError::SolverUnavailable(_) => 6,
            PlanError::Cancelled => 7,
            PlanError::Solver(_) => 1,
        }
    }
}

impl From<lp_solver::SolveError> for PlanError {
    fn from(e: lp_solver::SolveError) -> Self {
        match e {
            lp_solver::SolveError::Unavailable(reason) => PlanError::SolverUnavailable(reason),
            lp_solver::SolveError::Backend(e) => PlanError::Solver(format!("{:#}", e)),
        }
    }
}

/// Command-line interface of the planner.
#[derive(Debug, Parser)]
#[clap(
    name = "lineplan",
    about = "Weekly production and changeover planning for a shared two-product line"
)]
pub enum CLIArguments {
    /// Solve the planning model and print the weekly plan.
    Plan(PlanArgs),
    /// Write the planning model in CPLEX LP format without solving it.
    Export(ExportArgs),
}

impl CLIArguments {
    pub fn verbose(&self) -> bool {
        match self {
            CLIArguments::Plan(args) => args.inputs.verbose,
            CLIArguments::Export(args) => args.inputs.verbose,
        }
    }
}
