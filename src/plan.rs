//! The `plan` command: solve the planning model and print the weekly plan.
//!
//! ```no_run
//! # fn main() -> Result<(), lineplan::PlanError> {
//! use lineplan::plan::{InputArgs, PlanArgs, plan_main};
//!
//! let args = PlanArgs {
//!     inputs: InputArgs {
//!         demand: Some("forecast.csv".into()),
//!         policy: Some("policy.toml".into()),
//!         tight_big_m: false,
//!         verbose: false,
//!     },
//!     solver: None,
//!     time_limit: None,
//!     accept_best_found: false,
//!     csv: Some("plan.csv".into()),
//! };
//!
//! plan_main(args)?;
//! # Ok(())
//! # }
//! ```

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Duration,
};

use clap::{Args, Parser};
use tracing::info;

use crate::{
    DemandSeries, PlanError, PolicyConstants,
    lp_solver::{SolverBackend, SolverOptions},
    report, schedule,
};

/// Demand and policy inputs shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Demand CSV file with columns week,demand_a,demand_b (default: built-in forecast)
    pub demand: Option<PathBuf>,

    /// Policy TOML file overriding capacities, costs and initial conditions
    #[clap(long, short)]
    pub policy: Option<PathBuf>,

    /// Lower big-M to the largest weekly capacity
    #[clap(long)]
    pub tight_big_m: bool,

    /// Log model and solver details, and show the solver's own output
    #[clap(long, short)]
    pub verbose: bool,
}

impl InputArgs {
    /// Read the demand series and policy named on the command line.
    pub fn load(&self) -> Result<(DemandSeries, PolicyConstants), PlanError> {
        let demand = match &self.demand {
            Some(path) => DemandSeries::from_csv_path(path)?,
            None => DemandSeries::default_forecast(),
        };

        let mut policy = match &self.policy {
            Some(path) => PolicyConstants::from_path(path)?,
            None => PolicyConstants::default(),
        };
        if self.tight_big_m {
            policy = policy.tight_big_m();
        }

        info!(
            weeks = demand.weeks(),
            demand = ?self.demand,
            policy = ?self.policy,
            "loaded planning inputs"
        );

        Ok((demand, policy))
    }
}

fn parse_backend(name: &str) -> Result<SolverBackend, String> {
    SolverBackend::from_name(name).map_err(|e| e.to_string())
}

fn parse_time_limit(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("{}", e))?;
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(format!("time limit must be positive, got {}", value));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

/// Command-line arguments for the planning command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,

    /// MILP backend: coin_cbc or gurobi (default: LINEPLAN_LP_SOLVER, then whatever is compiled in)
    #[clap(long, value_parser = parse_backend)]
    pub solver: Option<SolverBackend>,

    /// Solver time limit in seconds
    #[clap(long, short('t'), value_parser = parse_time_limit)]
    pub time_limit: Option<Duration>,

    /// Print the best plan found when the time limit stops the solver
    #[clap(long)]
    pub accept_best_found: bool,

    /// Also write the plan as CSV
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

/// Solve the planning model and print the plan to stdout.
///
/// Fails without printing a plan unless the solver proves optimality, or it
/// timed out holding a feasible plan and `accept_best_found` is set.
pub fn plan_main(args: PlanArgs) -> Result<(), PlanError> {
    let (demand, policy) = args.inputs.load()?;

    let model = schedule::build(&demand, &policy)?;
    let options = SolverOptions {
        backend: args.solver,
        time_limit: args.time_limit,
        quiet: !args.inputs.verbose,
        ..SolverOptions::default()
    };
    let solution = schedule::solve(&model, &options)?;
    let plan = schedule::extract(&solution, args.accept_best_found)?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    report::write_report(&mut writer, &plan)?;
    writer.flush()?;

    if let Some(path) = &args.csv {
        report::write_csv(BufWriter::new(File::create(path)?), &plan)?;
        info!(path = %path.display(), "wrote plan CSV");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_limit_parsing() {
        assert_eq!(parse_time_limit("1.5"), Ok(Duration::from_millis(1500)));
        assert!(parse_time_limit("0").is_err());
        assert!(parse_time_limit("-3").is_err());
        assert!(parse_time_limit("NaN").is_err());
        assert!(parse_time_limit("soon").is_err());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(parse_backend("CBC"), Ok(SolverBackend::CoinCbc));
        assert_eq!(parse_backend("gurobi"), Ok(SolverBackend::Gurobi));
        assert!(parse_backend("glpk").is_err());
    }

    #[test]
    fn test_arguments() {
        let args = PlanArgs::try_parse_from([
            "plan",
            "demand.csv",
            "--policy",
            "policy.toml",
            "--tight-big-m",
            "-t",
            "30",
            "--solver",
            "coin_cbc",
            "--csv",
            "plan.csv",
        ])
        .expect("valid arguments");

        assert_eq!(args.inputs.demand, Some(PathBuf::from("demand.csv")));
        assert_eq!(args.inputs.policy, Some(PathBuf::from("policy.toml")));
        assert!(args.inputs.tight_big_m);
        assert!(!args.inputs.verbose);
        assert_eq!(args.time_limit, Some(Duration::from_secs(30)));
        assert_eq!(args.solver, Some(SolverBackend::CoinCbc));
        assert!(!args.accept_best_found);
        assert_eq!(args.csv, Some(PathBuf::from("plan.csv")));
    }

    #[test]
    fn test_default_inputs() {
        let inputs = InputArgs {
            demand: None,
            policy: None,
            tight_big_m: true,
            verbose: false,
        };
        let (demand, policy) = inputs.load().expect("built-in inputs load");

        assert_eq!(demand, DemandSeries::default_forecast());
        assert_eq!(policy.big_m, policy.min_big_m());
    }
}
