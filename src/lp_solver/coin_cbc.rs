use anyhow::Result;
use tracing::{debug, warn};

use crate::lp_solver::output_suppression::GagHandle;
use crate::lp_solver::*;
use ::coin_cbc::{Col, Model, Sense};

/// Integer feasibility tolerance used to trust an incumbent after a time-out.
const INCUMBENT_TOLERANCE: f64 = 1e-6;

/// Round a floating-point number to a specified number of significant digits
/// This is an workaround to mask floating point errors in CBC.
fn round_to_sig_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(digits as i32 - magnitude - 1);
    (value * scale).round() / scale
}

/// Solve a model using Coin CBC
pub fn solve_coin_cbc<Brand>(
    builder: &LPModelBuilder<Brand>,
    options: &SolverOptions,
) -> Result<LPSolution<Brand>> {
    // CBC writes its progress log straight to stdout
    let _gag_handle = if options.quiet {
        Some(GagHandle::stdout()?)
    } else {
        None
    };
    let mut model = Model::default();

    let cols: Vec<Col> = builder
        .variables()
        .iter()
        .map(|var_info| match var_info.var_type {
            VariableType::Continuous => {
                let col = model.add_col();
                model.set_col_lower(col, var_info.lower_bound);
                model.set_col_upper(col, var_info.upper_bound);
                col
            }
            VariableType::Integer => {
                let col = model.add_integer();
                model.set_col_lower(col, var_info.lower_bound);
                model.set_col_upper(col, var_info.upper_bound);
                col
            }
            VariableType::Binary => model.add_binary(),
        })
        .collect();

    let col_of = |var: &VariableId<Brand>| {
        cols.get(var.index())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Variable {:?} not found in model", var))
    };

    for constraint in builder.constraints() {
        let row = model.add_row();

        for term in &constraint.expression().terms {
            model.set_weight(row, col_of(&term.variable)?, term.coefficient);
        }

        let rhs = constraint.adjusted_rhs();
        match constraint.sense() {
            ConstraintSense::LessEqual => model.set_row_upper(row, rhs),
            ConstraintSense::Equal => model.set_row_equal(row, rhs),
            ConstraintSense::GreaterEqual => model.set_row_lower(row, rhs),
        }
    }

    if let Some(obj_info) = builder.objective() {
        for term in &obj_info.expression.terms {
            model.set_obj_coeff(col_of(&term.variable)?, term.coefficient);
        }

        model.set_obj_sense(match obj_info.sense {
            OptimizationSense::Minimize => Sense::Minimize,
            OptimizationSense::Maximize => Sense::Maximize,
        });
    }

    if let Some(limit) = options.time_limit {
        model.set_parameter("sec", &format!("{:.3}", limit.as_secs_f64()));
    }

    let solution = model.solve();
    let raw = solution.raw();

    let variable_values: Vec<f64> = cols
        .iter()
        .map(|&col| round_to_sig_digits(solution.col(col), 8))
        .collect();

    let status = if raw.is_proven_optimal() {
        OptimizationStatus::Optimal
    } else if raw.is_proven_infeasible() || raw.is_initial_solve_proven_primal_infeasible() {
        OptimizationStatus::Infeasible
    } else if raw.is_continuous_unbounded() {
        OptimizationStatus::Unbounded
    } else if raw.is_seconds_limit_reached() {
        // CBC leaves the LP relaxation in the columns when it found nothing better
        let violation = builder.max_violation(&variable_values);
        debug!(violation, "CBC hit the time limit");
        OptimizationStatus::TimedOut {
            incumbent: violation <= INCUMBENT_TOLERANCE,
        }
    } else if raw.is_abandoned() {
        OptimizationStatus::Other("CBC abandoned the search")
    } else {
        warn!("CBC finished with an unrecognised status");
        OptimizationStatus::Other("Unknown status")
    };

    if !status.has_assignment() {
        return Ok(LPSolution::without_assignment(status));
    }

    let objective_value = builder
        .objective()
        .map(|obj_info| round_to_sig_digits(obj_info.expression.evaluate(&variable_values), 8))
        .unwrap_or(0.0);

    Ok(LPSolution::with_assignment(
        status,
        objective_value,
        variable_values,
    ))
}
