use ::gurobi::{ConstrSense, Env, LinExpr, Model, ModelSense, Status, VarType, attr, param};
use anyhow::Result;
use tracing::debug;

use crate::lp_solver::*;

fn to_lin_expr<Brand>(expression: &LinearExpression<Brand>, vars: &[::gurobi::Var]) -> Result<LinExpr> {
    let mut gurobi_expr = LinExpr::new();
    for term in &expression.terms {
        let var = vars
            .get(term.variable.index())
            .ok_or_else(|| anyhow::anyhow!("Variable {:?} not found in model", term.variable))?;
        gurobi_expr = gurobi_expr.add_term(term.coefficient, var.clone());
    }
    Ok(gurobi_expr)
}

/// Translate a Gurobi termination status.
///
/// `InfOrUnbd` stays undecided: presolve stopped before telling the two apart.
fn map_status(status: Status, incumbent: bool) -> OptimizationStatus {
    match status {
        Status::Optimal => OptimizationStatus::Optimal,
        Status::Infeasible => OptimizationStatus::Infeasible,
        Status::InfOrUnbd => OptimizationStatus::Other("infeasible or unbounded"),
        Status::Unbounded => OptimizationStatus::Unbounded,
        Status::TimeLimit => OptimizationStatus::TimedOut { incumbent },
        Status::Interrupted => OptimizationStatus::Cancelled,
        Status::Numeric => OptimizationStatus::Other("numerical difficulties"),
        other => {
            debug!(?other, "unmapped Gurobi status");
            OptimizationStatus::Other("Unknown status")
        }
    }
}

/// Solve a model using Gurobi
pub fn solve_gurobi<Brand>(
    builder: &LPModelBuilder<Brand>,
    options: &SolverOptions,
) -> Result<LPSolution<Brand>> {
    let env = Env::new("")?;
    let mut model = Model::new("lineplan", &env)?;

    if options.quiet {
        model.get_env_mut().set(param::OutputFlag, 0)?;
    }
    if let Some(limit) = options.time_limit {
        model.get_env_mut().set(param::TimeLimit, limit.as_secs_f64())?;
    }

    let mut vars = Vec::with_capacity(builder.variables().len());
    for var_info in builder.variables() {
        let vtype = match var_info.var_type {
            VariableType::Continuous => VarType::Continuous,
            VariableType::Integer => VarType::Integer,
            VariableType::Binary => VarType::Binary,
        };

        vars.push(model.add_var(
            &var_info.name,
            vtype,
            0.0, // objective coefficient
            var_info.lower_bound,
            var_info.upper_bound,
            &[],
            &[],
        )?);
    }
    model.update()?;

    for constraint in builder.constraints() {
        let gurobi_expr = to_lin_expr(constraint.expression(), &vars)?;
        let sense = match constraint.sense() {
            ConstraintSense::LessEqual => ConstrSense::Less,
            ConstraintSense::Equal => ConstrSense::Equal,
            ConstraintSense::GreaterEqual => ConstrSense::Greater,
        };
        model.add_constr(
            constraint.name(),
            gurobi_expr,
            sense,
            constraint.adjusted_rhs(),
        )?;
    }
    model.update()?;

    if let Some(obj_info) = builder.objective() {
        let gurobi_expr =
            to_lin_expr(&obj_info.expression, &vars)?.add_constant(obj_info.expression.constant);
        let sense = match obj_info.sense {
            OptimizationSense::Minimize => ModelSense::Minimize,
            OptimizationSense::Maximize => ModelSense::Maximize,
        };
        model.set_objective(gurobi_expr, sense)?;
    }

    model.optimize()?;

    let raw_status = model.status()?;
    let incumbent = matches!(raw_status, Status::TimeLimit) && model.get(attr::SolCount)? > 0;
    let status = map_status(raw_status, incumbent);

    if !status.has_assignment() {
        return Ok(LPSolution::without_assignment(status));
    }

    let variable_values = vars
        .iter()
        .map(|var| var.get(&model, attr::X))
        .collect::<std::result::Result<Vec<f64>, _>>()?;
    let objective_value = model.get(attr::ObjVal)?;

    Ok(LPSolution::with_assignment(
        status,
        objective_value,
        variable_values,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(map_status(Status::Optimal, false), OptimizationStatus::Optimal);
        assert_eq!(map_status(Status::Infeasible, false), OptimizationStatus::Infeasible);
        assert_eq!(
            map_status(Status::InfOrUnbd, false),
            OptimizationStatus::Other("infeasible or unbounded")
        );
        assert_eq!(
            map_status(Status::TimeLimit, true),
            OptimizationStatus::TimedOut { incumbent: true }
        );
        assert_eq!(map_status(Status::Interrupted, false), OptimizationStatus::Cancelled);
    }
}
