//! Macros for the LP solver module
//!
//! `lp_model_builder!` creates builders with a fresh brand, and `constraint!`
//! turns comparison-like syntax into [`Constraint`](super::Constraint) values.

/// Create a new model builder with a unique brand
///
/// Each invocation defines its own brand type, so variables cannot leak
/// between models.
///
/// ```rust
/// use lineplan::lp_model_builder;
/// use lineplan::lp_solver::VariableType;
///
/// let mut production_model = lp_model_builder!(ProductionModel);
/// let mut staffing_model = lp_model_builder!(StaffingModel);
///
/// let units = production_model.add_variable("units", VariableType::Integer, 0.0, 100.0);
/// let shifts = staffing_model.add_variable("shifts", VariableType::Integer, 0.0, 21.0);
///
/// // Compile-time error, the brands differ:
/// // staffing_model.add_constraint(lineplan::constraint!((units) <= 50.0));
/// # let _ = (units, shifts);
/// ```
#[macro_export]
macro_rules! lp_model_builder {
    ($brand_name:ident) => {{
        #[derive(Debug)]
        struct $brand_name;
        $crate::lp_solver::LPModelBuilder::<$brand_name>::new()
    }};

    // `UniqueBrand` lives inside the block, so every expansion gets its own type
    () => {{
        #[derive(Debug)]
        struct UniqueBrand;
        $crate::lp_solver::LPModelBuilder::<UniqueBrand>::new()
    }};
}

/// Create constraints using comparison syntax
///
/// The left-hand side must be in parentheses. An optional leading name is
/// kept on the constraint and shows up in exported LP files.
///
/// ```rust
/// use lineplan::constraint;
/// use lineplan::lp_model_builder;
/// use lineplan::lp_solver::VariableType;
///
/// let mut builder = lp_model_builder!();
/// let a = builder.add_variable("a", VariableType::Integer, 0.0, 10.0);
/// let b = builder.add_variable("b", VariableType::Integer, 0.0, 10.0);
///
/// builder.add_constraint(constraint!((a + b) == 10.0));
/// builder.add_constraint(constraint!("a_cap", (2.0 * a) <= 15.0));
/// builder.add_constraint(constraint!(format!("b_floor[{}]", 1), (b) >= 1.0));
/// ```
#[macro_export]
macro_rules! constraint {
    (($lhs:expr) == $rhs:expr) => {
        $crate::constraint!("", ($lhs) == $rhs)
    };
    (($lhs:expr) <= $rhs:expr) => {
        $crate::constraint!("", ($lhs) <= $rhs)
    };
    (($lhs:expr) >= $rhs:expr) => {
        $crate::constraint!("", ($lhs) >= $rhs)
    };

    ($name:expr, ($lhs:expr) == $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $name,
            $lhs,
            $crate::lp_solver::ConstraintSense::Equal,
            $rhs as f64,
        )
    };
    ($name:expr, ($lhs:expr) <= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $name,
            $lhs,
            $crate::lp_solver::ConstraintSense::LessEqual,
            $rhs as f64,
        )
    };
    ($name:expr, ($lhs:expr) >= $rhs:expr) => {
        $crate::lp_solver::Constraint::new(
            $name,
            $lhs,
            $crate::lp_solver::ConstraintSense::GreaterEqual,
            $rhs as f64,
        )
    };
}
