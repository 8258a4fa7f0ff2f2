//! Operator overloading for linear expressions
//!
//! Variables, expressions and `f64` constants combine with `+`, `-`, `*`
//! and unary `-`, and expressions can be summed from iterators:
//!
//! ```rust
//! use lineplan::lp_model_builder;
//! use lineplan::lp_solver::{LinearExpression, VariableType};
//!
//! let mut builder = lp_model_builder!();
//! let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
//! let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);
//!
//! let expr = 2.0 * x + 3.0 * y - 5.0;
//! assert_eq!(expr.terms.len(), 2);
//! assert_eq!(expr.constant, -5.0);
//!
//! let total: LinearExpression<_> = [x, y].into_iter().map(|v| 4.0 * v).sum();
//! assert_eq!(total.terms.len(), 2);
//! ```
//!
//! All operations preserve the brand, so variables of different models
//! cannot be combined.

use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use super::{LinearExpression, LinearTerm, VariableId};

impl<Brand, R> Add<R> for LinearExpression<Brand>
where
    R: Into<LinearExpression<Brand>>,
{
    type Output = LinearExpression<Brand>;

    fn add(mut self, other: R) -> Self::Output {
        let other = other.into();
        self.terms.extend(other.terms);
        self.constant += other.constant;
        self
    }
}

impl<Brand, R> Sub<R> for LinearExpression<Brand>
where
    R: Into<LinearExpression<Brand>>,
{
    type Output = LinearExpression<Brand>;

    fn sub(self, other: R) -> Self::Output {
        let other: LinearExpression<Brand> = other.into();
        self + (-other)
    }
}

impl<Brand> Mul<f64> for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(self, factor: f64) -> Self::Output {
        LinearExpression {
            terms: self
                .terms
                .into_iter()
                .map(|term| LinearTerm {
                    coefficient: term.coefficient * factor,
                    variable: term.variable,
                })
                .collect(),
            constant: self.constant * factor,
        }
    }
}

impl<Brand> Neg for LinearExpression<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl<Brand> Sum for LinearExpression<Brand> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LinearExpression::new(0.0), |acc, expr| acc + expr)
    }
}

impl<Brand, R> Add<R> for VariableId<Brand>
where
    R: Into<LinearExpression<Brand>>,
{
    type Output = LinearExpression<Brand>;

    fn add(self, other: R) -> Self::Output {
        LinearExpression::from_variable(self) + other
    }
}

impl<Brand, R> Sub<R> for VariableId<Brand>
where
    R: Into<LinearExpression<Brand>>,
{
    type Output = LinearExpression<Brand>;

    fn sub(self, other: R) -> Self::Output {
        LinearExpression::from_variable(self) - other
    }
}

impl<Brand> Mul<f64> for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn mul(self, factor: f64) -> Self::Output {
        LinearExpression {
            terms: vec![LinearTerm {
                coefficient: factor,
                variable: self,
            }],
            constant: 0.0,
        }
    }
}

impl<Brand> Neg for VariableId<Brand> {
    type Output = LinearExpression<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

// Constants on the left-hand side

impl<Brand> Mul<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, variable: VariableId<Brand>) -> Self::Output {
        variable * self
    }
}

impl<Brand> Mul<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn mul(self, expression: LinearExpression<Brand>) -> Self::Output {
        expression * self
    }
}

impl<Brand> Add<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn add(self, variable: VariableId<Brand>) -> Self::Output {
        LinearExpression::new(self) + variable
    }
}

impl<Brand> Sub<VariableId<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn sub(self, variable: VariableId<Brand>) -> Self::Output {
        LinearExpression::new(self) - variable
    }
}

impl<Brand> Sub<LinearExpression<Brand>> for f64 {
    type Output = LinearExpression<Brand>;

    fn sub(self, expression: LinearExpression<Brand>) -> Self::Output {
        LinearExpression::new(self) - expression
    }
}

#[cfg(test)]
mod tests {
    use crate::lp_model_builder;
    use crate::lp_solver::{LinearExpression, VariableType};

    #[test]
    fn test_expression_operations() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let expr = 2.0 * x + 3.0 * y + 5.0;
        assert_eq!(expr.constant, 5.0);
        assert_eq!(expr.terms.len(), 2);

        assert_eq!((x + y).terms.len(), 2);
        assert_eq!((x - y).terms[1].coefficient, -1.0);
        assert_eq!((2.0 * x).terms[0].coefficient, 2.0);
        assert_eq!((x * 2.0).terms[0].coefficient, 2.0);
    }

    #[test]
    fn test_add_variable_to_linear_expression() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);

        let result = (2.0 * x + 5.0) + y;

        assert_eq!(result.terms.len(), 2);
        assert_eq!(result.constant, 5.0);
        assert_eq!(result.terms[0].coefficient, 2.0);
        assert_eq!(result.terms[0].variable, x);
        assert_eq!(result.terms[1].coefficient, 1.0);
        assert_eq!(result.terms[1].variable, y);
    }

    #[test]
    fn test_constant_minus_variable() {
        let mut builder = lp_model_builder!();
        let state = builder.add_variable("state", VariableType::Binary, 0.0, 1.0);

        // 1000 * (1 - state)
        let expr = 1000.0 * (1.0 - state);
        assert_eq!(expr.constant, 1000.0);
        assert_eq!(expr.terms[0].coefficient, -1000.0);
        assert_eq!(expr.evaluate(&[1.0]), 0.0);
        assert_eq!(expr.evaluate(&[0.0]), 1000.0);
    }

    #[test]
    fn test_subtracting_expression_negates_constant() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Integer, 0.0, 10.0);

        let expr = x - (y + 4.0);
        assert_eq!(expr.constant, -4.0);
        assert_eq!(expr.evaluate(&[10.0, 3.0]), 3.0);
    }

    #[test]
    fn test_sum_of_expressions() {
        let mut builder = lp_model_builder!();
        let vars: Vec<_> = (0..4)
            .map(|i| builder.add_variable(format!("v{}", i), VariableType::Integer, 0.0, 1.0))
            .collect();

        let total: LinearExpression<_> = vars.iter().map(|&v| 2.0 * v).sum();
        assert_eq!(total.terms.len(), 4);
        assert_eq!(total.evaluate(&[1.0, 0.0, 1.0, 1.0]), 6.0);
    }

    #[test]
    fn test_variable_id_debug() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);

        let debug_str = format!("{:?}", x);
        assert!(debug_str.contains("VariableId"));
    }
}
