//! CPLEX LP text export
//!
//! Writes a model in the LP file format understood by CBC, Gurobi, HiGHS and
//! GLPK, so a planning model can be inspected or solved outside this crate.
//! Square brackets are not legal in LP names and are written as parentheses.

use std::io::{self, Write};

use itertools::Itertools;

use super::{ConstraintSense, LPModelBuilder, LinearExpression, OptimizationSense, VariableType};

fn lp_name(name: &str, fallback_prefix: char, index: usize) -> String {
    if name.is_empty() {
        return format!("{}{}", fallback_prefix, index);
    }
    name.replace('[', "(").replace(']', ")")
}

fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{}", value)
    }
}

impl<Brand> LPModelBuilder<Brand> {
    fn variable_lp_name(&self, index: usize) -> String {
        lp_name(&self.variables()[index].name, 'x', index)
    }

    fn write_expression<W: Write>(
        &self,
        out: &mut W,
        expression: &LinearExpression<Brand>,
    ) -> io::Result<()> {
        if expression.terms.is_empty() {
            return write!(out, " 0");
        }
        for (i, term) in expression.terms.iter().enumerate() {
            let sign = if term.coefficient < 0.0 { '-' } else { '+' };
            if i == 0 && sign == '+' {
                write!(out, " ")?;
            } else {
                write!(out, " {} ", sign)?;
            }
            write!(
                out,
                "{} {}",
                format_number(term.coefficient.abs()),
                self.variable_lp_name(term.variable.index())
            )?;
        }
        Ok(())
    }

    /// Write the model in CPLEX LP format.
    pub fn write_lp<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "\\ {} variables, {} constraints",
            self.variables().len(),
            self.constraints().len()
        )?;

        let (sense, objective) = match self.objective() {
            Some(obj) => (obj.sense, Some(&obj.expression)),
            None => (OptimizationSense::Minimize, None),
        };
        writeln!(
            out,
            "{}",
            match sense {
                OptimizationSense::Minimize => "Minimize",
                OptimizationSense::Maximize => "Maximize",
            }
        )?;
        write!(out, " obj:")?;
        match objective {
            Some(expression) => self.write_expression(out, expression)?,
            None => write!(out, " 0")?,
        }
        writeln!(out)?;

        writeln!(out, "Subject To")?;
        for (index, constraint) in self.constraints().iter().enumerate() {
            write!(out, " {}:", lp_name(constraint.name(), 'c', index))?;
            self.write_expression(out, constraint.expression())?;
            let op = match constraint.sense() {
                ConstraintSense::LessEqual => "<=",
                ConstraintSense::Equal => "=",
                ConstraintSense::GreaterEqual => ">=",
            };
            writeln!(out, " {} {}", op, format_number(constraint.adjusted_rhs()))?;
        }

        writeln!(out, "Bounds")?;
        for (index, info) in self.variables().iter().enumerate() {
            if info.var_type == VariableType::Binary {
                continue;
            }
            writeln!(
                out,
                " {} <= {} <= {}",
                format_number(info.lower_bound),
                self.variable_lp_name(index),
                format_number(info.upper_bound)
            )?;
        }

        let names_of = |var_type: VariableType| {
            self.variables()
                .iter()
                .enumerate()
                .filter(move |(_, info)| info.var_type == var_type)
                .map(|(index, _)| self.variable_lp_name(index))
                .collect::<Vec<_>>()
        };

        for (section, var_type) in [
            ("General", VariableType::Integer),
            ("Binary", VariableType::Binary),
        ] {
            let names = names_of(var_type);
            if names.is_empty() {
                continue;
            }
            writeln!(out, "{}", section)?;
            for chunk in &names.into_iter().chunks(8) {
                writeln!(out, " {}", chunk.format(" "))?;
            }
        }

        writeln!(out, "End")
    }
}

#[cfg(test)]
mod tests {
    use crate::lp_solver::{OptimizationSense, VariableType};
    use crate::{constraint, lp_model_builder};

    #[test]
    fn test_write_lp_sections() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("prod[1]", VariableType::Integer, 0.0, f64::INFINITY);
        let y = builder.add_variable("state[1]", VariableType::Binary, 0.0, 1.0);
        let z = builder.add_variable("", VariableType::Continuous, -1.0, 1.0);

        builder.add_constraint(constraint!("big_m[1]", (x + 20.0 * y) <= 20.0));
        builder.add_constraint(constraint!((x - z + 2.0) >= 3.0));
        builder.set_objective(225.0 * x + 500.0 * y, OptimizationSense::Minimize);

        let mut out = Vec::new();
        builder.write_lp(&mut out).expect("writing to a Vec cannot fail");
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Minimize\n obj: 225 prod(1) + 500 state(1)\n"));
        assert!(text.contains(" big_m(1): 1 prod(1) + 20 state(1) <= 20\n"));
        assert!(text.contains(" c1: 1 prod(1) - 1 x2 >= 1\n"));
        assert!(text.contains(" 0 <= prod(1) <= +inf\n"));
        assert!(text.contains(" -1 <= x2 <= 1\n"));
        assert!(text.contains("General\n prod(1)\n"));
        assert!(text.contains("Binary\n state(1)\n"));
        assert!(!text.contains("state(1) <="));
        assert!(text.ends_with("End\n"));
    }
}
