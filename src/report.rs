//! Rendering of a [`WeeklyPlan`].
//!
//! The table has one column per week and one row per plan field:
//!
//! ```text
//!  week# | 0   | 1  | 2
//! -------+-----+----+----
//!  prodA |     | 10 | 0
//!  prodB |     | 0  | 10
//!  storA | 0   | 0  | 0
//!  storB | 0   | 0  | 0
//!  deci  | 0   | 0  | 1
//!  chan  |     | 0  | 1
//! ```
//!
//! Week 0 has no production or changeover decision, so those cells are blank.

use std::io::Write;

use prettytable::{Cell, Row, Table, format};
use serde::Serialize;

use crate::{PlanError, PlanQuality, WeekRow, WeeklyPlan};

fn blank_or<T: ToString>(value: Option<T>) -> Cell {
    Cell::new(&value.map(|v| v.to_string()).unwrap_or_default())
}

fn field_row(label: &str, rows: &[WeekRow], cell: impl Fn(&WeekRow) -> Cell) -> Row {
    let mut cells = vec![Cell::new(label)];
    cells.extend(rows.iter().map(cell));
    Row::new(cells)
}

/// Build the week-by-field table of `plan`.
pub fn plan_table(plan: &WeeklyPlan) -> Table {
    let rows = plan.rows();
    let mut table = Table::new();

    let mut titles = vec![Cell::new("week#")];
    titles.extend(rows.iter().map(|row| Cell::new(&row.week.to_string())));
    table.set_titles(Row::new(titles));
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    table.add_row(field_row("prodA", rows, |row| blank_or(row.prod_a)));
    table.add_row(field_row("prodB", rows, |row| blank_or(row.prod_b)));
    table.add_row(field_row("storA", rows, |row| blank_or(Some(row.stock_a))));
    table.add_row(field_row("storB", rows, |row| blank_or(Some(row.stock_b))));
    table.add_row(field_row("deci", rows, |row| {
        blank_or(Some(row.line.line_state()))
    }));
    table.add_row(field_row("chan", rows, |row| {
        blank_or(row.changeover.map(u8::from))
    }));

    table
}

/// Write the plan cost followed by the plan table.
pub fn write_report<W: Write>(writer: &mut W, plan: &WeeklyPlan) -> Result<(), PlanError> {
    write!(writer, "Cost = {:.2}", plan.objective())?;
    if plan.quality() == PlanQuality::BestFound {
        write!(writer, " (best found, optimality not proven)")?;
    }
    writeln!(writer)?;

    plan_table(plan).print(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow {
    week: usize,
    prod_a: Option<u32>,
    prod_b: Option<u32>,
    stock_a: u32,
    stock_b: u32,
    line: u8,
    changeover: Option<u8>,
}

impl From<&WeekRow> for CsvRow {
    fn from(row: &WeekRow) -> Self {
        Self {
            week: row.week,
            prod_a: row.prod_a,
            prod_b: row.prod_b,
            stock_a: row.stock_a,
            stock_b: row.stock_b,
            line: row.line.line_state(),
            changeover: row.changeover.map(u8::from),
        }
    }
}

/// Write the plan as CSV, one record per week. Week-0 production and
/// changeover fields are empty.
pub fn write_csv<W: Write>(writer: W, plan: &WeeklyPlan) -> Result<(), PlanError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in plan.rows() {
        csv.serialize(CsvRow::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    fn plan(quality: PlanQuality) -> WeeklyPlan {
        let rows = vec![
            WeekRow {
                week: 0,
                prod_a: None,
                prod_b: None,
                stock_a: 5,
                stock_b: 7,
                line: Product::A,
                changeover: None,
            },
            WeekRow {
                week: 1,
                prod_a: Some(10),
                prod_b: Some(0),
                stock_a: 0,
                stock_b: 7,
                line: Product::A,
                changeover: Some(false),
            },
            WeekRow {
                week: 2,
                prod_a: Some(0),
                prod_b: Some(12),
                stock_a: 0,
                stock_b: 0,
                line: Product::B,
                changeover: Some(true),
            },
        ];
        WeeklyPlan::new(rows, 5850.0, quality)
    }

    fn cells(table: &Table, row: usize) -> Vec<String> {
        table
            .get_row(row)
            .unwrap()
            .iter()
            .map(|cell| cell.get_content())
            .collect()
    }

    #[test]
    fn test_table_rows_and_blank_week_zero() {
        let table = plan_table(&plan(PlanQuality::ProvenOptimal));

        assert_eq!(table.len(), 6);
        assert_eq!(cells(&table, 0), ["prodA", "", "10", "0"]);
        assert_eq!(cells(&table, 1), ["prodB", "", "0", "12"]);
        assert_eq!(cells(&table, 2), ["storA", "5", "0", "0"]);
        assert_eq!(cells(&table, 3), ["storB", "7", "7", "0"]);
        assert_eq!(cells(&table, 4), ["deci", "0", "0", "1"]);
        assert_eq!(cells(&table, 5), ["chan", "", "0", "1"]);
    }

    #[test]
    fn test_report_text() {
        let mut out = Vec::new();
        write_report(&mut out, &plan(PlanQuality::ProvenOptimal)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Cost = 5850.00\n"));
        for label in ["week#", "prodA", "prodB", "storA", "storB", "deci", "chan"] {
            assert!(text.contains(label), "missing {} in\n{}", label, text);
        }
        assert!(!text.contains("best found"));
    }

    #[test]
    fn test_report_marks_best_found_plans() {
        let mut out = Vec::new();
        write_report(&mut out, &plan(PlanQuality::BestFound)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Cost = 5850.00 (best found, optimality not proven)\n"));
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_csv(&mut out, &plan(PlanQuality::ProvenOptimal)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "week,prod_a,prod_b,stock_a,stock_b,line,changeover\n\
             0,,,5,7,0,\n\
             1,10,0,0,7,0,0\n\
             2,0,12,0,0,1,1\n"
        );
    }
}
