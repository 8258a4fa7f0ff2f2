//! The `export` command: write the planning model as a CPLEX LP file.
//!
//! The exported file solves in any LP-format MILP solver and uses the same
//! names as the model (`prod_a[3]` becomes `prod_a(3)`).

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use tracing::info;

use crate::{PlanError, plan::InputArgs, schedule};

/// Command-line arguments for the model export command.
#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,

    /// Output LP file (default: stdout)
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

pub fn export_main(args: ExportArgs) -> Result<(), PlanError> {
    let (demand, policy) = args.inputs.load()?;
    let model = schedule::build(&demand, &policy)?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            model.write_lp(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "wrote LP model");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            model.write_lp(&mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plan.lp");
        let args = ExportArgs::try_parse_from([
            "export",
            "--tight-big-m",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        export_main(args).expect("export succeeds");

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("\\ 57 variables, 93 constraints\n"));
        assert!(text.contains(" line_a(1): 1 prod_a(1) + 100 line(1) <= 100\n"));
        assert!(text.trim_end().ends_with("End"));
    }

    #[test]
    fn test_invalid_policy_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.toml");
        fs::write(&policy, "big_m = 10\n").unwrap();
        let output = dir.path().join("plan.lp");

        let args = ExportArgs::try_parse_from([
            "export",
            "--policy",
            policy.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert!(matches!(export_main(args), Err(PlanError::InvalidInput(_))));
        assert!(!output.exists());
    }
}
