//! Rules command - print the linguistic variables and rule base.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use photo_score_core::fuzzy::{ControlSystem, LinguisticVariable};
use photo_score_core::quality::build_system;
use photo_score_core::QualityConfig;

/// Arguments for the rules command
#[derive(Args)]
pub struct RulesArgs {
    /// Emit the rules as JSON strings instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the rules command.
pub fn run(args: &RulesArgs) -> Result<()> {
    let system = build_system(&QualityConfig::default()).context("Failed to build rule base")?;
    let mut out = io::stdout().lock();

    if args.json {
        let rules: Vec<String> = system.rules().iter().map(ToString::to_string).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rules)?)?;
    } else {
        write_text(&mut out, &system)?;
    }

    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, system: &ControlSystem) -> io::Result<()> {
    for variable in system.antecedents() {
        write_variable(out, variable)?;
    }
    write_variable(out, system.consequent())?;

    writeln!(out, "rules:")?;
    for (i, rule) in system.rules().iter().enumerate() {
        writeln!(out, "  {:>2}. {rule}", i + 1)?;
    }
    Ok(())
}

fn write_variable(out: &mut impl Write, variable: &LinguisticVariable) -> io::Result<()> {
    let universe = variable.universe();
    writeln!(
        out,
        "{} [{}, {}]",
        variable.name(),
        universe.min(),
        universe.max()
    )?;
    for term in variable.terms() {
        writeln!(out, "  {:<11} {}", term.name(), term.function())?;
    }
    writeln!(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_variables_and_rules() {
        let system = build_system(&QualityConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_text(&mut buf, &system).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("sharpness [0, 10]"));
        assert!(text.contains("quality [0, 100]"));
        assert!(text.contains("excellent"));
        assert!(text.contains(" 8. "));
        assert!(!text.contains(" 9. "));
    }
}
