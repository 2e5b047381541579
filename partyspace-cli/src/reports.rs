use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use partyspace_core::{EquilibriumReport, SolverStatus};

fn status_label(status: SolverStatus) -> colored::ColoredString {
    match status {
        SolverStatus::Converged => status.to_string().green(),
        SolverStatus::Exhausted => status.to_string().yellow(),
        SolverStatus::Running => status.to_string().red(),
    }
}

fn signed_points(change: f64) -> String {
    format!("{:+.2}", change * 100.0)
}

pub fn generate_console_report(out: &mut dyn Write, report: &EquilibriumReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Equilibrium Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;
    writeln!(out, "Seed: {}", report.seed)?;
    writeln!(
        out,
        "Population: {} panel rows x {} replications = {} voters",
        report.panel_size, report.replications, report.population_size
    )?;
    writeln!(
        out,
        "Status: {} after {} iterations",
        status_label(report.status),
        report.iterations
    )?;
    if let Some(step) = report.last_step_distance {
        writeln!(out, "Last step distance: {step:.5}")?;
    }
    if report.warnings > 0 {
        writeln!(
            out,
            "Optimizer warnings: {}",
            report.warnings.to_string().yellow()
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "🗳️  Vote Shares".bright_yellow().bold())?;
    writeln!(out, "{}", "--------------".yellow())?;
    writeln!(out, "{:<10} {:>9} {:>9} {:>9}", "Party", "Initial", "Final", "Δ pts")?;
    for row in report.rows() {
        let change = signed_points(row.change);
        let change = if row.change > 0.0 {
            change.green()
        } else if row.change < 0.0 {
            change.red()
        } else {
            change.normal()
        };
        writeln!(
            out,
            "{:<10} {:>8.2}% {:>8.2}% {:>9}",
            row.party.display_name(),
            row.initial * 100.0,
            row.final_share * 100.0,
            change
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "🧭 Strategic Parties".bright_blue().bold())?;
    writeln!(out, "{}", "--------------------".blue())?;
    for party in &report.strategic {
        writeln!(
            out,
            "{}: {} -> {} (moved {:.3})",
            party.party.display_name().bold(),
            party.baseline,
            party.final_position,
            party.displacement
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &EquilibriumReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &EquilibriumReport) -> Result<()> {
    writeln!(out, "# Partyspace Equilibrium Report\n")?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Seed**: {}", report.seed)?;
    writeln!(out, "- **Panel rows**: {}", report.panel_size)?;
    writeln!(out, "- **Replications**: {}", report.replications)?;
    writeln!(out, "- **Status**: {}", report.status)?;
    writeln!(out, "- **Iterations**: {}", report.iterations)?;
    if let Some(step) = report.last_step_distance {
        writeln!(out, "- **Last step distance**: {step:.5}")?;
    }
    writeln!(out, "- **Optimizer warnings**: {}\n", report.warnings)?;

    writeln!(out, "## Vote Shares\n")?;
    writeln!(out, "| Party | Initial | Final | Change (pts) |")?;
    writeln!(out, "|-------|--------:|------:|-------------:|")?;
    for row in report.rows() {
        writeln!(
            out,
            "| {} | {:.2}% | {:.2}% | {} |",
            row.party.display_name(),
            row.initial * 100.0,
            row.final_share * 100.0,
            signed_points(row.change)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Strategic Parties\n")?;
    for party in &report.strategic {
        writeln!(
            out,
            "- **{}**: {} → {} (moved {:.3})",
            party.party.display_name(),
            party.baseline,
            party.final_position,
            party.displacement
        )?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, report: &EquilibriumReport) -> Result<()> {
    writeln!(out, "party,initial_share,final_share,change")?;
    for row in report.rows() {
        writeln!(
            out,
            "{},{:.6},{:.6},{:.6}",
            row.party.key(),
            row.initial,
            row.final_share,
            row.change
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use partyspace_core::{
        Affiliation, FeatureParams, PartyId, Population, Simulation, SimulationConfig, Voter,
    };

    fn sample_report() -> EquilibriumReport {
        let voters = [(-2.0, 0.0), (1.0, 2.0), (4.0, 6.0)]
            .into_iter()
            .map(|(econ, social)| Voter {
                econ_position: econ,
                social_position: social,
                affiliation: Affiliation::Floating,
                adherence_strength: 0.0,
                combined_weight: 1.0 / 3.0,
            })
            .collect();
        let mut config = SimulationConfig::default();
        config.solver.max_iter = 1;
        let sim = Simulation::from_population(
            Population::derive(voters, &FeatureParams::default()),
            3,
            config,
        );
        let outcome = sim.solve();
        sim.report(&outcome)
    }

    fn render(generate: fn(&mut dyn Write, &EquilibriumReport) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        generate(&mut buffer, &sample_report()).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn console_report_lists_every_party() {
        let text = render(generate_console_report);
        assert!(text.contains("Equilibrium Summary"));
        for party in PartyId::ALL {
            assert!(text.contains(party.display_name()));
        }
    }

    #[test]
    fn json_report_round_trips() {
        let text = render(generate_json_report);
        let parsed: EquilibriumReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.iterations, 1);
        assert_eq!(parsed.population_size, 3);
    }

    #[test]
    fn markdown_report_has_share_table() {
        let text = render(generate_markdown_report);
        assert!(text.starts_with("# Partyspace Equilibrium Report"));
        assert!(text.contains("| Party | Initial | Final | Change (pts) |"));
    }

    #[test]
    fn csv_report_has_header_and_six_rows() {
        let text = render(generate_csv_report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "party,initial_share,final_share,change");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("cdu,"));
    }
}
