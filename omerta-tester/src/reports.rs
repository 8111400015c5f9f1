use anyhow::Result;
use colored::Colorize;
use omerta_game::numbers::usize_to_f64;
use std::io::Write;
use std::time::Duration;

use crate::simulation::{RunResult, average_elapsed};

fn success_rate(results: &[RunResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (usize_to_f64(passed) / usize_to_f64(results.len())) * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[RunResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Average run time: {:?}", average_elapsed(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} (seed {}, {} iterations)",
            result.game.key().bold(),
            result.seed,
            result.iterations
        )?;
        for (name, value) in &result.metrics {
            writeln!(out, "   {name}: {value:.3}")?;
        }
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[RunResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[RunResult]) -> Result<()> {
    writeln!(out, "# Omerta Simulation Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {} (seed {})\n", result.game.key(), result.seed)?;
        writeln!(out, "- **Iterations**: {}", result.iterations)?;
        if !result.metrics.is_empty() {
            writeln!(out, "\n| Metric | Value |\n|---|---|")?;
            for (name, value) in &result.metrics {
                writeln!(out, "| {name} | {value:.3} |")?;
            }
        }
        if !result.failures.is_empty() {
            writeln!(out, "\n- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::GameKind;
    use std::collections::BTreeMap;

    fn result(passed: bool) -> RunResult {
        RunResult {
            game: GameKind::OddsEvens,
            seed: 9,
            iterations: 10,
            passed,
            failures: if passed {
                Vec::new()
            } else {
                vec![String::from("game 3: cash 0 after settling, expected 200")]
            },
            metrics: BTreeMap::from([(String::from("win_rate"), 0.5)]),
            elapsed_us: 120,
        }
    }

    #[test]
    fn markdown_report_has_summary_and_table() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[result(true), result(false)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- **Total runs**: 2"), "{text}");
        assert!(text.contains("- **Success rate**: 50.0%"), "{text}");
        assert!(text.contains("| win_rate | 0.500 |"), "{text}");
        assert!(text.contains("  - game 3: cash 0"), "{text}");
    }

    #[test]
    fn json_report_round_trips() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[result(true)]).unwrap();
        let parsed: Vec<RunResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].game, GameKind::OddsEvens);
        assert!(String::from_utf8_lossy(&buf).contains("\"odds-evens\""));
    }

    #[test]
    fn console_report_lists_failures() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[result(false)], Duration::from_millis(3)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("❌ FAIL odds-evens (seed 9, 10 iterations)"), "{text}");
        assert!(text.contains("win_rate: 0.500"), "{text}");
    }
}
