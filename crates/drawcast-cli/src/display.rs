//! Human-readable run reports: the summary on stdout, failures on stderr.

use std::io::{self, Write};

use drawcast_core::Calculation;

use crate::run::{RunError, RunSummary};
use drawcast_publish::ErrorPublishReport;

/// Write the success summary.
pub fn print_run_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    let p = &summary.prediction;
    writeln!(out, "=== ALL JSON FILES UPDATED ===")?;
    writeln!(out, "  {:<18} {}", "time", summary.issued_at)?;
    writeln!(out, "  {:<18} {}", "period", summary.period)?;
    writeln!(out, "  {:<18} {}", "next period", summary.next_period)?;
    writeln!(out, "  {:<18} {} ({})", "prediction", p.verdict, p.derived_number)?;
    writeln!(out, "  {:<18} {}%", "confidence", p.confidence)?;
    match &p.calculation {
        Calculation::Derived(t) => writeln!(out, "  {:<18} {}", "calculation", t.explanation)?,
        Calculation::Insufficient { error } => writeln!(out, "  {:<18} {}", "calculation", error)?,
    }
    writeln!(out, "  {:<18} {}", "results fetched", summary.total_results)?;
    writeln!(out, "  {:<18} {}", "api url", summary.current_url)?;
    writeln!(out)?;
    writeln!(out, "Files")?;
    for path in &summary.written {
        writeln!(out, "  {}", path.display())?;
    }
    Ok(())
}

/// Write the failure and the fate of each error document.
pub fn print_failure(
    out: &mut impl Write,
    error: &RunError,
    report: &ErrorPublishReport,
) -> io::Result<()> {
    writeln!(out, "ERROR UPDATING DATA: {error}")?;
    writeln!(
        out,
        "  error documents written: {}/{}",
        report.written.len(),
        report.written.len() + report.failed.len()
    )?;
    for failure in &report.failed {
        writeln!(out, "  {failure}")?;
    }
    Ok(())
}
