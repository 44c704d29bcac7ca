//! Human-readable terminal rendering of a timing report.

use colored::Colorize;

use crate::report::Report;

/// Format a [`Report`] for terminal output.
///
/// One line for the total with the frequency used, then one line per zone in
/// execution order with milliseconds to three decimals and the percentage
/// share to two.
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n",
        format!(
            "Total time: {:10.3}ms (CPU freq {})",
            report.total_ms, report.ticks_per_second
        )
        .bold()
    ));

    let width = report
        .rows
        .iter()
        .map(|row| row.name.len())
        .max()
        .unwrap_or(0)
        .max(10);

    for row in &report.rows {
        output.push_str(&format!(
            "  {:>width$}: {:10.3}ms ({:5.2}%)\n",
            row.name,
            row.duration_ms,
            row.percent,
            width = width
        ));
    }

    output
}
