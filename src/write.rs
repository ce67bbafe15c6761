use crate::data::Report;
use std::io::Write;

/// Renders a report as a row-numbered plain-text table with a title line.
/// An empty report prints a fixed message and nothing else.
pub(crate) fn print_report<W: Write>(
    mut writer: W,
    report_type: &str,
    report: &Report,
) -> Result<(), anyhow::Error> {
    if report.rows.is_empty() {
        writeln!(writer, "No data to display")?;
        return Ok(());
    }
    let mut table: Vec<[String; 3]> = vec![[
        "#".to_string(),
        report.columns[0].to_string(),
        report.columns[1].to_string(),
    ]];
    for (i, row) in report.rows.iter().enumerate() {
        table.push([(i + 1).to_string(), row.group.clone(), row.metric.to_string()]);
    }
    let mut widths = [0usize; 3];
    for row in &table {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    writeln!(writer, "Report: {report_type}")?;
    for (i, row) in table.iter().enumerate() {
        writeln!(
            writer,
            "{:>w0$}  {:<w1$}  {:>w2$}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )?;
        if i == 0 {
            writeln!(
                writer,
                "{}  {}  {}",
                "-".repeat(widths[0]),
                "-".repeat(widths[1]),
                "-".repeat(widths[2]),
            )?;
        }
    }
    writeln!(writer)?;
    Ok(())
}
