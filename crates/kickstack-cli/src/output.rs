use anyhow::Context;
use kickstack_core::patch::{PatchReport, PatchStatus};
use kickstack_core::pipeline::RunReport;

pub fn print_report_json(report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    println!("{json}");
    Ok(())
}

fn status_cell(report: &PatchReport) -> String {
    match report.status {
        PatchStatus::Incomplete if report.required => "incomplete (required)".to_string(),
        status => status.as_str().to_string(),
    }
}

/// One row per patch rule, columns padded to the widest cell. The note column
/// only appears when some rule carries a reason.
pub fn patch_table(patches: &[PatchReport]) -> String {
    let with_notes = patches.iter().any(|p| p.reason.is_some());
    let mut rows: Vec<Vec<String>> = vec![["RULE", "FILE", "STATUS", "NOTE"]
        .iter()
        .map(|h| h.to_string())
        .collect()];
    rows.extend(patches.iter().map(|p| {
        vec![
            p.rule.clone(),
            p.target.display().to_string(),
            status_cell(p),
            p.reason.clone().unwrap_or_default(),
        ]
    }));
    let columns = if with_notes { 4 } else { 3 };

    let widths: Vec<usize> = (0..columns)
        .map(|i| rows.iter().map(|r| r[i].len()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:w$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
