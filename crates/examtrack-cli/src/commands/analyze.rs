//! The `examtrack analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::report::AnalyticsReport;

use super::open_tracker;

pub async fn execute(
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let (tracker, config) = open_tracker(data, config_path)?;
    let report = tracker.report().await?;
    let format = format.unwrap_or(config.default_format);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "text" => print_summary(&report),
        other => anyhow::bail!("unknown format: {other} (expected text, json, or markdown)"),
    }

    if let Some(dir) = output.or(save.then_some(config.output_dir)) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("report-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &AnalyticsReport) {
    use comfy_table::{Cell, Table};

    let s = &report.snapshot;
    println!(
        "Exams: {} ({} passed) | Pass rate: {}% | Average score: {}",
        s.total_exams, s.passed_exams, s.pass_rate, s.average_score
    );

    if let (Some(best), Some(lowest)) = (report.summary.best_score, report.summary.lowest_score) {
        let change = report
            .summary
            .overall_change
            .map(|c| format!(" | Overall change: {c:+}"))
            .unwrap_or_default();
        println!("Best score: {best} | Lowest score: {lowest}{change}");
    }

    if !s.field_stats.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            "Field",
            "Scores",
            "Avg Score",
            "Avg %",
            "Improvement",
            "Trend",
        ]);
        for (stat, trend) in s.field_stats.iter().zip(&report.trends) {
            table.add_row(vec![
                Cell::new(&stat.field_name),
                Cell::new(stat.exam_count),
                Cell::new(stat.average_score),
                Cell::new(format!("{}%", stat.average_percentage)),
                Cell::new(format!("{:+}", stat.improvement)),
                Cell::new(trend.trend),
            ]);
        }
        println!("\n{table}");
    }

    if let Some(weakest) = &s.weakest_field {
        println!("Weakest field: {weakest}");
    }
    if let Some(strongest) = &s.strongest_field {
        println!("Strongest field: {strongest}");
    }

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for r in &report.recommendations {
            println!("  - {r}");
        }
    }
}
