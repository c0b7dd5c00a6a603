//! The `examtrack compare` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::report::AnalyticsReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u32,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = AnalyticsReport::load_json(&baseline_path)?;
    let current = AnalyticsReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );
            println!(
                "Pass rate {:+} points, average score {:+}",
                report.pass_rate_delta, report.average_score_delta
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {}% -> {}% ({:+})",
                        r.field_name, r.baseline_percentage, r.current_percentage, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {}% -> {}% ({:+})",
                        i.field_name, i.baseline_percentage, i.current_percentage, i.delta
                    );
                }
            }

            if report.new_fields > 0 {
                println!("\n{} newly scored field(s)", report.new_fields);
            }
            if report.removed_fields > 0 {
                println!("{} field(s) no longer scored", report.removed_fields);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
