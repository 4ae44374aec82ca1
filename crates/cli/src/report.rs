//! Human-readable run reports.

use contracts::{Outcome, TargetReport};

/// Print a target report to stdout
pub fn print_report(report: &TargetReport) {
    if report.requested != report.target {
        println!("\n▶ {} (alias of {})", report.requested, report.target);
    } else {
        println!("\n▶ {}", report.target);
    }

    for (i, step) in report.steps.iter().enumerate() {
        let is_last = i == report.steps.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { " " } else { "│" };
        let mark = if step.passed() { "✓" } else { "✗" };
        let calls = if step.invocations == 1 {
            String::new()
        } else {
            format!(", {} invocations", step.invocations)
        };
        println!(
            "   {} {} {} (exit {}, {} ms{})",
            prefix, mark, step.step, step.exit.code, step.duration_ms, calls
        );
        if let Some(ref file) = step.failed_file {
            println!("   {}     stopped at {}", child_prefix, file.display());
        }
    }

    if let Some(ref coverage) = report.coverage {
        println!(
            "\n📊 Coverage ({} files, {} excluded)",
            coverage.files.len(),
            coverage.excluded_files
        );
        for file in &coverage.files {
            println!(
                "   ├─ {}: {}/{} ({:.1}%)",
                file.path.display(),
                file.lines_hit,
                file.lines_found,
                file.percent()
            );
        }
        println!(
            "   └─ Total: {}/{} ({:.1}%)",
            coverage.lines_hit(),
            coverage.lines_found(),
            coverage.percent()
        );
    }

    match report.outcome() {
        Outcome::Passed => println!("\n✓ {} passed", report.requested),
        Outcome::Failed { kind, exit_code } => {
            println!(
                "\n✗ {} failed ({:?}, exit {})",
                report.requested, kind, exit_code
            )
        }
    }
}
