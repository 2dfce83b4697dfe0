use crate::coordinator::RunReport;
use crate::domain::ProtectedBranch;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_protected_branches() {
    println!("\x1b[1mProtected branches:\x1b[0m");
    for branch in ProtectedBranch::ALL {
        println!("  - {}", branch);
    }
}

/// Render everything a run did (or, in dry-run, would do). Every skip
/// and failure is printed; nothing is silently suppressed.
pub fn display_run_report(report: &RunReport, dry_run: bool) {
    if report.is_noop() {
        display_status("No addons changed. Nothing to do.");
        return;
    }

    for bumped in &report.bumped {
        let verb = if dry_run { "Would bump" } else { "Bumped" };
        display_success(&format!(
            "{} {}: {} -> {} ({}, {} changed lines)",
            verb,
            bumped.addon.display(),
            bumped.old_version,
            bumped.new_version,
            bumped.class,
            bumped.change_amount
        ));
    }

    for skipped in &report.skipped {
        display_status(&format!(
            "Skipped {}: version {} already released on '{}' (has {})",
            skipped.addon.display(),
            skipped.current_version,
            skipped.branch,
            skipped.reference_version
        ));
    }

    for failed in &report.failed {
        display_error(&format!(
            "Skipped {}: {}",
            failed.addon.display(),
            failed.reason
        ));
    }

    if report.committed {
        display_success(&format!(
            "Committed {} manifest update(s)",
            report.bumped.len()
        ));
    } else if dry_run && !report.bumped.is_empty() {
        display_status(&format!(
            "Dry run: {} manifest(s) would be updated and committed",
            report.bumped.len()
        ));
    }
}
