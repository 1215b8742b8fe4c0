//! The `repair` command: idempotent cleanup of template-escaping
//! corruption in generated demo pages.

use crate::cli::RepairArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, log_event_best_effort};
use crate::repair::repair_tree;
use serde_json::json;

pub(super) fn cmd_repair(args: RepairArgs) -> Result<()> {
    let report = repair_tree(&args.root)?;

    for path in &report.changed_files {
        println!("Fixed {}", path.display());
    }
    for error in &report.errors {
        eprintln!("Error: {}", error);
    }

    if report.changed == 0 {
        println!("No corruption found in {} file(s) scanned", report.scanned);
    } else {
        println!(
            "Fixed {} of {} file(s) scanned",
            report.changed, report.scanned
        );
    }

    log_event_best_effort(
        &args.root,
        Event::new(EventAction::Repair).with_details(json!({
            "scanned": report.scanned,
            "changed": report.changed,
            "errors": report.errors.len(),
        })),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn repair_run_is_a_noop_on_clean_tree() {
        let temp_dir = TempDir::new().unwrap();
        let demos = temp_dir.path().join("x_stack/demos");
        fs::create_dir_all(&demos).unwrap();
        fs::write(demos.join("x_demo.html"), "content: '';").unwrap();

        let args = RepairArgs {
            root: temp_dir.path().to_path_buf(),
        };
        cmd_repair(args).unwrap();

        assert_eq!(
            fs::read_to_string(demos.join("x_demo.html")).unwrap(),
            "content: '';"
        );
    }

    #[test]
    fn repair_fixes_corrupted_pages() {
        let temp_dir = TempDir::new().unwrap();
        let demos = temp_dir.path().join("x_stack/demos");
        fs::create_dir_all(&demos).unwrap();
        fs::write(demos.join("x_demo.html"), "content: ``;").unwrap();

        let args = RepairArgs {
            root: temp_dir.path().to_path_buf(),
        };
        cmd_repair(args).unwrap();

        assert_eq!(
            fs::read_to_string(demos.join("x_demo.html")).unwrap(),
            "content: '';"
        );
    }
}
