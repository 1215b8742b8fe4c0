//! The `update-demos` command: overwrite every stack's demo page with
//! the conversational template.

use super::load_table;
use crate::cli::UpdateDemosArgs;
use crate::error::{Result, StackgenError};
use crate::events::{Event, EventAction, log_event_best_effort};
use crate::generate::update_demos;
use serde_json::json;

pub(super) fn cmd_update_demos(args: UpdateDemosArgs) -> Result<()> {
    let table = load_table(args.spec)?;
    let report = update_demos(&table, &args.root)?;

    for stack in &report.completed {
        println!("Updated {}", stack);
    }
    for failure in &report.failures {
        eprintln!("Failed: {}", failure);
    }

    println!(
        "{} demo page(s) updated under '{}'",
        report.files_written,
        args.root.display()
    );

    log_event_best_effort(
        &args.root,
        Event::new(EventAction::UpdateDemos).with_details(json!({
            "table_version": table.version,
            "demos_written": report.files_written,
            "failures": report.failures.len(),
        })),
    );

    if report.ok() {
        Ok(())
    } else {
        Err(StackgenError::Generation {
            failed: report.failures.len(),
            total: report.files_written + report.failures.len(),
        })
    }
}
