//! The `generate` command: full rebuild of every stack from the
//! specification table.

use super::load_table;
use crate::cli::GenerateArgs;
use crate::error::{Result, StackgenError};
use crate::events::{Event, EventAction, log_event_best_effort};
use crate::generate::{DemoVariant, generate_all};
use serde_json::json;

pub(super) fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let table = load_table(args.spec)?;
    let variant = if args.chat {
        DemoVariant::Chat
    } else {
        DemoVariant::Form
    };

    let report = generate_all(&table, &args.root, variant)?;

    for stack in &report.completed {
        println!("Generated {}", stack);
    }
    for failure in &report.failures {
        eprintln!("Failed: {}", failure);
    }

    println!(
        "{} stack(s) generated, {} file(s) written under '{}'",
        report.completed.len(),
        report.files_written,
        args.root.display()
    );

    log_event_best_effort(
        &args.root,
        Event::new(EventAction::Generate).with_details(json!({
            "table_version": table.version,
            "descriptors": table.descriptor_count(),
            "files_written": report.files_written,
            "failures": report.failures.len(),
            "variant": if args.chat { "chat" } else { "form" },
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn generate_writes_artifacts_and_logs_event() {
        let temp_dir = TempDir::new().unwrap();
        let args = GenerateArgs {
            root: temp_dir.path().to_path_buf(),
            spec: None,
            chat: false,
        };

        cmd_generate(args).unwrap();

        // Built-in table includes the healthcare category.
        assert!(
            temp_dir
                .path()
                .join("healthcare_stack/care_gap_closure_stack/metadata.json")
                .exists()
        );

        let log = fs::read_to_string(events::events_file(temp_dir.path())).unwrap();
        assert!(log.contains("\"action\":\"generate\""));
    }

    #[test]
    fn generate_with_missing_spec_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let args = GenerateArgs {
            root: temp_dir.path().to_path_buf(),
            spec: Some(temp_dir.path().join("missing.yaml")),
            chat: false,
        };

        assert!(cmd_generate(args).is_err());
    }
}
