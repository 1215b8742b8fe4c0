//! Command implementations for stackgen.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the shared specification-table loader.

mod demos;
mod generate;
mod manifest_cmd;
mod repair_cmd;

use crate::cli::Command;
use crate::error::Result;
use crate::spec::SpecTable;
use std::path::PathBuf;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Generate(args) => generate::cmd_generate(args),
        Command::UpdateDemos(args) => demos::cmd_update_demos(args),
        Command::Repair(args) => repair_cmd::cmd_repair(args),
        Command::Manifest(args) => manifest_cmd::cmd_manifest(args),
    }
}

/// Load the table named by `--spec`, or fall back to the built-in one.
pub(crate) fn load_table(spec: Option<PathBuf>) -> Result<SpecTable> {
    match spec {
        Some(path) => SpecTable::load(path),
        None => SpecTable::builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackgenError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_table_defaults_to_builtin() {
        let table = load_table(None).unwrap();
        assert!(table.descriptor_count() > 0);
    }

    #[test]
    fn load_table_reads_spec_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stacks.yaml");
        fs::write(
            &path,
            r#"
version: "1.0.0"
categories:
  - name: energy_stack
    agents:
      - name: emission_tracking
        display_name: Emission Tracking Agent
        description: Tracks emissions
        systems: [SAP]
        benefits: [Compliance]
        use_cases: [Reporting]
"#,
        )
        .unwrap();

        let table = load_table(Some(path)).unwrap();
        assert_eq!(table.descriptor_count(), 1);
    }

    #[test]
    fn load_table_missing_file_is_io_error() {
        let err = load_table(Some(PathBuf::from("/no/such/spec.yaml"))).unwrap_err();
        assert!(matches!(err, StackgenError::Io { .. }));
    }
}
