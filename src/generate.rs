//! Generation driver.
//!
//! Walks the specification table in authored order and writes every
//! stack's artifacts to its derived destination paths. Runs are full
//! rebuilds: each artifact unconditionally overwrites whatever existed
//! at its path, and an identical table produces byte-identical files.
//!
//! Validation is fail-fast: every descriptor is normalized before the
//! first byte is written, so a malformed entry never leaves partial
//! output behind. I/O failures, in contrast, are per-artifact: they are
//! recorded with enough context to pinpoint the failing unit and do not
//! stop sibling descriptors.

use crate::emit;
use crate::emit::script::script_for;
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::names::NormalizedNames;
use crate::spec::{AgentDescriptor, SpecTable};
use std::path::Path;

/// Which demo page the driver emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoVariant {
    /// Simple form-based page.
    Form,
    /// Scripted-conversation page.
    Chat,
}

/// The artifact that failed, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CodeStub,
    DemoPage,
    Metadata,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::CodeStub => write!(f, "code stub"),
            ArtifactKind::DemoPage => write!(f, "demo page"),
            ArtifactKind::Metadata => write!(f, "metadata"),
        }
    }
}

/// One artifact that could not be emitted or written.
#[derive(Debug, Clone)]
pub struct ArtifactFailure {
    pub category: String,
    pub name: String,
    pub kind: ArtifactKind,
    pub message: String,
}

impl std::fmt::Display for ArtifactFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({}): {}",
            self.category, self.name, self.kind, self.message
        )
    }
}

/// Outcome of one driver run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// `<category>/<stack_dir>` of every fully generated stack.
    pub completed: Vec<String>,

    /// Artifacts successfully written.
    pub files_written: usize,

    /// Per-artifact failures, in table order.
    pub failures: Vec<ArtifactFailure>,
}

impl GenerationReport {
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate every artifact for every descriptor in the table.
pub fn generate_all(
    table: &SpecTable,
    root: &Path,
    variant: DemoVariant,
) -> Result<GenerationReport> {
    run(table, root, variant, false)
}

/// Overwrite every stack's demo page with the conversational template,
/// leaving code stubs and metadata untouched.
pub fn update_demos(table: &SpecTable, root: &Path) -> Result<GenerationReport> {
    run(table, root, DemoVariant::Chat, true)
}

fn run(
    table: &SpecTable,
    root: &Path,
    variant: DemoVariant,
    demos_only: bool,
) -> Result<GenerationReport> {
    // Normalize everything up front; a single malformed name aborts the
    // run before any write happens.
    let mut units: Vec<(&str, &AgentDescriptor, NormalizedNames)> = Vec::new();
    for category in &table.categories {
        for descriptor in &category.agents {
            let names = NormalizedNames::derive(&category.name, descriptor)?;
            units.push((category.name.as_str(), descriptor, names));
        }
    }

    let mut report = GenerationReport::default();

    for (category, descriptor, names) in &units {
        let mut stack_ok = true;

        if !demos_only {
            stack_ok &= write_artifact(
                root,
                &mut report,
                category,
                descriptor,
                ArtifactKind::CodeStub,
                names.code_stub_path(),
                emit::emit_code(descriptor, names),
            );
        }

        let demo = match variant {
            DemoVariant::Form => emit::emit_form_demo(descriptor),
            DemoVariant::Chat => {
                emit::emit_chat_demo(descriptor, &script_for(&descriptor.name))
            }
        };
        stack_ok &= write_artifact(
            root,
            &mut report,
            category,
            descriptor,
            ArtifactKind::DemoPage,
            names.demo_path(),
            demo,
        );

        if !demos_only {
            let metadata = emit::emit_metadata(descriptor, category, names);
            stack_ok &= write_artifact(
                root,
                &mut report,
                category,
                descriptor,
                ArtifactKind::Metadata,
                names.metadata_path(),
                emit::render_metadata(&metadata),
            );
        }

        if stack_ok {
            report
                .completed
                .push(format!("{}/{}", category, names.stack_dir));
        }
    }

    Ok(report)
}

/// Write one emitted artifact, recording failure instead of propagating
/// so sibling descriptors still generate.
fn write_artifact(
    root: &Path,
    report: &mut GenerationReport,
    category: &str,
    descriptor: &AgentDescriptor,
    kind: ArtifactKind,
    relative: std::path::PathBuf,
    emitted: Result<String>,
) -> bool {
    let outcome = emitted.and_then(|text| atomic_write_file(root.join(&relative), &text));
    match outcome {
        Ok(()) => {
            report.files_written += 1;
            true
        }
        Err(e) => {
            report.failures.push(ArtifactFailure {
                category: category.to_string(),
                name: descriptor.name.clone(),
                kind,
                message: e.to_string(),
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackgenError;
    use std::fs;
    use tempfile::TempDir;

    fn table() -> SpecTable {
        SpecTable::parse(
            r#"
version: "1.0.0"
categories:
  - name: healthcare_stack
    agents:
      - name: care_gap_closure
        display_name: Care Gap Closure Agent
        description: Identifies missing screenings and automates patient outreach
        emoji: "🎯"
        systems: [EHR, CRM]
        benefits: [Improves quality scores]
        use_cases: [Preventive care reminders]
"#,
        )
        .unwrap()
    }

    #[test]
    fn produces_exactly_three_files_at_derived_paths() {
        let temp_dir = TempDir::new().unwrap();
        let report = generate_all(&table(), temp_dir.path(), DemoVariant::Form).unwrap();

        assert!(report.ok());
        assert_eq!(report.files_written, 3);
        assert_eq!(report.completed, vec!["healthcare_stack/care_gap_closure_stack"]);

        let stack = temp_dir.path().join("healthcare_stack/care_gap_closure_stack");
        assert!(stack.join("agents/care_gap_closure_agent.py").exists());
        assert!(stack.join("demos/care_gap_closure_demo.html").exists());
        assert!(stack.join("metadata.json").exists());
    }

    #[test]
    fn metadata_api_keys_come_from_first_two_systems() {
        let temp_dir = TempDir::new().unwrap();
        generate_all(&table(), temp_dir.path(), DemoVariant::Form).unwrap();

        let text = fs::read_to_string(
            temp_dir
                .path()
                .join("healthcare_stack/care_gap_closure_stack/metadata.json"),
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed["technicalRequirements"]["apiKeys"],
            serde_json::json!(["EHR_API_KEY", "CRM_API_KEY"])
        );
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        generate_all(&table(), first.path(), DemoVariant::Form).unwrap();
        generate_all(&table(), second.path(), DemoVariant::Form).unwrap();

        for rel in [
            "healthcare_stack/care_gap_closure_stack/agents/care_gap_closure_agent.py",
            "healthcare_stack/care_gap_closure_stack/demos/care_gap_closure_demo.html",
            "healthcare_stack/care_gap_closure_stack/metadata.json",
        ] {
            assert_eq!(
                fs::read_to_string(first.path().join(rel)).unwrap(),
                fs::read_to_string(second.path().join(rel)).unwrap(),
                "mismatch for {}",
                rel
            );
        }
    }

    #[test]
    fn update_demos_overwrites_only_the_demo_page() {
        let temp_dir = TempDir::new().unwrap();
        generate_all(&table(), temp_dir.path(), DemoVariant::Form).unwrap();

        let stack = temp_dir.path().join("healthcare_stack/care_gap_closure_stack");
        let stub_before = fs::read_to_string(stack.join("agents/care_gap_closure_agent.py")).unwrap();
        let demo_before = fs::read_to_string(stack.join("demos/care_gap_closure_demo.html")).unwrap();

        let report = update_demos(&table(), temp_dir.path()).unwrap();
        assert_eq!(report.files_written, 1);

        let stub_after = fs::read_to_string(stack.join("agents/care_gap_closure_agent.py")).unwrap();
        let demo_after = fs::read_to_string(stack.join("demos/care_gap_closure_demo.html")).unwrap();

        assert_eq!(stub_before, stub_after);
        assert_ne!(demo_before, demo_after);
        assert!(demo_after.contains("const demoScript ="));
    }

    #[test]
    fn malformed_name_aborts_before_any_write() {
        let bad_table = SpecTable::parse(
            r#"
version: "1.0.0"
categories:
  - name: healthcare_stack
    agents:
      - name: care_gap_closure
        display_name: Care Gap Closure Agent
        description: Fine descriptor
        systems: [EHR]
        benefits: [B]
        use_cases: [U]
      - name: Bad-Name
        display_name: Broken
        description: Invalid name
        systems: [EHR]
        benefits: [B]
        use_cases: [U]
"#,
        )
        .unwrap();

        let temp_dir = TempDir::new().unwrap();
        let err = generate_all(&bad_table, temp_dir.path(), DemoVariant::Form).unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));

        // Even the valid first descriptor must not have been written.
        assert!(!temp_dir.path().join("healthcare_stack").exists());
    }

    #[test]
    fn chat_variant_generates_conversational_page() {
        let temp_dir = TempDir::new().unwrap();
        generate_all(&table(), temp_dir.path(), DemoVariant::Chat).unwrap();

        let demo = fs::read_to_string(
            temp_dir
                .path()
                .join("healthcare_stack/care_gap_closure_stack/demos/care_gap_closure_demo.html"),
        )
        .unwrap();
        assert!(demo.contains("Conversational Demo"));
        assert!(demo.contains("const demoScript ="));
    }

    #[test]
    fn builtin_table_generates_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let table = SpecTable::builtin().unwrap();
        let report = generate_all(&table, temp_dir.path(), DemoVariant::Form).unwrap();

        assert!(report.ok());
        assert_eq!(report.files_written, table.descriptor_count() * 3);
    }
}
