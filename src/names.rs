//! Descriptor name normalization.
//!
//! Every downstream emitter derives identifiers and destination paths
//! through this module, so the three artifacts of a stack always agree
//! on naming. Derivation is a pure function of `(category, name)`:
//! equal input yields byte-identical output, which is what makes
//! regeneration, repair, and manifest aggregation line up on the same
//! files across runs.

use crate::error::{Result, StackgenError};
use crate::spec::AgentDescriptor;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Suffix appended to the PascalCase form of the descriptor name.
pub const CLASS_SUFFIX: &str = "Agent";

/// Suffix appended to the descriptor name for the code stub file stem.
pub const FILE_SUFFIX: &str = "_agent";

/// Suffix appended to the descriptor name for the stack directory.
pub const STACK_SUFFIX: &str = "_stack";

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[a-z][a-z0-9_]*$").expect("valid name pattern"))
}

/// Identifiers and destination paths derived from one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedNames {
    /// PascalCase type name for the code stub, e.g. `CareGapClosureAgent`.
    pub class_identifier: String,

    /// Code stub file stem, e.g. `care_gap_closure_agent`.
    pub file_stem: String,

    /// Stack directory name, e.g. `care_gap_closure_stack`.
    pub stack_dir: String,

    /// Category key the stack lives under.
    pub category: String,

    /// Descriptor name the derivation started from.
    pub name: String,
}

impl NormalizedNames {
    /// Derive names and paths for one `(category, descriptor)` pair.
    ///
    /// Fails fast with a `Validation` error if the descriptor name is not
    /// a lowercase snake identifier; a name that cannot be derived cleanly
    /// is never silently mangled.
    pub fn derive(category: &str, descriptor: &AgentDescriptor) -> Result<Self> {
        let name = descriptor.name.as_str();
        if !name_pattern().is_match(name) {
            return Err(StackgenError::Validation(format!(
                "descriptor name '{}' in category '{}' is not a valid identifier \
                 (expected lowercase snake case matching [a-z][a-z0-9_]*)",
                name, category
            )));
        }

        Ok(Self {
            class_identifier: format!("{}{}", pascal_case(name), CLASS_SUFFIX),
            file_stem: format!("{}{}", name, FILE_SUFFIX),
            stack_dir: format!("{}{}", name, STACK_SUFFIX),
            category: category.to_string(),
            name: name.to_string(),
        })
    }

    /// `<category>/<name>_stack/agents/<name>_agent.py`, relative to the
    /// output root.
    pub fn code_stub_path(&self) -> PathBuf {
        PathBuf::from(&self.category)
            .join(&self.stack_dir)
            .join("agents")
            .join(format!("{}.py", self.file_stem))
    }

    /// `<category>/<name>_stack/demos/<name>_demo.html`.
    pub fn demo_path(&self) -> PathBuf {
        PathBuf::from(&self.category)
            .join(&self.stack_dir)
            .join("demos")
            .join(format!("{}_demo.html", self.name))
    }

    /// `<category>/<name>_stack/metadata.json`.
    pub fn metadata_path(&self) -> PathBuf {
        PathBuf::from(&self.category)
            .join(&self.stack_dir)
            .join("metadata.json")
    }

    /// Forward-slash form of the demo path, for embedding in metadata.
    pub fn demo_url(&self) -> String {
        format!(
            "{}/{}/demos/{}_demo.html",
            self.category, self.stack_dir, self.name
        )
    }
}

/// PascalCase a snake identifier: `care_gap_closure` -> `CareGapClosure`.
///
/// Segments that start with a digit pass through unchanged, so
/// `customer_360` becomes `Customer360`.
fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> AgentDescriptor {
        AgentDescriptor {
            name: name.to_string(),
            display_name: "Test Agent".to_string(),
            description: "A test descriptor".to_string(),
            emoji: "🤖".to_string(),
            systems: vec!["EHR".to_string(), "CRM".to_string()],
            benefits: vec!["Benefit".to_string()],
            use_cases: vec!["Use case".to_string()],
        }
    }

    #[test]
    fn derives_pascal_case_class_identifier() {
        let names = NormalizedNames::derive("healthcare_stack", &descriptor("care_gap_closure"))
            .unwrap();
        assert_eq!(names.class_identifier, "CareGapClosureAgent");
        assert_eq!(names.file_stem, "care_gap_closure_agent");
        assert_eq!(names.stack_dir, "care_gap_closure_stack");
    }

    #[test]
    fn digit_segments_pass_through() {
        let names =
            NormalizedNames::derive("b2b_sales_stack", &descriptor("customer_360")).unwrap();
        assert_eq!(names.class_identifier, "Customer360Agent");
    }

    #[test]
    fn single_segment_name() {
        let names = NormalizedNames::derive("general_stack", &descriptor("triage")).unwrap();
        assert_eq!(names.class_identifier, "TriageAgent");
    }

    #[test]
    fn derivation_is_deterministic() {
        let d = descriptor("care_gap_closure");
        let a = NormalizedNames::derive("healthcare_stack", &d).unwrap();
        let b = NormalizedNames::derive("healthcare_stack", &d).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn destination_paths_match_layout() {
        let names = NormalizedNames::derive("healthcare_stack", &descriptor("care_gap_closure"))
            .unwrap();
        assert_eq!(
            names.code_stub_path(),
            PathBuf::from("healthcare_stack/care_gap_closure_stack/agents/care_gap_closure_agent.py")
        );
        assert_eq!(
            names.demo_path(),
            PathBuf::from("healthcare_stack/care_gap_closure_stack/demos/care_gap_closure_demo.html")
        );
        assert_eq!(
            names.metadata_path(),
            PathBuf::from("healthcare_stack/care_gap_closure_stack/metadata.json")
        );
        assert_eq!(
            names.demo_url(),
            "healthcare_stack/care_gap_closure_stack/demos/care_gap_closure_demo.html"
        );
    }

    #[test]
    fn rejects_uppercase_name() {
        let err = NormalizedNames::derive("healthcare_stack", &descriptor("CareGap")).unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));
        assert!(err.to_string().contains("CareGap"));
    }

    #[test]
    fn rejects_empty_name() {
        let err = NormalizedNames::derive("healthcare_stack", &descriptor("")).unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));
    }

    #[test]
    fn rejects_leading_digit() {
        let err = NormalizedNames::derive("healthcare_stack", &descriptor("360_view")).unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));
    }

    #[test]
    fn rejects_hyphenated_name() {
        let err =
            NormalizedNames::derive("healthcare_stack", &descriptor("care-gap")).unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));
    }
}
