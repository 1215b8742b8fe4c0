//! The specification table: the hand-authored input describing every
//! agent stack to generate.
//!
//! The table is an immutable configuration asset. A copy ships embedded
//! in the binary (`assets/stacks.yaml`); an alternate table can be loaded
//! from disk with `--spec`. There is no runtime mutation and no global
//! state: every generation run takes the parsed table as an explicit
//! argument.

use crate::error::{Result, StackgenError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The built-in specification table, embedded at compile time.
const BUILTIN_TABLE: &str = include_str!("../assets/stacks.yaml");

fn default_emoji() -> String {
    "🤖".to_string()
}

/// One input record describing a single generated agent/stack.
///
/// `name` must be a lowercase snake identifier; everything else is
/// display data echoed into the generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Lowercase snake identifier, unique within its category.
    pub name: String,

    /// Human-facing title.
    pub display_name: String,

    /// One-sentence summary.
    pub description: String,

    /// Header emoji for the demo page.
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// External systems the agent integrates with, in display order.
    pub systems: Vec<String>,

    /// Benefit statements, in display order.
    pub benefits: Vec<String>,

    /// Use cases, in display order. Also surfaced as metadata `features`.
    pub use_cases: Vec<String>,
}

/// A business-vertical grouping of descriptors. The category name
/// determines the output directory, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackCategory {
    /// Category key, e.g. `healthcare_stack`.
    pub name: String,

    /// Descriptors in authored order.
    pub agents: Vec<AgentDescriptor>,
}

/// The full specification table, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecTable {
    /// Version tag of the table asset.
    pub version: String,

    /// Categories in authored order; iteration order is generation order.
    pub categories: Vec<StackCategory>,
}

impl SpecTable {
    /// Parse the built-in table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_TABLE)
    }

    /// Load a table from a YAML file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| StackgenError::io(path, e))?;
        Self::parse(&text)
    }

    /// Parse a table from YAML text and check its structural invariants.
    pub fn parse(text: &str) -> Result<Self> {
        let table: SpecTable = serde_yaml::from_str(text)
            .map_err(|e| StackgenError::Schema(format!("invalid specification table: {}", e)))?;
        table.check_unique_names()?;
        Ok(table)
    }

    /// Total number of descriptors across all categories.
    pub fn descriptor_count(&self) -> usize {
        self.categories.iter().map(|c| c.agents.len()).sum()
    }

    /// Descriptor names must be unique within their category; the derived
    /// destination paths would otherwise collide silently.
    fn check_unique_names(&self) -> Result<()> {
        for category in &self.categories {
            let mut seen = HashSet::new();
            for agent in &category.agents {
                if !seen.insert(agent.name.as_str()) {
                    return Err(StackgenError::Validation(format!(
                        "duplicate descriptor name '{}' in category '{}'",
                        agent.name, category.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let table = SpecTable::builtin().unwrap();
        assert!(!table.categories.is_empty());
        assert!(table.descriptor_count() > 0);
    }

    #[test]
    fn builtin_table_contains_care_gap_closure() {
        let table = SpecTable::builtin().unwrap();
        let healthcare = table
            .categories
            .iter()
            .find(|c| c.name == "healthcare_stack")
            .expect("healthcare category");
        let agent = healthcare
            .agents
            .iter()
            .find(|a| a.name == "care_gap_closure")
            .expect("care_gap_closure descriptor");
        assert_eq!(agent.display_name, "Care Gap Closure Agent");
        assert_eq!(agent.systems[0], "EHR");
        assert_eq!(agent.systems[1], "CRM");
    }

    #[test]
    fn parse_minimal_table() {
        let table = SpecTable::parse(
            r#"
version: "1.0.0"
categories:
  - name: healthcare_stack
    agents:
      - name: care_gap_closure
        display_name: Care Gap Closure Agent
        description: Identifies missing screenings and automates patient outreach
        systems: [EHR, CRM]
        benefits: [Improves quality scores]
        use_cases: [Preventive care reminders]
"#,
        )
        .unwrap();
        assert_eq!(table.descriptor_count(), 1);
        // Unspecified emoji falls back to the default.
        assert_eq!(table.categories[0].agents[0].emoji, "🤖");
    }

    #[test]
    fn empty_table_is_valid() {
        let table = SpecTable::parse("version: \"1.0.0\"\ncategories: []\n").unwrap();
        assert_eq!(table.descriptor_count(), 0);
    }

    #[test]
    fn malformed_yaml_is_schema_error() {
        let err = SpecTable::parse("categories: {not a list").unwrap_err();
        assert!(matches!(err, StackgenError::Schema(_)));
    }

    #[test]
    fn duplicate_names_in_category_rejected() {
        let err = SpecTable::parse(
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
      - name: emission_tracking
        display_name: Emission Tracking Agent Two
        description: Tracks emissions again
        systems: [SAP]
        benefits: [Compliance]
        use_cases: [Reporting]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, StackgenError::Validation(_)));
        assert!(err.to_string().contains("emission_tracking"));
    }

    #[test]
    fn same_name_in_different_categories_is_allowed() {
        let table = SpecTable::parse(
            r#"
version: "1.0.0"
categories:
  - name: slg_government_stack
    agents:
      - name: regulatory_compliance
        display_name: Regulatory Compliance Agent
        description: Monitors compliance
        systems: [SAP]
        benefits: [Compliance]
        use_cases: [Reporting]
  - name: federal_government_stack
    agents:
      - name: regulatory_compliance
        display_name: Regulatory Compliance Agent
        description: Monitors compliance
        systems: [SAP]
        benefits: [Compliance]
        use_cases: [Reporting]
"#,
        )
        .unwrap();
        assert_eq!(table.descriptor_count(), 2);
    }
}
