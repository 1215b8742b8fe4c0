//! Metadata record emitter.
//!
//! Produces the `metadata.json` persisted next to each generated stack.
//! This file is the on-disk contract other tooling reads, so the record
//! is built as typed structs and serialized with serde rather than by
//! string templating.

use crate::error::{Result, StackgenError};
use crate::names::{NormalizedNames, STACK_SUFFIX};
use crate::spec::AgentDescriptor;
use serde::{Deserialize, Serialize};

/// Fixed complexity tag applied to every generated stack.
const COMPLEXITY: &str = "intermediate";

/// Platforms the generated stubs run on.
const PLATFORMS: [&str; 3] = ["Windows", "macOS", "Linux"];

/// Runtime dependencies of the generated stubs.
const DEPENDENCIES: [&str; 3] = ["Python 3.8+", "requests", "json"];

/// How many integrated systems get an inferred API-key variable.
const API_KEY_SYSTEMS: usize = 2;

/// The persisted metadata record for one stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub category: String,
    pub complexity: String,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub technical_requirements: TechnicalRequirements,
    pub components: Vec<Component>,
    pub demo: DemoInfo,
    pub use_cases: Vec<String>,
}

/// Deployment requirements block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalRequirements {
    pub platforms: Vec<String>,
    pub dependencies: Vec<String>,
    pub api_keys: Vec<String>,
    pub integrations: Vec<String>,
}

/// One shipped file of the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub description: String,
    pub role: String,
}

/// Pointer to the stack's generated demo page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoInfo {
    pub available: bool,
    pub url: String,
    pub title: String,
    pub description: String,
}

/// Build the metadata record for one descriptor.
pub fn emit_metadata(
    descriptor: &AgentDescriptor,
    category: &str,
    names: &NormalizedNames,
) -> StackMetadata {
    StackMetadata {
        id: names.stack_dir.clone(),
        name: format!("{} Stack", descriptor.display_name),
        version: "1.0.0".to_string(),
        description: descriptor.description.clone(),
        category: category.strip_suffix(STACK_SUFFIX).unwrap_or(category).to_string(),
        complexity: COMPLEXITY.to_string(),
        features: descriptor.use_cases.clone(),
        benefits: descriptor.benefits.clone(),
        technical_requirements: TechnicalRequirements {
            platforms: PLATFORMS.iter().map(|s| s.to_string()).collect(),
            dependencies: DEPENDENCIES.iter().map(|s| s.to_string()).collect(),
            api_keys: api_key_names(&descriptor.systems),
            integrations: descriptor.systems.clone(),
        },
        components: vec![Component {
            name: format!("{}.py", names.file_stem),
            description: descriptor.description.clone(),
            role: "Primary processing engine".to_string(),
        }],
        demo: DemoInfo {
            available: true,
            url: names.demo_url(),
            title: format!("{} Interactive Demo", descriptor.display_name),
            description: format!(
                "Interactive demonstration of {} capabilities",
                descriptor.display_name
            ),
        },
        use_cases: descriptor.use_cases.clone(),
    }
}

/// Serialize a record to the persisted JSON form.
pub fn render_metadata(metadata: &StackMetadata) -> Result<String> {
    serde_json::to_string_pretty(metadata)
        .map_err(|e| StackgenError::Schema(format!("failed to serialize metadata: {}", e)))
}

/// Environment-variable names inferred from the first two integrated
/// systems: upper-cased, spaces replaced with underscores, `_API_KEY`
/// suffix.
fn api_key_names(systems: &[String]) -> Vec<String> {
    systems
        .iter()
        .take(API_KEY_SYSTEMS)
        .map(|system| format!("{}_API_KEY", system.to_uppercase().replace(' ', "_")))
        .collect()
}
