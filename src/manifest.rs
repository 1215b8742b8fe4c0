//! Manifest aggregator.
//!
//! Rebuilds the top-level catalog by walking the generated output tree,
//! not the specification table. The two are deliberately decoupled:
//! stacks added or edited by hand are still indexed, and a stale table
//! cannot hide files that actually exist on disk.
//!
//! Two subtrees are scanned: `agents/` for standalone code stubs and
//! `agent_stacks/` for per-stack directories (optional `metadata.json`
//! plus a nested `agents/` stub directory). Display metadata for a stub
//! is inferred from filename keywords via a fixed, ordered lookup table
//! with generic fallbacks.

use crate::error::{Result, StackgenError};
use crate::fs::atomic_write_file;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered code stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub path: String,
    pub url: String,
    pub size: u64,
    pub size_formatted: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_path: Option<String>,
    pub description: String,
    pub features: Vec<String>,
}

/// One discovered stack directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: String,
    pub name: String,
    pub path: String,
    pub agents: Vec<AgentEntry>,
    /// The stack's parsed `metadata.json`, or `null` when the file is
    /// missing or unreadable.
    pub metadata: Option<Value>,
}

/// The aggregated top-level manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub generated: String,
    pub repository: String,
    pub branch: String,
    pub agents: Vec<AgentEntry>,
    pub stacks: Vec<StackEntry>,
}

impl Manifest {
    /// Total number of stack-bundled stubs.
    pub fn stack_agent_count(&self) -> usize {
        self.stacks.iter().map(|s| s.agents.len()).sum()
    }
}

/// Inferred display metadata for one filename keyword.
struct KeywordInfo {
    keyword: &'static str,
    description: &'static str,
    features: [&'static str; 4],
}

/// Ordered keyword table; the first keyword contained in the filename
/// wins, so more specific keywords must precede broader ones.
const KEYWORD_TABLE: &[KeywordInfo] = &[
    KeywordInfo {
        keyword: "email",
        description: "Intelligent email drafting and automation agent",
        features: ["Email composition", "Smart templates", "Auto-response", "Attachment handling"],
    },
    KeywordInfo {
        keyword: "calendar",
        description: "Calendar management and scheduling automation",
        features: ["Schedule management", "Meeting coordination", "Availability tracking", "Time zone support"],
    },
    KeywordInfo {
        keyword: "crm",
        description: "CRM integration and data management",
        features: ["CRM integration", "Data synchronization", "Record management", "Pipeline automation"],
    },
    KeywordInfo {
        keyword: "dynamics",
        description: "Microsoft Dynamics 365 integration agent",
        features: ["Dynamics 365 integration", "Entity management", "Workflow automation", "API connectivity"],
    },
    KeywordInfo {
        keyword: "sharepoint",
        description: "SharePoint document extraction and management",
        features: ["Document extraction", "SharePoint integration", "File management", "Metadata handling"],
    },
    KeywordInfo {
        keyword: "memory",
        description: "Context and memory management for conversations",
        features: ["Context retention", "State management", "Memory optimization", "Conversation tracking"],
    },
    KeywordInfo {
        keyword: "image",
        description: "AI-powered image generation and processing",
        features: ["Image generation", "AI creativity", "Format support", "Batch processing"],
    },
    KeywordInfo {
        keyword: "powerpoint",
        description: "PowerPoint presentation automation",
        features: ["Presentation creation", "Slide automation", "Template support", "Export options"],
    },
    KeywordInfo {
        keyword: "servicenow",
        description: "ServiceNow ticket and workflow management",
        features: ["Ticket management", "Workflow automation", "ServiceNow integration", "Incident tracking"],
    },
    KeywordInfo {
        keyword: "salesforce",
        description: "Salesforce data query and integration",
        features: ["Salesforce queries", "Data extraction", "Report generation", "SOQL support"],
    },
    KeywordInfo {
        keyword: "search",
        description: "Web search and content aggregation",
        features: ["Web search", "Result aggregation", "Content filtering", "API integration"],
    },
    KeywordInfo {
        keyword: "review",
        description: "Automated code review and analysis",
        features: ["Code analysis", "Quality metrics", "Best practices", "Automated feedback"],
    },
    KeywordInfo {
        keyword: "adaptive",
        description: "Adaptive card generation for multiple platforms",
        features: ["Card generation", "Dynamic layouts", "Multi-platform", "Interactive elements"],
    },
    KeywordInfo {
        keyword: "hacker",
        description: "Hacker News content aggregation and monitoring",
        features: ["News aggregation", "Content monitoring", "Trend analysis", "Real-time updates"],
    },
    KeywordInfo {
        keyword: "motivational",
        description: "Motivational quote generation and inspiration",
        features: ["Quote generation", "Daily inspiration", "Category selection", "API integration"],
    },
    KeywordInfo {
        keyword: "wikipedia",
        description: "Wikipedia article fetching and knowledge extraction",
        features: ["Article fetching", "Random content", "Knowledge extraction", "API connectivity"],
    },
    KeywordInfo {
        keyword: "beehiiv",
        description: "Beehiiv newsletter platform integration",
        features: ["Newsletter integration", "Subscriber management", "Content automation", "Analytics"],
    },
    KeywordInfo {
        keyword: "demo",
        description: "Demo data generation and seeding",
        features: ["Data generation", "Test scenarios", "Bulk operations", "Realistic samples"],
    },
    KeywordInfo {
        keyword: "meeting",
        description: "Meeting preparation and coordination agent",
        features: ["Meeting preparation", "Agenda creation", "Note taking", "Action items"],
    },
];

const DEFAULT_DESCRIPTION: &str = "AI agent for task automation and workflow optimization";

const DEFAULT_FEATURES: [&str; 4] = [
    "AI-powered automation",
    "Easy integration",
    "Scalable architecture",
    "Production ready",
];

/// Description inferred from a stub filename, first keyword match wins.
fn description_for(filename: &str) -> String {
    let lower = filename.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|info| lower.contains(info.keyword))
        .map(|info| info.description)
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string()
}

/// Feature tags inferred from a stub filename, first keyword match wins.
fn features_for(filename: &str) -> Vec<String> {
    let lower = filename.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|info| lower.contains(info.keyword))
        .map(|info| info.features.as_slice())
        .unwrap_or(DEFAULT_FEATURES.as_slice())
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Human-readable file size, one decimal place.
fn format_file_size(size: u64) -> String {
    let mut size = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}TB", size)
}

/// `care_gap_closure` -> `Care Gap Closure`.
fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn raw_url(repository: &str, branch: &str, path: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        repository, branch, path
    )
}

/// Build the full manifest by scanning `root`.
///
/// Either subtree may be empty or absent; that yields empty lists, not
/// an error.
pub fn aggregate(root: &Path, repository: &str, branch: &str) -> Result<Manifest> {
    Ok(Manifest {
        version: "1.0.0".to_string(),
        generated: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        repository: repository.to_string(),
        branch: branch.to_string(),
        agents: scan_agents(root, repository, branch)?,
        stacks: scan_stacks(root, repository, branch)?,
    })
}

/// Write `manifest.json` and the flat `agents/index.json` under `root`.
pub fn write_outputs(root: &Path, manifest: &Manifest) -> Result<()> {
    let manifest_text = serde_json::to_string_pretty(manifest)
        .map_err(|e| StackgenError::Schema(format!("failed to serialize manifest: {}", e)))?;
    atomic_write_file(root.join("manifest.json"), &manifest_text)?;

    let index = serde_json::json!({
        "agents": manifest.agents.iter().map(|a| a.filename.clone()).collect::<Vec<_>>(),
    });
    let index_text = serde_json::to_string_pretty(&index)
        .map_err(|e| StackgenError::Schema(format!("failed to serialize index: {}", e)))?;
    atomic_write_file(root.join("agents").join("index.json"), &index_text)?;

    Ok(())
}

/// Scan `root/agents/` for standalone stubs.
fn scan_agents(root: &Path, repository: &str, branch: &str) -> Result<Vec<AgentEntry>> {
    let agents_dir = root.join("agents");
    let mut agents = Vec::new();

    for file in stub_files(&agents_dir)? {
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let stem = file
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let size = file_size(&file)?;
        let path = format!("agents/{}", filename);

        agents.push(AgentEntry {
            id: stem.clone(),
            name: title_case(&stem),
            url: raw_url(repository, branch, &path),
            path,
            size,
            size_formatted: format_file_size(size),
            kind: "singular".to_string(),
            stack_name: None,
            stack_path: None,
            description: description_for(&filename),
            features: features_for(&filename),
            filename,
        });
    }

    Ok(agents)
}

/// Scan `root/agent_stacks/` for stack directories.
fn scan_stacks(root: &Path, repository: &str, branch: &str) -> Result<Vec<StackEntry>> {
    let stacks_dir = root.join("agent_stacks");
    let mut stacks = Vec::new();

    if !stacks_dir.exists() {
        return Ok(stacks);
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(&stacks_dir)
        .map_err(|e| StackgenError::io(&stacks_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    for stack_dir in dirs {
        let stack_id = stack_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let stack_name = title_case(&stack_id);

        let mut entry = StackEntry {
            id: stack_id.clone(),
            name: stack_name.clone(),
            path: format!("agent_stacks/{}", stack_id),
            agents: Vec::new(),
            metadata: load_stack_metadata(&stack_dir),
        };

        for file in stub_files(&stack_dir.join("agents"))? {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let stem = file
                .file_stem()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let size = file_size(&file)?;
            let path = format!("agent_stacks/{}/agents/{}", stack_id, filename);

            entry.agents.push(AgentEntry {
                id: format!("{}_{}", stack_id, stem),
                name: title_case(&stem),
                url: raw_url(repository, branch, &path),
                path,
                size,
                size_formatted: format_file_size(size),
                kind: "stack".to_string(),
                stack_name: Some(stack_name.clone()),
                stack_path: Some(stack_id.clone()),
                description: description_for(&filename),
                features: features_for(&filename),
                filename,
            });
        }

        stacks.push(entry);
    }

    Ok(stacks)
}

/// Parse a stack's `metadata.json` if present and well-formed.
///
/// A missing, unreadable, or unparseable file yields `None`; a manifest
/// rebuild must never be blocked by one hand-edited stack.
fn load_stack_metadata(stack_dir: &Path) -> Option<Value> {
    let metadata_path = stack_dir.join("metadata.json");
    if !metadata_path.exists() {
        return None;
    }

    let text = match fs::read_to_string(&metadata_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Warning: skipping {}: {}", metadata_path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!(
                "Warning: invalid metadata in {}: {}",
                metadata_path.display(),
                e
            );
            None
        }
    }
}

/// Sorted `.py` stubs in a directory, skipping `__init__.py`.
/// An absent directory yields an empty list.
fn stub_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(dir).map_err(|e| StackgenError::io(dir, e))? {
        let entry = entry.map_err(|e| StackgenError::io(dir, e))?;
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if path.is_file() && name.ends_with(".py") && name != "__init__.py" {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .map_err(|e| StackgenError::io(path, e))?
        .len())
}
