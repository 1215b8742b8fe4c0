//! The `manifest` command: rebuild the catalog from the output tree.

use crate::cli::ManifestArgs;
use crate::error::{Result, StackgenError};
use crate::events::{Event, EventAction, log_event_best_effort};
use crate::manifest::{aggregate, write_outputs};
use serde_json::json;

pub(super) fn cmd_manifest(args: ManifestArgs) -> Result<()> {
    if !args.repository.contains('/') {
        return Err(StackgenError::UserError(format!(
            "repository must be in owner/name form, got '{}'",
            args.repository
        )));
    }

    let manifest = aggregate(&args.root, &args.repository, &args.branch)?;
    write_outputs(&args.root, &manifest)?;

    println!("Found {} standalone agent(s)", manifest.agents.len());
    println!(
        "Found {} stack(s) with {} bundled agent(s)",
        manifest.stacks.len(),
        manifest.stack_agent_count()
    );
    println!("Wrote manifest.json and agents/index.json");

    log_event_best_effort(
        &args.root,
        Event::new(EventAction::Manifest).with_details(json!({
            "agents": manifest.agents.len(),
            "stacks": manifest.stacks.len(),
            "stack_agents": manifest.stack_agent_count(),
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
    fn manifest_command_writes_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let stub = temp_dir
            .path()
            .join("agent_stacks/care_gap_closure_stack/agents/care_gap_closure_agent.py");
        fs::create_dir_all(stub.parent().unwrap()).unwrap();
        fs::write(&stub, "# stub").unwrap();

        let args = ManifestArgs {
            root: temp_dir.path().to_path_buf(),
            repository: "example/templates".to_string(),
            branch: "main".to_string(),
        };
        cmd_manifest(args).unwrap();

        assert!(temp_dir.path().join("manifest.json").exists());
        assert!(temp_dir.path().join("agents/index.json").exists());

        let text = fs::read_to_string(temp_dir.path().join("manifest.json")).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(manifest["repository"], "example/templates");
        assert_eq!(manifest["stacks"][0]["id"], "care_gap_closure_stack");
    }

    #[test]
    fn manifest_rejects_bare_repository_name() {
        let temp_dir = TempDir::new().unwrap();
        let args = ManifestArgs {
            root: temp_dir.path().to_path_buf(),
            repository: "templates".to_string(),
            branch: "main".to_string(),
        };

        let err = cmd_manifest(args).unwrap_err();
        assert!(matches!(err, crate::error::StackgenError::UserError(_)));
        assert!(err.to_string().contains("owner/name"));
    }
}
