//! Code stub emitter.
//!
//! Emits the Python source unit for one agent: a class implementing the
//! uniform four-action contract against the external `BasicAgent` base
//! class. The dispatcher branches and the metadata `enum` are both
//! rendered from the same `ACTIONS` constant, so the schema and the
//! dispatcher cannot drift apart.

use crate::emit::escape::escape_py_double_quoted;
use crate::emit::template::render;
use crate::error::Result;
use crate::names::NormalizedNames;
use crate::spec::AgentDescriptor;

/// The fixed action set every generated agent accepts, in dispatch order.
pub const ACTIONS: [&str; 4] = ["execute", "analyze", "report", "optimize"];

const STUB_TEMPLATE: &str = r#"import sys
import os
sys.path.insert(0, os.path.abspath(os.path.join(os.path.dirname(__file__), '../../../../')))

from agents.basic_agent import BasicAgent
import json
from datetime import datetime, timedelta
import random

class {{class_name}}(BasicAgent):
    def __init__(self):
        self.name = "{{class_name}}"
        self.metadata = {
            "name": self.name,
            "description": "{{description}}",
            "parameters": {
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": [{{action_enum}}],
                        "description": "Action to perform"
                    },
                    "entity_id": {
                        "type": "string",
                        "description": "Unique identifier for the entity"
                    },
                    "data": {
                        "type": "object",
                        "description": "Additional data for the operation"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["real-time", "batch", "scheduled"],
                        "description": "Processing mode"
                    }
                },
                "required": ["action"]
            }
        }
        super().__init__(name=self.name, metadata=self.metadata)

    def perform(self, **kwargs):
        action = kwargs.get('action', 'execute')

{{dispatch_branches}}
        else:
            return {"status": "error", "message": f"Unknown action: {action}"}

    def _execute(self, params):
        """Execute primary operation"""
        return {
            "status": "success",
            "message": "{{display_name}} executed successfully",
            "data": {
                "operation_id": f"OP{random.randint(100000, 999999)}",
                "entity_id": params.get('entity_id', f"ENT{random.randint(1000, 9999)}"),
                "timestamp": datetime.now().isoformat(),
                "integrated_systems": {{systems_json}},
                "results": {
                    "processed_items": random.randint(10, 100),
                    "success_rate": f"{random.randint(85, 99)}%",
                    "processing_time": f"{random.randint(1, 10)} seconds"
                }
            }
        }

    def _analyze(self, params):
        """Perform analysis operation"""
        return {
            "status": "success",
            "message": "Analysis completed",
            "data": {
                "analysis_id": f"AN{random.randint(10000, 99999)}",
                "insights": [
                    "Key insight from {{display_name}}",
                    "Optimization opportunity identified",
                    "Risk factor detected and mitigated"
                ],
                "recommendations": {{use_cases_json}},
                "confidence_score": random.randint(75, 95)
            }
        }

    def _report(self, params):
        """Generate report"""
        return {
            "status": "success",
            "message": "Report generated",
            "data": {
                "report_id": f"RPT{random.randint(10000, 99999)}",
                "summary": "{{description}}",
                "benefits": {{benefits_json}},
                "metrics": {
                    "efficiency_gain": f"{random.randint(20, 70)}%",
                    "cost_reduction": f"${random.randint(1000, 50000)}",
                    "time_saved": f"{random.randint(5, 40)} hours/week"
                }
            }
        }

    def _optimize(self, params):
        """Perform optimization"""
        return {
            "status": "success",
            "message": "Optimization completed",
            "data": {
                "optimization_id": f"OPT{random.randint(10000, 99999)}",
                "improvements": {
                    "before": {
                        "efficiency": f"{random.randint(40, 60)}%",
                        "throughput": f"{random.randint(100, 500)} units/hour"
                    },
                    "after": {
                        "efficiency": f"{random.randint(70, 95)}%",
                        "throughput": f"{random.randint(600, 1000)} units/hour"
                    }
                },
                "next_steps": ["Monitor performance", "Adjust parameters", "Scale operations"]
            }
        }

if __name__ == "__main__":
    agent = {{class_name}}()

    # Test execution
    result = agent.perform(
        action="execute",
        entity_id="TEST123",
        mode="real-time"
    )
    print(json.dumps(result, indent=2))
"#;

/// Emit the code stub for one descriptor.
pub fn emit_code(descriptor: &AgentDescriptor, names: &NormalizedNames) -> Result<String> {
    let action_enum = ACTIONS
        .iter()
        .map(|a| format!("\"{}\"", a))
        .collect::<Vec<_>>()
        .join(", ");

    let mut dispatch = String::new();
    for (i, action) in ACTIONS.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elif" };
        dispatch.push_str(&format!(
            "        {} action == '{}':\n            return self._{}(kwargs)\n",
            keyword, action, action
        ));
    }
    // Trailing newline comes from the template line itself.
    let dispatch = dispatch.trim_end_matches('\n');

    render(
        STUB_TEMPLATE,
        &[
            ("class_name", names.class_identifier.as_str()),
            (
                "description",
                &escape_py_double_quoted(&descriptor.description),
            ),
            (
                "display_name",
                &escape_py_double_quoted(&descriptor.display_name),
            ),
            ("action_enum", &action_enum),
            ("dispatch_branches", dispatch),
            ("systems_json", &json_list(&descriptor.systems)),
            ("benefits_json", &json_list(&descriptor.benefits)),
            ("use_cases_json", &json_list(&descriptor.use_cases)),
        ],
    )
}

/// JSON-encode a string list with `, ` separators. JSON string arrays
/// are valid Python literals, which is why the stub can embed them
/// directly.
fn json_list(items: &[String]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|item| serde_json::to_string(item).unwrap_or_else(|_| "\"\"".to_string()))
        .collect();
    format!("[{}]", parts.join(", "))
}
