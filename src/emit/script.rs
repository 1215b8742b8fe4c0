//! Demo conversation scripts.
//!
//! A script is the ordered turn sequence the conversational demo page
//! plays back: sections of user/assistant turns, each with typing and
//! post-display delays, an optional progress-step action, and an
//! optional result card. Scripts are embedded into the page at
//! generation time as a JSON literal (JSON is valid JavaScript), so
//! playback needs no network access.
//!
//! Stacks with an authored script get it from the table below; everyone
//! else gets the generic placeholder script. That fallback is an
//! explicit default, not an error.

use crate::error::{Result, StackgenError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Who speaks a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Progress-indicator stage a turn advances to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Step1,
    Step2,
    Step3,
}

/// Section flavor; `result` sections carry the result-card turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Conversation,
    Result,
}

/// One scripted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,

    pub content: String,

    /// How long the typing indicator shows before the message, in ms.
    #[serde(rename = "typingTime")]
    pub typing_time: u32,

    /// Pause after the message before the next turn, in ms.
    pub delay: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<StepAction>,

    #[serde(rename = "showResult", skip_serializing_if = "Option::is_none")]
    pub show_result: Option<bool>,

    #[serde(rename = "resultData", skip_serializing_if = "Option::is_none")]
    pub result_data: Option<Value>,
}

impl Turn {
    fn new(role: Role, content: &str, typing_time: u32, delay: u32) -> Self {
        Self {
            role,
            content: content.to_string(),
            typing_time,
            delay,
            action: None,
            show_result: None,
            result_data: None,
        }
    }

    fn with_action(mut self, action: StepAction) -> Self {
        self.action = Some(action);
        self
    }

    fn with_result(mut self, data: Value) -> Self {
        self.show_result = Some(true);
        self.result_data = Some(data);
        self
    }
}

/// An ordered run of turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub messages: Vec<Turn>,
}

/// The full playback script for one demo page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemoScript {
    pub sections: Vec<ScriptSection>,
}

impl DemoScript {
    /// Serialize to the JSON literal embedded in the demo page.
    pub fn to_js_literal(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StackgenError::Schema(format!("failed to serialize demo script: {}", e)))
    }

    /// The generic script used when a stack has no authored one.
    pub fn placeholder() -> Self {
        DemoScript {
            sections: vec![
                ScriptSection {
                    kind: SectionKind::Conversation,
                    messages: vec![
                        Turn::new(Role::User, "Help me with this task", 1500, 1000),
                        Turn::new(
                            Role::Assistant,
                            "I'll help you with that. Let me process your request...",
                            2000,
                            1500,
                        )
                        .with_action(StepAction::Step1),
                    ],
                },
                ScriptSection {
                    kind: SectionKind::Result,
                    messages: vec![
                        Turn::new(Role::Assistant, "✅ Task completed successfully!", 2000, 1500)
                            .with_action(StepAction::Step2)
                            .with_result(json!({
                                "result": {
                                    "status": "Complete",
                                    "completedAt": "2024-01-30T12:00:00Z",
                                    "details": "Task processed successfully"
                                }
                            })),
                    ],
                },
            ],
        }
    }
}

/// Authored script lookup by descriptor name, falling back to the
/// placeholder.
pub fn script_for(name: &str) -> DemoScript {
    match name {
        "care_gap_closure" => care_gap_closure_script(),
        "clinical_notes_summarizer" => clinical_notes_summarizer_script(),
        "cart_abandonment_recovery" => cart_abandonment_recovery_script(),
        _ => DemoScript::placeholder(),
    }
}

fn care_gap_closure_script() -> DemoScript {
    DemoScript {
        sections: vec![
            ScriptSection {
                kind: SectionKind::Conversation,
                messages: vec![
                    Turn::new(
                        Role::User,
                        "Find patients overdue for preventive screenings in the diabetes registry",
                        1500,
                        1000,
                    ),
                    Turn::new(
                        Role::Assistant,
                        "I'll scan the registry for open care gaps and check each patient's screening history...",
                        2000,
                        1500,
                    )
                    .with_action(StepAction::Step1),
                ],
            },
            ScriptSection {
                kind: SectionKind::Result,
                messages: vec![
                    Turn::new(Role::Assistant, "✅ Care gap review complete!", 2000, 1500)
                        .with_action(StepAction::Step2)
                        .with_result(json!({
                            "careGaps": {
                                "patientsReviewed": "1,284",
                                "openGaps": "87",
                                "outreachScheduled": "64",
                                "topGap": "Annual retinal exam",
                                "nextCampaign": "February 5, 2024"
                            }
                        })),
                ],
            },
        ],
    }
}

fn clinical_notes_summarizer_script() -> DemoScript {
    DemoScript {
        sections: vec![
            ScriptSection {
                kind: SectionKind::Conversation,
                messages: vec![
                    Turn::new(
                        Role::User,
                        "Summarize the visit notes for patient John Smith from this morning",
                        1500,
                        1000,
                    ),
                    Turn::new(
                        Role::Assistant,
                        "I'll pull the encounter transcript and generate a structured summary...",
                        2000,
                        1500,
                    )
                    .with_action(StepAction::Step1),
                ],
            },
            ScriptSection {
                kind: SectionKind::Result,
                messages: vec![
                    Turn::new(Role::Assistant, "✅ Visit summary generated!", 2000, 1500)
                        .with_action(StepAction::Step2)
                        .with_result(json!({
                            "summary": {
                                "patient": "John Smith",
                                "visitType": "Follow-up",
                                "chiefComplaint": "Hypertension check",
                                "assessment": "BP improved on current regimen",
                                "followUp": "Recheck in 3 months"
                            }
                        })),
                ],
            },
        ],
    }
}

fn cart_abandonment_recovery_script() -> DemoScript {
    DemoScript {
        sections: vec![
            ScriptSection {
                kind: SectionKind::Conversation,
                messages: vec![
                    Turn::new(
                        Role::User,
                        "Show me carts abandoned in the last 24 hours worth over $100",
                        1500,
                        1000,
                    ),
                    Turn::new(
                        Role::Assistant,
                        "Let me pull high-value abandoned carts and draft recovery offers...",
                        2000,
                        1500,
                    )
                    .with_action(StepAction::Step1),
                ],
            },
            ScriptSection {
                kind: SectionKind::Result,
                messages: vec![
                    Turn::new(Role::Assistant, "✅ Recovery campaign queued!", 2000, 1500)
                        .with_action(StepAction::Step2)
                        .with_result(json!({
                            "campaign": {
                                "cartsFound": "42",
                                "totalValue": "$8,150",
                                "emailsQueued": "42",
                                "incentive": "10% off, expires in 48h",
                                "expectedRecovery": "$1,630"
                            }
                        })),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_two_sections() {
        let script = DemoScript::placeholder();
        assert_eq!(script.sections.len(), 2);
        assert_eq!(script.sections[0].kind, SectionKind::Conversation);
        assert_eq!(script.sections[1].kind, SectionKind::Result);
        let turns: usize = script.sections.iter().map(|s| s.messages.len()).sum();
        assert_eq!(turns, 3);
    }

    #[test]
    fn unknown_stack_gets_placeholder() {
        assert_eq!(script_for("no_such_stack"), DemoScript::placeholder());
    }

    #[test]
    fn authored_script_differs_from_placeholder() {
        assert_ne!(script_for("care_gap_closure"), DemoScript::placeholder());
    }

    #[test]
    fn js_literal_is_a_json_array() {
        let text = DemoScript::placeholder().to_js_literal().unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["type"], "conversation");
        assert_eq!(parsed[0]["messages"][0]["role"], "user");
        assert_eq!(parsed[0]["messages"][1]["action"], "step1");
    }

    #[test]
    fn turn_fields_use_playback_key_names() {
        let text = DemoScript::placeholder().to_js_literal().unwrap();
        assert!(text.contains("\"typingTime\""));
        assert!(text.contains("\"delay\""));
        assert!(text.contains("\"showResult\""));
        assert!(text.contains("\"resultData\""));
    }

    #[test]
    fn absent_options_are_omitted() {
        let text = DemoScript::placeholder().to_js_literal().unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        let user_turn = &parsed[0]["messages"][0];
        assert!(user_turn.get("action").is_none());
        assert!(user_turn.get("showResult").is_none());
        assert!(user_turn.get("resultData").is_none());
    }

    #[test]
    fn serialization_is_deterministic() {
        let a = script_for("care_gap_closure").to_js_literal().unwrap();
        let b = script_for("care_gap_closure").to_js_literal().unwrap();
        assert_eq!(a, b);
    }
}
