//! Artifact emitters.
//!
//! Three stateless emitters produce the text of one stack's artifacts
//! from a descriptor and its normalized names: the Python code stub, the
//! demo page (form or conversational variant), and the metadata record.
//! Emitters only return text; writing to disk is the driver's job.

pub mod code_stub;
pub mod demo_chat;
pub mod demo_form;
pub mod escape;
pub mod metadata;
pub mod script;
mod template;

pub use code_stub::emit_code;
pub use demo_chat::emit_chat_demo;
pub use demo_form::emit_form_demo;
pub use metadata::{emit_metadata, render_metadata};
