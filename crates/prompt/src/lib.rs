//! Prompt crate for the Guichet pipeline.
//!
//! Owns everything that shapes what the generation backend sees:
//! - Language-specific system instructions and fallback messages
//! - Context-augmented user prompt rendering
//! - Message-sequence assembly with the bounded history window

pub mod builder;
pub mod instructions;
pub mod types;

pub use builder::{assemble_messages, build_user_prompt, CONTEXT_MIN_CHARS, HISTORY_WINDOW};
pub use instructions::{fallback_message, system_instruction};
pub use types::{ConversationTurn, TurnRole};
