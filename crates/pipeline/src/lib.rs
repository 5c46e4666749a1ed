//! Orchestration crate for the Guichet pipeline.
//!
//! Ties detection, translation, retrieval and generation together into
//! the single `retrieve_and_generate` entry point, and owns the
//! structured [`AnswerResult`] output contract.

pub mod context;
pub mod generator;
pub mod pipeline;
pub mod types;

pub use context::build_context;
pub use generator::AnswerGenerator;
pub use pipeline::RagPipeline;
pub use types::{AnswerResult, SourceRef, PIPELINE_APOLOGY};

// Conversation types are defined next to the prompt assembly that
// consumes them; re-exported here as part of the pipeline contract.
pub use guichet_prompt::{ConversationTurn, TurnRole};
