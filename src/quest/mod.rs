//! Quest model and lifecycle
//!
//! A quest is a durable, resumable unit of multi-step progress for one
//! player: a dependency graph of stages, a quest-specific payload, the
//! list of completed stage names, and a completion flag. One execution
//! pass runs per invocation; progress persists between invocations as a
//! versioned snapshot in the document store.

mod lifecycle;
mod types;


pub use lifecycle::Quest;
pub use types::{Difficulty, QuestKey, QuestKind};
