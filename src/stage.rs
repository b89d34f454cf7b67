//! Stage authoring interface
//!
//! A stage is a single named unit of work inside a quest's dependency
//! graph. Authors declare stages statically ([`StageDecl`]) and implement
//! the per-pass lifecycle ([`Stage`]): prepare, condition check, execute,
//! done-check. Stage instances are ephemeral - one is created per
//! execution pass per ready stage, and its only durable trace is its name
//! in the quest's completed-stage list.

use crate::quest::{QuestKey, QuestKind};

/// Static declaration of a stage within a quest's stage set.
///
/// `dependencies` must name stages declared in the same quest; a dangling
/// name is a definition error caught when the quest's graph is built.
pub struct StageDecl<Q: QuestKind> {
    pub name: &'static str,
    pub dependencies: &'static [&'static str],
    pub build: fn() -> Box<dyn Stage<Q>>,
}

impl<Q: QuestKind> StageDecl<Q> {
    pub fn new(
        name: &'static str,
        dependencies: &'static [&'static str],
        build: fn() -> Box<dyn Stage<Q>>,
    ) -> Self {
        Self {
            name,
            dependencies,
            build,
        }
    }
}

/// Mutable view of the owning quest handed to a stage's lifecycle calls.
///
/// Gives the stage access to the quest payload and lets it conclude the
/// whole quest via [`StageContext::finish`].
pub struct StageContext<'a, Q: QuestKind> {
    pub key: &'a QuestKey,
    pub data: &'a mut Q::Data,
    complete: &'a mut bool,
}

impl<'a, Q: QuestKind> StageContext<'a, Q> {
    pub(crate) fn new(key: &'a QuestKey, data: &'a mut Q::Data, complete: &'a mut bool) -> Self {
        Self {
            key,
            data,
            complete,
        }
    }

    /// Conclude the quest. No further stages run, in this pass or any
    /// later one. Irreversible.
    pub fn finish(&mut self) {
        *self.complete = true;
    }

    pub fn is_complete(&self) -> bool {
        *self.complete
    }
}

/// Per-pass lifecycle of a stage.
///
/// Call order within a pass: `prepare` -> `condition` -> (if true)
/// `execute` -> `is_done`. A stage reporting not-done stays pending and is
/// re-evaluated from `prepare` on a future pass.
///
/// Two contracts stage authors must uphold:
/// - `execute` must be safe to re-run. If the host truncates an invocation
///   after `execute` but before the snapshot is written, the stage runs
///   again on resume.
/// - No ordering is guaranteed between independent stages that are ready
///   in the same batch; `execute` must not rely on observing another
///   independent stage's side effects.
pub trait Stage<Q: QuestKind> {
    /// Setup before the condition check, e.g. reading related external
    /// state the later calls will consult.
    fn prepare(&mut self, ctx: &mut StageContext<'_, Q>) -> anyhow::Result<()>;

    /// Whether this stage should run on this pass. A `false` leaves the
    /// stage pending without marking anything.
    fn condition(&self, ctx: &StageContext<'_, Q>, tick: crate::tick::TickKind) -> bool;

    /// The stage's effect - the only place stage-specific mutation of
    /// quest-external state happens.
    fn execute(&mut self, ctx: &mut StageContext<'_, Q>) -> anyhow::Result<()>;

    /// Whether the stage finished. `true` records the stage as completed
    /// permanently; `false` keeps it eligible for the next pass.
    fn is_done(&self, ctx: &StageContext<'_, Q>) -> bool;
}
