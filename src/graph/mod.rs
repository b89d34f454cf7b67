//! Dependency graph over a quest's declared stage set
//!
//! Built once per quest load from the static stage declarations. Supports
//! the incremental scheduling loop the engine runs: query which stages are
//! ready given the done-set, mark stages done as they finish, repeat until
//! quiescent. Cycles and dangling dependency names are rejected at build
//! time as definition errors.

mod cycle;


use std::collections::{BTreeMap, BTreeSet};

use crate::error::DefinitionError;

/// Incremental scheduler over a stage dependency graph.
///
/// A stage is *ready* when every dependency is in the done-set, it is not
/// itself done, and it has not already been handed out by
/// [`StageGraph::take_ready`] during this graph's lifetime. Marking done is
/// idempotent and monotonic: a done stage never becomes ready again.
#[derive(Debug, Clone)]
pub struct StageGraph {
    /// Stage name -> its dependencies.
    deps: BTreeMap<String, Vec<String>>,
    /// Deterministic topological order over all stages.
    order: Vec<String>,
    done: BTreeSet<String>,
    /// Names already handed out by `take_ready` in the current pass. A
    /// stage that was yielded but never marked done stays pending until
    /// [`StageGraph::begin_pass`] starts the next pass.
    yielded: BTreeSet<String>,
}

impl StageGraph {
    /// Build a graph from `(stage name, dependency names)` pairs.
    ///
    /// Fails with a [`DefinitionError`] if a dependency references an
    /// undeclared stage or the dependencies form a cycle. `quest` is only
    /// used to name the offending quest in errors.
    pub fn build(
        quest: &str,
        stages: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Result<Self, DefinitionError> {
        let deps: BTreeMap<String, Vec<String>> = stages.into_iter().collect();

        for (stage, stage_deps) in &deps {
            for dep in stage_deps {
                if !deps.contains_key(dep) {
                    return Err(DefinitionError::UnknownDependency {
                        quest: quest.to_string(),
                        stage: stage.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        cycle::detect_cycles(quest, &deps)?;

        let order = topological_order(&deps);

        Ok(Self {
            deps,
            order,
            done: BTreeSet::new(),
            yielded: BTreeSet::new(),
        })
    }

    /// Start a new execution pass: stages yielded but not finished in the
    /// previous pass become eligible again. The done-set is untouched.
    pub fn begin_pass(&mut self) {
        self.yielded.clear();
    }

    /// Hand out every stage that is ready right now, in topological order.
    ///
    /// Each stage is yielded at most once per pass: a stage that does not
    /// get marked done after being yielded is not re-queued until the next
    /// pass.
    pub fn take_ready(&mut self) -> Vec<String> {
        let mut ready = Vec::new();

        for name in &self.order {
            if self.done.contains(name) || self.yielded.contains(name) {
                continue;
            }
            let deps_satisfied = self.deps[name].iter().all(|d| self.done.contains(d));
            if deps_satisfied {
                ready.push(name.clone());
            }
        }

        for name in &ready {
            self.yielded.insert(name.clone());
        }

        ready
    }

    /// Mark a stage done, unblocking its dependents for the next
    /// readiness query. Idempotent; unknown names are ignored.
    pub fn mark_done(&mut self, name: &str) {
        if self.deps.contains_key(name) {
            self.done.insert(name.to_string());
        }
    }

    /// Whether `name` is part of the declared stage set.
    pub fn contains(&self, name: &str) -> bool {
        self.deps.contains_key(name)
    }

    /// Whether `name` has been marked done.
    pub fn is_done(&self, name: &str) -> bool {
        self.done.contains(name)
    }

    /// Whether every stage has been marked done.
    pub fn is_exhausted(&self) -> bool {
        self.done.len() == self.deps.len()
    }

    /// All stage names in topological order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Kahn's algorithm with a lexicographic tie-break between stages that are
/// simultaneously unblocked, so iteration order is stable across runs.
///
/// Callers must have rejected cycles already; with a cycle-free graph this
/// always consumes every node.
fn topological_order(deps: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut in_degree: BTreeMap<&str, usize> = deps
        .iter()
        .map(|(name, stage_deps)| (name.as_str(), stage_deps.len()))
        .collect();

    // dependency -> dependents
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, stage_deps) in deps {
        for dep in stage_deps {
            dependents.entry(dep.as_str()).or_default().push(name.as_str());
        }
    }

    // BTreeSet as the work queue gives the lexicographic tie-break
    let mut queue: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(name, _)| *name)
        .collect();

    let mut order = Vec::with_capacity(deps.len());

    while let Some(name) = queue.pop_first() {
        order.push(name.to_string());

        if let Some(unblocked) = dependents.get(name) {
            for &dependent in unblocked {
                let degree = in_degree
                    .get_mut(dependent)
                    .expect("dependent must be a declared stage");
                *degree -= 1;
                if *degree == 0 {
                    queue.insert(dependent);
                }
            }
        }
    }

    debug_assert_eq!(order.len(), deps.len(), "cycle slipped past detection");
    order
}
