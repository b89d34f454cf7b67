use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{DefinitionError, LoadError, QuestError};
use crate::graph::StageGraph;
use crate::snapshot::{semver_safe, Snapshot};
use crate::stage::{StageContext, StageDecl};
use crate::store::DocumentStore;
use crate::tick::TickKind;

use super::types::{QuestKey, QuestKind};

/// One durable quest instance for one player.
///
/// Created by [`Quest::load`], driven by [`Quest::execute_stages`],
/// persisted by [`Quest::save`]. Load either fully populates every field
/// or fails, leaving nothing half-applied; the graph's done-set is
/// re-derived from `completed_stages` on every load rather than persisted.
pub struct Quest<Q: QuestKind> {
    key: QuestKey,
    data: Q::Data,
    completed_stages: Vec<String>,
    complete: bool,
    graph: StageGraph,
    decls: BTreeMap<&'static str, StageDecl<Q>>,
}

impl<Q: QuestKind> Quest<Q> {
    /// Load the quest for `player` from the document store, or initialize
    /// a fresh one if no snapshot exists.
    pub fn load(store: &dyn DocumentStore, player: &str) -> Result<Self, QuestError> {
        let key = QuestKey::new(player, Q::NAME);

        let mut decls = BTreeMap::new();
        for decl in Q::stages() {
            let name = decl.name;
            if decls.insert(name, decl).is_some() {
                return Err(DefinitionError::DuplicateStage {
                    quest: Q::NAME.to_string(),
                    stage: name.to_string(),
                }
                .into());
            }
        }

        let mut graph = StageGraph::build(
            Q::NAME,
            decls
                .values()
                .map(|d| {
                    (
                        d.name.to_string(),
                        d.dependencies.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect::<Vec<_>>(),
        )?;

        let doc = store
            .get(&key)
            .map_err(|err| QuestError::store(key.to_string(), err))?;

        let (data, completed_stages, complete) = match doc {
            Some(doc) => Self::apply_snapshot(&key, doc)?,
            None => {
                debug!(quest = %key, "no snapshot found, starting fresh");
                (Q::Data::default(), Vec::new(), false)
            }
        };

        // replay completed stages into the graph's done-set
        for name in &completed_stages {
            if !graph.contains(name) {
                return Err(LoadError::UnknownCompletedStage {
                    quest: Q::NAME.to_string(),
                    key: key.to_string(),
                    stage: name.clone(),
                }
                .into());
            }
            graph.mark_done(name);
        }

        Ok(Self {
            key,
            data,
            completed_stages,
            complete,
            graph,
            decls,
        })
    }

    /// Parse and version-check a stored document into quest fields.
    fn apply_snapshot(
        key: &QuestKey,
        doc: serde_json::Value,
    ) -> Result<(Q::Data, Vec<String>, bool), QuestError> {
        let snapshot: Snapshot =
            serde_json::from_value(doc).map_err(|source| LoadError::SnapshotSchema {
                quest: Q::NAME.to_string(),
                key: key.to_string(),
                source,
            })?;

        let start = semver::Version::parse(&snapshot.version).map_err(|source| {
            LoadError::BadVersion {
                quest: Q::NAME.to_string(),
                key: key.to_string(),
                version: snapshot.version.clone(),
                source,
            }
        })?;
        let dest = Q::version();
        if !semver_safe(&start, &dest) {
            return Err(LoadError::UnsafeVersion {
                quest: Q::NAME.to_string(),
                key: key.to_string(),
                start,
                dest,
            }
            .into());
        }

        let data: Q::Data = serde_json::from_str(&snapshot.serialized_data).map_err(|source| {
            LoadError::PayloadDecode {
                quest: Q::NAME.to_string(),
                key: key.to_string(),
                source,
            }
        })?;

        debug!(quest = %key, version = %start, "loaded snapshot");
        Ok((data, snapshot.completed_stages, snapshot.complete))
    }

    /// Run one execution pass: repeatedly query the graph for ready
    /// stages and drive each through its lifecycle until quiescent.
    ///
    /// A pass on an already-complete quest is a no-op. The pass stops
    /// immediately once a stage concludes the quest, even mid-batch.
    /// Persisting afterwards is the caller's responsibility.
    pub fn execute_stages(&mut self, tick: TickKind) -> Result<(), QuestError> {
        if self.complete {
            debug!(quest = %self.key, "quest already complete, pass is a no-op");
            return Ok(());
        }

        info!(quest = %self.key, %tick, "begin execution pass");
        self.graph.begin_pass();

        loop {
            let ready = self.graph.take_ready();
            if ready.is_empty() {
                debug!(quest = %self.key, "no ready stages, stopping pass");
                break;
            }
            debug!(quest = %self.key, ?ready, "processing ready batch");

            for name in ready {
                // an earlier stage in this batch may have concluded the quest
                if self.complete {
                    info!(quest = %self.key, "complete flag set, stopping pass");
                    return Ok(());
                }

                // done-set and completed list can drift across a resumed
                // pass; skip-and-advance rather than re-running
                if self.completed_stages.iter().any(|n| n == &name) {
                    debug!(quest = %self.key, stage = %name, "stage already completed, skipping");
                    self.graph.mark_done(&name);
                    continue;
                }

                let build = self
                    .decls
                    .get(name.as_str())
                    .expect("ready stage is always declared")
                    .build;
                let mut stage = build();

                let mut ctx = StageContext::new(&self.key, &mut self.data, &mut self.complete);
                stage
                    .prepare(&mut ctx)
                    .map_err(|err| QuestError::stage(Q::NAME, &name, err))?;

                if !stage.condition(&ctx, tick) {
                    debug!(quest = %self.key, stage = %name, "condition false, leaving pending");
                    continue;
                }

                stage
                    .execute(&mut ctx)
                    .map_err(|err| QuestError::stage(Q::NAME, &name, err))?;

                if stage.is_done(&ctx) {
                    info!(quest = %self.key, stage = %name, "stage done");
                    if !self.completed_stages.iter().any(|n| n == &name) {
                        self.completed_stages.push(name.clone());
                    }
                    self.graph.mark_done(&name);
                } else {
                    debug!(quest = %self.key, stage = %name, "stage not done, leaving pending");
                }
            }
        }

        info!(quest = %self.key, completed = self.completed_stages.len(), "pass finished");
        Ok(())
    }

    /// Serialize current state into a [`Snapshot`] and write it wholesale
    /// to the document store. A full overwrite, never a partial merge.
    pub fn save(&self, store: &dyn DocumentStore) -> Result<(), QuestError> {
        let snapshot = self.to_snapshot()?;
        let doc = serde_json::to_value(&snapshot)
            .map_err(|err| QuestError::store(self.key.to_string(), err.into()))?;
        store
            .set(&self.key, doc)
            .map_err(|err| QuestError::store(self.key.to_string(), err))?;
        debug!(quest = %self.key, "snapshot saved");
        Ok(())
    }

    /// Current state as the persisted wire shape.
    pub fn to_snapshot(&self) -> Result<Snapshot, QuestError> {
        let serialized_data = serde_json::to_string(&self.data)
            .map_err(|err| QuestError::store(self.key.to_string(), err.into()))?;
        Ok(Snapshot {
            version: Q::version().to_string(),
            serialized_data,
            completed_stages: self.completed_stages.clone(),
            complete: self.complete,
        })
    }

    pub fn key(&self) -> &QuestKey {
        &self.key
    }

    pub fn data(&self) -> &Q::Data {
        &self.data
    }

    pub fn completed_stages(&self) -> &[String] {
        &self.completed_stages
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn graph(&self) -> &StageGraph {
        &self.graph
    }
}
