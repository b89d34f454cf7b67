//! The intro quest

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::quest::{Difficulty, QuestKind};
use crate::stage::{Stage, StageContext, StageDecl};
use crate::tick::TickKind;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IntroData {
    pub greeted: bool,
    pub steps_taken: u32,
}

pub struct IntroQuest;

impl QuestKind for IntroQuest {
    type Data = IntroData;

    const NAME: &'static str = "IntroQuest";

    fn version() -> Version {
        Version::new(0, 1, 0)
    }

    fn difficulty() -> Difficulty {
        Difficulty::Beginner
    }

    fn description() -> &'static str {
        "The intro quest"
    }

    fn stages() -> Vec<StageDecl<Self>> {
        vec![
            StageDecl::new("Welcome", &[], || Box::new(Welcome)),
            StageDecl::new("FirstSteps", &["Welcome"], || Box::new(FirstSteps)),
            StageDecl::new("Finale", &["FirstSteps"], || Box::new(Finale)),
        ]
    }
}

/// Greets the player. Runs on any tick.
struct Welcome;

impl Stage<IntroQuest> for Welcome {
    fn prepare(&mut self, _ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        Ok(())
    }

    fn condition(&self, _ctx: &StageContext<'_, IntroQuest>, _tick: TickKind) -> bool {
        true
    }

    fn execute(&mut self, ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        ctx.data.greeted = true;
        Ok(())
    }

    fn is_done(&self, ctx: &StageContext<'_, IntroQuest>) -> bool {
        ctx.data.greeted
    }
}

/// Waits for the player to actually do something: only runs on a
/// player-triggered tick, so scheduled passes leave it pending.
struct FirstSteps;

impl Stage<IntroQuest> for FirstSteps {
    fn prepare(&mut self, _ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        Ok(())
    }

    fn condition(&self, _ctx: &StageContext<'_, IntroQuest>, tick: TickKind) -> bool {
        tick == TickKind::Triggered
    }

    fn execute(&mut self, ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        // safe to re-run: saturating, and completion is keyed off the count
        ctx.data.steps_taken = ctx.data.steps_taken.saturating_add(1);
        Ok(())
    }

    fn is_done(&self, ctx: &StageContext<'_, IntroQuest>) -> bool {
        ctx.data.steps_taken >= 1
    }
}

/// Concludes the quest.
struct Finale;

impl Stage<IntroQuest> for Finale {
    fn prepare(&mut self, _ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        Ok(())
    }

    fn condition(&self, _ctx: &StageContext<'_, IntroQuest>, _tick: TickKind) -> bool {
        true
    }

    fn execute(&mut self, ctx: &mut StageContext<'_, IntroQuest>) -> anyhow::Result<()> {
        ctx.finish();
        Ok(())
    }

    fn is_done(&self, _ctx: &StageContext<'_, IntroQuest>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::Quest;
    use crate::store::{DocumentStore, MemoryStore};

    #[test]
    fn test_scheduled_tick_stops_at_first_steps() {
        let store = MemoryStore::new();
        let mut quest = Quest::<IntroQuest>::load(&store, "github:1").unwrap();

        quest.execute_stages(TickKind::Scheduled).unwrap();

        assert_eq!(quest.completed_stages(), ["Welcome"]);
        assert!(!quest.is_complete());
    }

    #[test]
    fn test_triggered_tick_runs_to_completion() {
        let store = MemoryStore::new();
        let mut quest = Quest::<IntroQuest>::load(&store, "github:1").unwrap();

        quest.execute_stages(TickKind::Triggered).unwrap();

        assert_eq!(quest.completed_stages(), ["Welcome", "FirstSteps", "Finale"]);
        assert!(quest.is_complete());
    }

    #[test]
    fn test_resumes_after_scheduled_pass() {
        let store = MemoryStore::new();

        let mut quest = Quest::<IntroQuest>::load(&store, "github:1").unwrap();
        quest.execute_stages(TickKind::Scheduled).unwrap();
        quest.save(&store).unwrap();

        let mut quest = Quest::<IntroQuest>::load(&store, "github:1").unwrap();
        quest.execute_stages(TickKind::Triggered).unwrap();

        assert!(quest.is_complete());
        assert_eq!(quest.data().steps_taken, 1);
    }

    #[test]
    fn test_snapshot_is_written_on_save() {
        let store = MemoryStore::new();
        let mut quest = Quest::<IntroQuest>::load(&store, "github:1").unwrap();
        quest.execute_stages(TickKind::Triggered).unwrap();
        quest.save(&store).unwrap();

        let doc = store
            .get(&crate::quest::QuestKey::new("github:1", "IntroQuest"))
            .unwrap()
            .expect("snapshot written");
        assert_eq!(doc["version"], "0.1.0");
        assert_eq!(doc["complete"], true);
    }
}
