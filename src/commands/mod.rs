pub mod progress;
pub mod quests;
pub mod run;
pub mod show;
