pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod quest;
pub mod quests;
pub mod registry;
pub mod snapshot;
pub mod stage;
pub mod store;
pub mod tick;

/// ASCII art logo for questline CLI
pub const LOGO: &str = "\
  ┌─┐ ┬ ┬┌─┐┌─┐┌┬┐┬  ┬┌┐┌┌─┐
  │─┼┐│ │├┤ └─┐ │ │  ││││├┤
  └─┘└└─┘└─┘└─┘ ┴ ┴─┘┴┘└┘└─┘";
