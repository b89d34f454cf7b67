//! Tick kinds passed into an execution pass
//!
//! Stage conditions consult the tick kind to decide whether they apply to
//! the current invocation, e.g. a polling stage that only runs on
//! scheduled background ticks.

/// Classifier of the event that triggered an execution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Scheduled/background tick (cron-style poll).
    Scheduled,
    /// Tick caused by a direct player action.
    Triggered,
}

impl std::fmt::Display for TickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickKind::Scheduled => write!(f, "scheduled"),
            TickKind::Triggered => write!(f, "triggered"),
        }
    }
}

impl std::str::FromStr for TickKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(TickKind::Scheduled),
            "triggered" => Ok(TickKind::Triggered),
            _ => anyhow::bail!("Invalid tick kind: {s}. Valid values: scheduled, triggered"),
        }
    }
}
