use std::fmt;

/// Application lifecycle.
///
/// Transitions only move forward:
/// `NotStarted -> Initializing -> Running -> ShuttingDown -> Terminated`.
/// `ShuttingDown` may also be entered from `Initializing` when startup fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum LoopPhase {
    NotStarted,
    Initializing,
    Running,
    ShuttingDown,
    Terminated,
}

impl LoopPhase {
    pub fn is_running(self) -> bool {
        self == LoopPhase::Running
    }
}

impl fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoopPhase::NotStarted => "not started",
            LoopPhase::Initializing => "initializing",
            LoopPhase::Running => "running",
            LoopPhase::ShuttingDown => "shutting down",
            LoopPhase::Terminated => "terminated",
        };
        f.write_str(s)
    }
}
