use std::path::PathBuf;

/// Result of one independent report task.
///
/// Tasks never abort the run: the orchestrator inspects the outcome and
/// logs it uniformly, so a failing data source cannot block its siblings.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// Task produced the listed artifacts (chart files).
    Completed { artifacts: Vec<PathBuf> },
    /// Task ran but its sources yielded nothing usable.
    Empty { reason: String },
    /// Task hit an unexpected error and was abandoned.
    Failed { reason: String },
}

impl TaskOutcome {
    pub fn empty(reason: impl Into<String>) -> Self {
        TaskOutcome::Empty {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        TaskOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed { .. })
    }

    /// Chart files produced by the task, if any.
    pub fn artifacts(&self) -> &[PathBuf] {
        match self {
            TaskOutcome::Completed { artifacts } => artifacts,
            _ => &[],
        }
    }
}
