//! Core logging types: step entries and their status.
use crate::resources::ResourceChange;

/// Provisioning step result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message (e.g., the path acted on or the error).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step created something.
    Created,
    /// Everything the step manages was already in place.
    Unchanged,
    /// The step failed and provisioning stopped.
    Failed,
}

impl From<ResourceChange> for StepStatus {
    fn from(change: ResourceChange) -> Self {
        match change {
            ResourceChange::Applied => Self::Created,
            ResourceChange::AlreadyCorrect => Self::Unchanged,
        }
    }
}
