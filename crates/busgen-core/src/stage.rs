//! Pipeline stage state machine

/// Stages of a generation run
///
/// State transitions:
/// ```text
/// Idle → Loaded → Annotated → PostProcessed → Emitted → Done
///   Any non-terminal stage → Aborted (on error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// All description sources parsed and merged
    Loaded,
    /// Command-line annotations applied
    Annotated,
    /// Derived names filled in
    PostProcessed,
    /// All configured emitters finished
    Emitted,
    /// Run completed successfully
    Done,
    /// Run stopped on a fatal error
    Aborted,
}

impl PipelineStage {
    /// Check if this stage can transition to the target stage
    pub fn can_transition_to(&self, target: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, target),
            (Idle, Loaded)
                | (Loaded, Annotated)
                | (Annotated, PostProcessed)
                | (PostProcessed, Emitted)
                | (Emitted, Done)
                // Any non-terminal stage can abort
                | (Idle, Aborted)
                | (Loaded, Aborted)
                | (Annotated, Aborted)
                | (PostProcessed, Aborted)
                | (Emitted, Aborted)
        )
    }

    /// Check if the run has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Aborted)
    }

    /// Get a human-readable description of this stage
    pub fn description(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "Nothing loaded yet",
            PipelineStage::Loaded => "Interface descriptions loaded",
            PipelineStage::Annotated => "Annotations applied",
            PipelineStage::PostProcessed => "Interfaces post-processed",
            PipelineStage::Emitted => "Artifacts emitted",
            PipelineStage::Done => "Run completed",
            PipelineStage::Aborted => "Run aborted",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "Idle"),
            PipelineStage::Loaded => write!(f, "Loaded"),
            PipelineStage::Annotated => write!(f, "Annotated"),
            PipelineStage::PostProcessed => write!(f, "PostProcessed"),
            PipelineStage::Emitted => write!(f, "Emitted"),
            PipelineStage::Done => write!(f, "Done"),
            PipelineStage::Aborted => write!(f, "Aborted"),
        }
    }
}

#[cfg(test)]
#[path = "stage/stage_tests.rs"]
mod stage_tests;
