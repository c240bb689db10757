#![allow(non_snake_case)]

use super::*;

// Valid transitions

#[test]
fn PipelineStage___idle_to_loaded___transition_allowed() {
    let stage = PipelineStage::Idle;

    let can_transition = stage.can_transition_to(PipelineStage::Loaded);

    assert!(can_transition);
}

#[test]
fn PipelineStage___emitted_to_done___transition_allowed() {
    let stage = PipelineStage::Emitted;

    let can_transition = stage.can_transition_to(PipelineStage::Done);

    assert!(can_transition);
}

#[test]
fn PipelineStage___any_non_terminal_to_aborted___transition_allowed() {
    let stages = [
        PipelineStage::Idle,
        PipelineStage::Loaded,
        PipelineStage::Annotated,
        PipelineStage::PostProcessed,
        PipelineStage::Emitted,
    ];

    for stage in stages {
        let can_transition = stage.can_transition_to(PipelineStage::Aborted);

        assert!(
            can_transition,
            "{:?} should be able to transition to Aborted",
            stage
        );
    }
}

// Invalid transitions

#[test]
fn PipelineStage___loaded_to_post_processed___skip_not_allowed() {
    let stage = PipelineStage::Loaded;

    let can_transition = stage.can_transition_to(PipelineStage::PostProcessed);

    assert!(!can_transition);
}

#[test]
fn PipelineStage___annotated_to_loaded___going_back_not_allowed() {
    let stage = PipelineStage::Annotated;

    let can_transition = stage.can_transition_to(PipelineStage::Loaded);

    assert!(!can_transition);
}

#[test]
fn PipelineStage___terminal_stages___cannot_transition() {
    for stage in [PipelineStage::Done, PipelineStage::Aborted] {
        assert!(!stage.can_transition_to(PipelineStage::Idle));
        assert!(!stage.can_transition_to(PipelineStage::Loaded));
        assert!(!stage.can_transition_to(PipelineStage::Aborted));
    }
}

// Queries

#[test]
fn PipelineStage___default___is_idle() {
    assert_eq!(PipelineStage::default(), PipelineStage::Idle);
}

#[test]
fn PipelineStage___description___not_empty() {
    assert!(!PipelineStage::Loaded.description().is_empty());
    assert_eq!(PipelineStage::Aborted.description(), "Run aborted");
}

#[test]
fn PipelineStage___display___uses_variant_name() {
    assert_eq!(PipelineStage::PostProcessed.to_string(), "PostProcessed");
}
