// Rust guideline compliant 2026-02-06

//! Unit tests for the FSM module.
//!
//! These tests validate the merge lifecycle transitions.

use mergelogs_core::{Error, MergeState};

#[test]
fn test_happy_path_transitions() {
    let path = [
        MergeState::Idle,
        MergeState::Provisioned,
        MergeState::Ingesting,
        MergeState::Ingesting,
        MergeState::Exporting,
        MergeState::Done,
    ];
    for pair in path.windows(2) {
        assert!(
            pair[0].can_transition_to(pair[1]).is_ok(),
            "Should allow {} → {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_failed_reachable_from_active_states() {
    for state in [
        MergeState::Provisioned,
        MergeState::Ingesting,
        MergeState::Exporting,
    ] {
        assert!(
            state.can_transition_to(MergeState::Failed).is_ok(),
            "Should allow {} → failed",
            state
        );
    }
}

#[test]
fn test_idle_cannot_fail_or_skip_ahead() {
    let state = MergeState::Idle;
    assert!(state.can_transition_to(MergeState::Failed).is_err());
    assert!(state.can_transition_to(MergeState::Ingesting).is_err());
    assert!(state.can_transition_to(MergeState::Done).is_err());
}

#[test]
fn test_cannot_export_before_ingesting() {
    assert!(MergeState::Provisioned
        .can_transition_to(MergeState::Exporting)
        .is_err());
}

#[test]
fn test_cannot_go_back_to_ingesting() {
    assert!(MergeState::Exporting
        .can_transition_to(MergeState::Ingesting)
        .is_err());
}

#[test]
fn test_terminal_states_have_no_transitions() {
    for state in [MergeState::Done, MergeState::Failed] {
        assert!(state.is_terminal());
        assert!(state.valid_transitions().is_empty());
        assert!(state.can_transition_to(MergeState::Failed).is_err());
        assert!(state.can_transition_to(MergeState::Idle).is_err());
    }
}

#[test]
fn test_invalid_transition_message() {
    let err = MergeState::Done
        .can_transition_to(MergeState::Ingesting)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTransition(_)));
    assert_eq!(
        err.to_string(),
        "Invalid state transition: Cannot transition from done to ingesting"
    );
}

#[test]
fn test_default_state_is_idle() {
    assert_eq!(MergeState::default(), MergeState::Idle);
    assert!(!MergeState::Idle.is_terminal());
}
