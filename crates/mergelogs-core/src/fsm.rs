// Rust guideline compliant 2026-02-06

//! Finite State Machine module for the merge lifecycle.
//!
//! A merge run moves through the following states:
//!
//! - Idle → Provisioned (store opened, schema ensured)
//! - Provisioned → Ingesting (first input file started)
//! - Ingesting → Ingesting (next input file)
//! - Ingesting → Exporting (all inputs loaded)
//! - Exporting → Done (output fully written)
//! - Any non-Idle, non-terminal state → Failed

use crate::{Error, Result};
use std::fmt;

/// State of a merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeState {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// Store opened and `logs` table ensured.
    Provisioned,
    /// Input files are being loaded, one at a time.
    Ingesting,
    /// The merged file is being written.
    Exporting,
    /// The merged file is complete.
    Done,
    /// A step failed; the run is aborted.
    Failed,
}

impl MergeState {
    /// Checks if a transition to the target state is valid.
    ///
    /// # Arguments
    ///
    /// * `target` - The state to transition to
    ///
    /// # Returns
    ///
    /// Ok if the transition is valid, Err with descriptive message otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the transition is not in the valid set.
    pub fn can_transition_to(&self, target: MergeState) -> Result<()> {
        if self.valid_transitions().contains(&target) {
            return Ok(());
        }

        Err(Error::InvalidTransition(format!(
            "Cannot transition from {} to {}",
            self, target
        )))
    }

    /// Returns the list of valid target states for the current state.
    pub fn valid_transitions(&self) -> Vec<MergeState> {
        match self {
            MergeState::Idle => vec![MergeState::Provisioned],
            MergeState::Provisioned => vec![MergeState::Ingesting, MergeState::Failed],
            MergeState::Ingesting => vec![
                MergeState::Ingesting,
                MergeState::Exporting,
                MergeState::Failed,
            ],
            MergeState::Exporting => vec![MergeState::Done, MergeState::Failed],
            MergeState::Done | MergeState::Failed => Vec::new(),
        }
    }

    /// Returns true for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MergeState::Done | MergeState::Failed)
    }
}

impl fmt::Display for MergeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeState::Idle => "idle",
            MergeState::Provisioned => "provisioned",
            MergeState::Ingesting => "ingesting",
            MergeState::Exporting => "exporting",
            MergeState::Done => "done",
            MergeState::Failed => "failed",
        };
        f.write_str(name)
    }
}
