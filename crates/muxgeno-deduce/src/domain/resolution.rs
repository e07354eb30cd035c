//! Experiment resolution outcomes

use crate::constants::{INCONSISTENT_TOKEN, NONUNIQUE_TOKEN};
use crate::domain::record::CallState;
use crate::domain::sample::{SampleId, SampleSet};
use std::fmt;

/// Reason an experiment could not be resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Some sample was seen but is neither normal nor uniquely mutant
    NonUnique,
    /// A mutant pool whose every member was called normal elsewhere
    Inconsistent,
}

impl FailureReason {
    /// Report token
    pub fn token(self) -> &'static str {
        match self {
            Self::NonUnique => NONUNIQUE_TOKEN,
            Self::Inconsistent => INCONSISTENT_TOKEN,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Outcome of resolving one experiment
///
/// On success the two sets are disjoint and together cover every sample seen
/// in the experiment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        single_mutants: SampleSet,
        normals: SampleSet,
    },
    Rejected(FailureReason),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Failure reason, if rejected
    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Self::Resolved { .. } => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    /// Number of uniquely mutant samples (0 when rejected)
    pub fn mutant_count(&self) -> usize {
        match self {
            Self::Resolved { single_mutants, .. } => single_mutants.len(),
            Self::Rejected(_) => 0,
        }
    }

    /// Number of normal samples (0 when rejected)
    pub fn normal_count(&self) -> usize {
        match self {
            Self::Resolved { normals, .. } => normals.len(),
            Self::Rejected(_) => 0,
        }
    }

    /// Call for a single sample, if it was resolved
    pub fn call_for(&self, sample: &SampleId) -> Option<CallState> {
        match self {
            Self::Resolved {
                single_mutants,
                normals,
            } => {
                if single_mutants.contains(sample) {
                    Some(CallState::Mutant)
                } else if normals.contains(sample) {
                    Some(CallState::Normal)
                } else {
                    None
                }
            }
            Self::Rejected(_) => None,
        }
    }

    /// Per-sample calls sorted by sample identifier (empty when rejected)
    pub fn calls(&self) -> Vec<(SampleId, CallState)> {
        let Self::Resolved {
            single_mutants,
            normals,
        } = self
        else {
            return Vec::new();
        };

        let mut calls: Vec<(SampleId, CallState)> = single_mutants
            .iter()
            .map(|id| (id.clone(), CallState::Mutant))
            .chain(normals.iter().map(|id| (id.clone(), CallState::Normal)))
            .collect();
        calls.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        calls
    }
}
