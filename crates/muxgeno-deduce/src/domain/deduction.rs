//! Genotype deduction over overlapping pools
//!
//! Every sample seen in a normal pool is cleared everywhere. Each mutant pool
//! is then reduced to its remaining candidates; a pool left with exactly one
//! candidate pins that sample as mutant. An experiment resolves only when
//! every sample ends up either normal or uniquely mutant.

use crate::domain::record::{CallState, TestRecord};
use crate::domain::resolution::{FailureReason, Resolution};
use crate::domain::sample::SampleSet;

/// Records of one experiment split by call state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionedCalls {
    /// Every sample seen in any record
    pub all_samples: SampleSet,
    /// Union of all normal pools
    pub normals: SampleSet,
    /// One set per mutant pool, in record order
    pub mutant_sets: Vec<SampleSet>,
}

/// Split records into the normal union and per-pool mutant sets
///
/// Records without samples are ignored.
pub fn partition_records(records: &[TestRecord]) -> PartitionedCalls {
    let mut calls = PartitionedCalls::default();

    for record in records.iter().filter(|r| !r.samples().is_empty()) {
        calls.all_samples.extend(record.samples().iter().cloned());
        match record.state() {
            CallState::Normal => calls.normals.extend(record.samples().iter().cloned()),
            CallState::Mutant => calls
                .mutant_sets
                .push(record.samples().iter().cloned().collect()),
        }
    }

    calls
}

/// Remove normal samples from each mutant pool
///
/// Output has one set per input set, in the same order.
pub fn filter_mutant_sets(mutant_sets: &[SampleSet], normals: &SampleSet) -> Vec<SampleSet> {
    mutant_sets
        .iter()
        .map(|pool| pool.difference(normals).cloned().collect())
        .collect()
}

/// Samples that are the only remaining candidate of some pool
pub fn extract_single_mutants(filtered: &[SampleSet]) -> SampleSet {
    filtered
        .iter()
        .filter(|pool| pool.len() == 1)
        .filter_map(|pool| pool.iter().next().cloned())
        .collect()
}

/// Require every sample to be either normal or uniquely mutant
///
/// Besides the coverage count, each filtered pool may keep at most one sample
/// that is not already a single mutant. When the sets come from
/// [`process_experiment`], a passing coverage count already implies the pool
/// rule; it only fires on its own for sets built by other callers.
pub fn check_uniqueness(
    all_samples: &SampleSet,
    normals: &SampleSet,
    single_mutants: &SampleSet,
    filtered: &[SampleSet],
) -> Result<(), FailureReason> {
    if normals.union(single_mutants).count() != all_samples.len() {
        return Err(FailureReason::NonUnique);
    }

    let ambiguous = filtered
        .iter()
        .any(|pool| pool.difference(single_mutants).nth(1).is_some());
    if ambiguous {
        return Err(FailureReason::NonUnique);
    }

    Ok(())
}

/// Reject mutant pools fully explained by normal calls
pub fn check_consistency(filtered: &[SampleSet]) -> Result<(), FailureReason> {
    if filtered.iter().any(|pool| pool.is_empty()) {
        return Err(FailureReason::Inconsistent);
    }
    Ok(())
}

/// Resolve one experiment
///
/// Uniqueness is checked before consistency, so an experiment failing both
/// reports [`FailureReason::NonUnique`].
pub fn process_experiment(records: &[TestRecord]) -> Resolution {
    let PartitionedCalls {
        all_samples,
        normals,
        mutant_sets,
    } = partition_records(records);

    let filtered = filter_mutant_sets(&mutant_sets, &normals);
    let single_mutants = extract_single_mutants(&filtered);

    let checks = check_uniqueness(&all_samples, &normals, &single_mutants, &filtered)
        .and_then(|()| check_consistency(&filtered));

    match checks {
        Ok(()) => Resolution::Resolved {
            single_mutants,
            normals,
        },
        Err(reason) => Resolution::Rejected(reason),
    }
}
