//! Pooled test records
//!
//! A record is one pool's aggregate call: `STATE,sample,sample,...`.

use crate::constants::{FIELD_DELIMITER, MUTANT_TOKEN, NORMAL_TOKEN};
use crate::domain::sample::SampleId;
use std::fmt;
use thiserror::Error;

/// Aggregate call reported for a pool (also used per sample in reports)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallState {
    Normal,
    Mutant,
}

impl CallState {
    /// Parse an exact, case-sensitive state token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            MUTANT_TOKEN => Some(Self::Mutant),
            NORMAL_TOKEN => Some(Self::Normal),
            _ => None,
        }
    }

    /// Token used in records and reports
    pub fn token(self) -> &'static str {
        match self {
            Self::Mutant => MUTANT_TOKEN,
            Self::Normal => NORMAL_TOKEN,
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// How to treat a record whose state token is neither `MUT` nor `NORM`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownStatePolicy {
    /// Drop the record (its samples do not join the experiment)
    #[default]
    Skip,
    /// Fail with [`RecordError::UnknownState`]
    Reject,
}

/// Record parse errors
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record has an empty state field (strict mode only)
    #[error("empty state field")]
    Empty,
    /// Unrecognized state token (strict mode only)
    #[error("unrecognized state token '{0}' (expected MUT or NORM)")]
    UnknownState(String),
}

/// One pool: a call state over a list of samples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    state: CallState,
    samples: Vec<SampleId>,
}

/// Ordered records resolved together
pub type Experiment = Vec<TestRecord>;

impl TestRecord {
    pub fn new<I, S>(state: CallState, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SampleId>,
    {
        Self {
            state,
            samples: samples.into_iter().map(Into::into).collect(),
        }
    }

    /// Pool called normal
    pub fn normal<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SampleId>,
    {
        Self::new(CallState::Normal, samples)
    }

    /// Pool called mutant
    pub fn mutant<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SampleId>,
    {
        Self::new(CallState::Mutant, samples)
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn samples(&self) -> &[SampleId] {
        &self.samples
    }

    /// Build a record from already-split fields
    ///
    /// Field 0 is the state token, the rest are sample identifiers. Fields are
    /// taken verbatim; only empty sample fields are ignored. Returns `Ok(None)`
    /// when the state token is missing or unknown and `policy` is
    /// [`UnknownStatePolicy::Skip`].
    pub fn parse_fields<'a, I>(
        fields: I,
        policy: UnknownStatePolicy,
    ) -> Result<Option<Self>, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let token = fields.next().unwrap_or_default();

        let state = match (CallState::from_token(token), policy) {
            (Some(state), _) => state,
            (None, UnknownStatePolicy::Skip) => return Ok(None),
            (None, UnknownStatePolicy::Reject) if token.is_empty() => {
                return Err(RecordError::Empty);
            }
            (None, UnknownStatePolicy::Reject) => {
                return Err(RecordError::UnknownState(token.to_string()));
            }
        };

        let samples = fields.filter(|f| !f.is_empty()).map(SampleId::from);
        Ok(Some(Self::new(state, samples)))
    }

    /// Parse one comma-separated record line
    pub fn parse_line(
        line: &str,
        policy: UnknownStatePolicy,
    ) -> Result<Option<Self>, RecordError> {
        Self::parse_fields(line.split(FIELD_DELIMITER), policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(record: &TestRecord) -> Vec<&str> {
        record.samples().iter().map(SampleId::as_str).collect()
    }

    #[test]
    fn test_parse_mutant_line() {
        let record = TestRecord::parse_line("MUT,110,12", UnknownStatePolicy::Skip)
            .unwrap()
            .unwrap();
        assert_eq!(record.state(), CallState::Mutant);
        assert_eq!(ids(&record), ["110", "12"]);
    }

    #[test]
    fn test_parse_drops_empty_samples() {
        let record = TestRecord::parse_line("NORM,1,,2,", UnknownStatePolicy::Skip)
            .unwrap()
            .unwrap();
        assert_eq!(record.state(), CallState::Normal);
        assert_eq!(ids(&record), ["1", "2"]);
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        // padded state token is not MUT
        assert_eq!(
            TestRecord::parse_line(" MUT ,1,2", UnknownStatePolicy::Skip),
            Ok(None)
        );
        assert_eq!(
            TestRecord::parse_line("MUT ,1", UnknownStatePolicy::Reject),
            Err(RecordError::UnknownState("MUT ".to_string()))
        );

        let record = TestRecord::parse_line("MUT,1, 2", UnknownStatePolicy::Skip)
            .unwrap()
            .unwrap();
        assert_eq!(ids(&record), ["1", " 2"]);
        assert_ne!(record.samples()[1], SampleId::from("2"));
    }

    #[test]
    fn test_state_token_is_case_sensitive() {
        assert_eq!(CallState::from_token("mut"), None);
        assert_eq!(CallState::from_token("Norm"), None);
        assert_eq!(CallState::from_token("MUT"), Some(CallState::Mutant));
    }

    #[test]
    fn test_unknown_state_skipped() {
        let result = TestRecord::parse_line("HET,1,2", UnknownStatePolicy::Skip);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_unknown_state_rejected_in_strict_mode() {
        let result = TestRecord::parse_line("HET,1,2", UnknownStatePolicy::Reject);
        assert_eq!(result, Err(RecordError::UnknownState("HET".to_string())));
    }

    #[test]
    fn test_empty_state_skipped() {
        assert_eq!(TestRecord::parse_line(",9", UnknownStatePolicy::Skip), Ok(None));
        assert_eq!(TestRecord::parse_line("", UnknownStatePolicy::Skip), Ok(None));
    }

    #[test]
    fn test_empty_state_rejected_in_strict_mode() {
        assert_eq!(
            TestRecord::parse_line(",1,2", UnknownStatePolicy::Reject),
            Err(RecordError::Empty)
        );
        assert_eq!(
            TestRecord::parse_fields(std::iter::empty(), UnknownStatePolicy::Reject),
            Err(RecordError::Empty)
        );
    }

    #[test]
    fn test_record_without_samples() {
        let record = TestRecord::parse_line("MUT", UnknownStatePolicy::Skip)
            .unwrap()
            .unwrap();
        assert!(record.samples().is_empty());
    }
}
