// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Ordered state-history timelines.
//!
//! A [`Timeline`] is the snapshot the matching engine reads. Its only
//! invariant is that timestamps never decrease; entries sharing a timestamp
//! keep the order they were recorded in. Every constructor enforces the
//! invariant, so the engine can scan without re-checking it.
//!
//! State managers grow a timeline with [`Timeline::push`] and hand out clones
//! as snapshots. Because `StateHistoryStep` is `Copy`, a clone is a single
//! memcpy of the backing buffer.

use serde::{Deserialize, Serialize};

use crate::common::state::StateHistoryStep;
use crate::error::{Error, Result};

/// An ordered, validated sequence of state transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<StateHistoryStep>", try_from = "Vec<StateHistoryStep>")]
pub struct Timeline {
    steps: Vec<StateHistoryStep>,
}

impl Timeline {
    /// Creates an empty timeline.
    #[must_use]
    pub const fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Builds a timeline from recorded steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnorderedTimeline`] at the first step whose timestamp
    /// is older than its predecessor.
    pub fn new(steps: Vec<StateHistoryStep>) -> Result<Self> {
        if let Some(index) = steps
            .windows(2)
            .position(|w| w[0].timestamp > w[1].timestamp)
        {
            return Err(Error::UnorderedTimeline {
                index: index + 1,
                previous: steps[index].timestamp,
                timestamp: steps[index + 1].timestamp,
            });
        }
        Ok(Self { steps })
    }

    /// Appends a newly observed step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnorderedTimeline`] if `step` is older than the
    /// current last entry. The timeline is left unchanged.
    pub fn push(&mut self, step: StateHistoryStep) -> Result<()> {
        if let Some(last) = self.steps.last() {
            if step.timestamp < last.timestamp {
                return Err(Error::UnorderedTimeline {
                    index: self.steps.len(),
                    previous: last.timestamp,
                    timestamp: step.timestamp,
                });
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Returns the tail of this timeline holding entries at or after `ts`.
    #[must_use]
    pub fn since(&self, ts: i64) -> Self {
        let start = self.steps.partition_point(|s| s.timestamp < ts);
        Self {
            steps: self.steps[start..].to_vec(),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    #[inline]
    pub fn steps(&self) -> &[StateHistoryStep] {
        &self.steps
    }

    /// Timestamp of the most recent entry, if any.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<i64> {
        self.steps.last().map(|s| s.timestamp)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the timeline holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl TryFrom<Vec<StateHistoryStep>> for Timeline {
    type Error = Error;

    fn try_from(steps: Vec<StateHistoryStep>) -> Result<Self> {
        Self::new(steps)
    }
}

impl From<Timeline> for Vec<StateHistoryStep> {
    fn from(timeline: Timeline) -> Self {
        timeline.steps
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a StateHistoryStep;
    type IntoIter = std::slice::Iter<'a, StateHistoryStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
