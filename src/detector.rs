// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Priority-ordered evaluation of a pattern registry.
//!
//! [`PatternDetector`] runs every registered pattern, in priority order,
//! against the same timeline snapshot and folds the verdicts into one
//! [`Detection`]:
//!
//! - the first `Matched` pattern wins and evaluation stops;
//! - otherwise every `PartialMatch` pattern is reported as pending;
//! - otherwise nothing matched.
//!
//! Callers re-run detection on every new state transition (or on a periodic
//! tick, so terminal quiet periods can settle). Each call starts from
//! scratch; the detector keeps no memory between calls.

use crate::common::timeline::Timeline;
use crate::error::{Error, Result};
use crate::pattern::executor::{evaluate, PatternMatch};
use crate::registry::PatternRegistry;

/// Aggregate verdict over a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Name of the highest-priority pattern that matched.
    Matched(String),
    /// Names of partially matched patterns, in priority order.
    Pending(Vec<String>),
    /// No pattern matched or partially matched.
    NoMatch,
}

impl Detection {
    /// Name of the matched pattern, if any.
    #[must_use]
    pub fn matched(&self) -> Option<&str> {
        match self {
            Self::Matched(name) => Some(name),
            Self::Pending(_) | Self::NoMatch => None,
        }
    }

    /// Returns true if callers should wait for more events.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Evaluates a [`PatternRegistry`] against timeline snapshots.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    registry: PatternRegistry,
    detection_interval: Option<u64>,
}

impl PatternDetector {
    /// Creates a detector that looks at the whole timeline.
    #[must_use]
    pub const fn new(registry: PatternRegistry) -> Self {
        Self {
            registry,
            detection_interval: None,
        }
    }

    /// Limits evaluation to entries at most `secs` seconds older than the
    /// newest entry of each snapshot.
    #[must_use]
    pub fn with_detection_interval(mut self, secs: u64) -> Self {
        self.detection_interval = Some(secs);
        self
    }

    /// The registry being evaluated.
    #[must_use]
    pub const fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Evaluates every pattern in priority order.
    #[must_use]
    pub fn detect(&self, timeline: &Timeline) -> Detection {
        let window = self.window(timeline);
        let timeline = window.as_ref().unwrap_or(timeline);
        let mut pending = Vec::new();
        for (name, pattern) in self.registry.iter() {
            let result = evaluate(pattern, timeline);
            log::debug!("pattern {name}: {result:?}");
            match result {
                PatternMatch::Matched => {
                    log::info!("movement pattern matched: {name}");
                    return Detection::Matched(name.to_string());
                }
                PatternMatch::PartialMatch => pending.push(name.to_string()),
                PatternMatch::NotMatched => {}
            }
        }
        if pending.is_empty() {
            Detection::NoMatch
        } else {
            Detection::Pending(pending)
        }
    }

    /// Evaluates a single named pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if `name` is not registered.
    pub fn evaluate(&self, name: &str, timeline: &Timeline) -> Result<PatternMatch> {
        let pattern = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))?;
        let window = self.window(timeline);
        Ok(evaluate(pattern, window.as_ref().unwrap_or(timeline)))
    }

    /// Trims `timeline` to the detection interval, if one is configured.
    fn window(&self, timeline: &Timeline) -> Option<Timeline> {
        let secs = self.detection_interval?;
        let last = timeline.last_timestamp()?;
        let from = last.saturating_sub_unsigned(secs);
        let trimmed = timeline.since(from);
        log::trace!(
            "detection interval {secs}s kept {} of {} entries",
            trimmed.len(),
            timeline.len()
        );
        Some(trimmed)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(PatternRegistry::door_movement())
    }
}
