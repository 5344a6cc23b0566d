// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Movement pattern definitions.
//!
//! A [`Pattern`] is an ordered choreography of [`PatternStep`]s. Positive
//! steps name a state that must occur, in order. Negative steps name a state
//! that must stay away from a boundary:
//!
//! - a *bounded* negative step is followed (eventually) by a positive step,
//!   whose anchor is the right edge of its window;
//! - a *terminal* negative step comes after the last positive step and is
//!   measured against the most recent timeline entry instead.

use std::fmt;

use crate::common::state::State;
use crate::error::{Error, Result};

/// A single step in a movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternStep {
    /// `state` must occur at or after the previous anchor.
    Positive(State),
    /// `state` must not occur within `min_quiet_secs` of the relevant
    /// boundary. A quiet period of zero forbids the state anywhere inside a
    /// bounded window.
    Negative {
        /// The forbidden state.
        state: State,
        /// Required buffer between an occurrence and the boundary.
        min_quiet_secs: u64,
    },
}

impl PatternStep {
    /// A step requiring `state`.
    #[must_use]
    pub const fn positive(state: State) -> Self {
        Self::Positive(state)
    }

    /// A step forbidding `state`, with no quiet buffer.
    #[must_use]
    pub const fn negative(state: State) -> Self {
        Self::negative_for(state, 0)
    }

    /// A step forbidding `state` within `min_quiet_secs` of its boundary.
    #[must_use]
    pub const fn negative_for(state: State, min_quiet_secs: u64) -> Self {
        Self::Negative {
            state,
            min_quiet_secs,
        }
    }

    /// The state this step refers to.
    #[must_use]
    pub const fn state(&self) -> State {
        match *self {
            Self::Positive(state) | Self::Negative { state, .. } => state,
        }
    }

    /// Returns true for positive steps.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        matches!(self, Self::Positive(_))
    }
}

impl fmt::Display for PatternStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Positive(state) => write!(f, "{state}"),
            Self::Negative {
                state,
                min_quiet_secs: 0,
            } => write!(f, "!{state}"),
            Self::Negative {
                state,
                min_quiet_secs,
            } => write!(f, "!{state}({min_quiet_secs})"),
        }
    }
}

/// A validated movement pattern.
///
/// Always holds at least one step and at least one positive step. Patterns
/// are static configuration; evaluation never modifies them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    steps: Vec<PatternStep>,
    /// Index of the last positive step. Negative steps after it are terminal.
    last_positive: usize,
}

impl Pattern {
    /// Builds a pattern from its steps.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPattern`] if `steps` is empty.
    /// - [`Error::NoPositiveStep`] if every step is negative.
    pub fn new(steps: Vec<PatternStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let last_positive = steps
            .iter()
            .rposition(PatternStep::is_positive)
            .ok_or(Error::NoPositiveStep)?;
        Ok(Self {
            steps,
            last_positive,
        })
    }

    /// All steps in declaration order.
    #[must_use]
    #[inline]
    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    /// Steps up to and including the last positive step.
    #[must_use]
    pub fn anchored_steps(&self) -> &[PatternStep] {
        &self.steps[..=self.last_positive]
    }

    /// Negative steps after the last positive step.
    #[must_use]
    pub fn terminal_steps(&self) -> &[PatternStep] {
        &self.steps[self.last_positive + 1..]
    }

    /// Number of positive steps.
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_positive()).count()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
