// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Crate-wide error type.
//!
//! Every failure in this crate is a violated precondition on its inputs
//! (a malformed pattern, an unordered timeline, a bad registry document).
//! The matching engine itself never fails: once a [`Pattern`](crate::pattern::model::Pattern)
//! and a [`Timeline`](crate::common::timeline::Timeline) exist, evaluation
//! always produces a verdict.

use crate::pattern::parser::PatternError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building patterns, timelines and registries.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A pattern was declared with no steps.
    #[error("pattern has no steps")]
    EmptyPattern,

    /// A pattern contains only negative steps, so nothing can anchor it.
    #[error("pattern has no positive step to anchor on")]
    NoPositiveStep,

    /// A timeline entry is older than the entry before it.
    #[error("timeline out of order at index {index}: timestamp {timestamp} precedes {previous}")]
    UnorderedTimeline {
        /// Index of the offending entry.
        index: usize,
        /// Timestamp of the entry before it.
        previous: i64,
        /// Timestamp of the offending entry.
        timestamp: i64,
    },

    /// A state name that does not correspond to any known sensor state.
    #[error("unknown state: {0}")]
    UnknownState(String),

    /// A pattern name that is not present in the registry.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A pattern name registered (or listed in the evaluation order) twice.
    #[error("duplicate pattern: {0}")]
    DuplicatePattern(String),

    /// Malformed textual pattern.
    #[error(transparent)]
    Syntax(#[from] PatternError),

    /// Malformed registry configuration document.
    #[error("invalid registry config: {0}")]
    Config(#[from] toml::de::Error),
}
