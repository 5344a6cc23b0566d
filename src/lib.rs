// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! # `movement` — Movement Pattern Matching over Sensor Timelines
//!
//! Recognizes physical events ("a person entered through the door") from the
//! state transitions reported by independent sensors. State managers append
//! timestamped transitions to a [`Timeline`]; this crate decides whether a
//! declared movement [`Pattern`] has matched, is still pending, or cannot
//! match.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`common::state`] | Door, motion and object states; timestamped transitions |
//! | [`common::timeline`] | Ordered, validated timeline snapshots |
//! | [`pattern::model`] | Positive and negative pattern steps |
//! | [`pattern::parser`] | Textual pattern syntax |
//! | [`pattern::executor`] | The matching engine |
//! | [`registry`] | Named patterns in priority order, TOML loading |
//! | [`detector`] | Evaluates a registry and reports the first match |
//!
//! ## Example
//!
//! ```
//! use movement::{evaluate, PatternMatch, State, StateHistoryStep, Timeline};
//!
//! let pattern = "!object_detected door_open object_detected door_closed"
//!     .parse()
//!     .unwrap();
//! let timeline = Timeline::new(vec![
//!     StateHistoryStep::new(State::MOTION_INSIDE_MASK, 100),
//!     StateHistoryStep::new(State::DOOR_OPEN, 101),
//!     StateHistoryStep::new(State::OBJECT_DETECTED, 102),
//!     StateHistoryStep::new(State::DOOR_CLOSED, 104),
//! ])
//! .unwrap();
//!
//! assert_eq!(evaluate(&pattern, &timeline), PatternMatch::Matched);
//! ```
//!
//! ## Logging
//!
//! The [`detector`] and [`registry`] modules report through the `log` facade.
//! The engine itself is silent. No logger is installed by this crate.

pub mod common;
pub mod detector;
pub mod error;
pub mod pattern;
pub mod registry;

pub use common::state::{DoorState, MotionState, ObjectState, State, StateHistoryStep};
pub use common::timeline::Timeline;
pub use detector::{Detection, PatternDetector};
pub use error::{Error, Result};
pub use pattern::executor::{evaluate, evaluate_report, MatchReport, PatternMatch};
pub use pattern::model::{Pattern, PatternStep};
pub use pattern::parser::{parse_pattern, PatternError};
pub use registry::PatternRegistry;
