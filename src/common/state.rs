// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Sensor states and timestamped state transitions.
//!
//! Each sensor category (door, motion, object) exposes a small closed set of
//! discrete values. A [`State`] pairs a category with one of its values, and a
//! [`StateHistoryStep`] records when a state manager observed it.
//!
//! # Naming
//!
//! Every state has a stable snake_case name used by the pattern syntax, by
//! `Display`/`FromStr`, and by serde:
//!
//! | State | Name |
//! |-------|------|
//! | `Door(Open)` | `door_open` |
//! | `Door(Closed)` | `door_closed` |
//! | `Motion(InsideMask)` | `motion_inside_mask` |
//! | `Motion(OutsideMask)` | `motion_outside_mask` |
//! | `Object(Detected)` | `object_detected` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Door sensor values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DoorState {
    /// The door was opened.
    Open,
    /// The door was closed.
    Closed,
}

/// Motion sensor values, relative to the configured detection mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MotionState {
    /// Motion observed inside the mask.
    InsideMask,
    /// Motion observed outside the mask.
    OutsideMask,
}

/// Object detector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectState {
    /// An object (person) was detected.
    Detected,
}

/// A discrete sensor state: a category together with one of its values.
///
/// Equality is by (category, value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum State {
    /// Door sensor state.
    Door(DoorState),
    /// Motion sensor state.
    Motion(MotionState),
    /// Object detector state.
    Object(ObjectState),
}

impl State {
    /// Door opened.
    pub const DOOR_OPEN: Self = Self::Door(DoorState::Open);
    /// Door closed.
    pub const DOOR_CLOSED: Self = Self::Door(DoorState::Closed);
    /// Motion inside the mask.
    pub const MOTION_INSIDE_MASK: Self = Self::Motion(MotionState::InsideMask);
    /// Motion outside the mask.
    pub const MOTION_OUTSIDE_MASK: Self = Self::Motion(MotionState::OutsideMask);
    /// Object detected.
    pub const OBJECT_DETECTED: Self = Self::Object(ObjectState::Detected);

    /// Every known state, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::DOOR_OPEN,
        Self::DOOR_CLOSED,
        Self::MOTION_INSIDE_MASK,
        Self::MOTION_OUTSIDE_MASK,
        Self::OBJECT_DETECTED,
    ];

    /// Stable snake_case name of this state.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Door(DoorState::Open) => "door_open",
            Self::Door(DoorState::Closed) => "door_closed",
            Self::Motion(MotionState::InsideMask) => "motion_inside_mask",
            Self::Motion(MotionState::OutsideMask) => "motion_outside_mask",
            Self::Object(ObjectState::Detected) => "object_detected",
        }
    }

    /// Returns true for mask states.
    ///
    /// Mask states describe a broad sensed condition rather than a discrete
    /// event, and show up as background noise between meaningful transitions.
    #[must_use]
    pub const fn is_mask(self) -> bool {
        matches!(self, Self::Motion(_))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| Error::UnknownState(s.to_string()))
    }
}

impl TryFrom<String> for State {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<State> for &'static str {
    fn from(state: State) -> Self {
        state.name()
    }
}

/// A single observed state transition.
///
/// Immutable once recorded; timelines are built from these in
/// non-decreasing timestamp order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateHistoryStep {
    /// The state that was entered.
    pub state: State,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl StateHistoryStep {
    /// Creates a step for `state` observed at `timestamp`.
    #[must_use]
    pub const fn new(state: State, timestamp: i64) -> Self {
        Self { state, timestamp }
    }

    /// Creates a step for `state` observed now.
    #[must_use]
    pub fn now(state: State) -> Self {
        Self::new(state, crate::common::timestamp::unix_now())
    }
}
