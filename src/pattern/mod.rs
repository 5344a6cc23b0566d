// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Movement pattern definitions, syntax and evaluation.
//!
//! # Pattern Syntax
//!
//! Steps are separated by whitespace or commas:
//!
//! ```text
//! door_open              — Positive: the state must occur, in order
//! !object_detected       — Negative: the state must not occur in the window
//! !object_detected(N)    — Negative with a quiet period of N seconds
//! ```
//!
//! A negative step followed by a positive step is bounded by that step's
//! anchor. Negative steps after the last positive step are terminal and
//! settle once N seconds pass after the last anchor.

pub mod executor;
pub mod model;
pub mod parser;
