// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Timestamp helpers.
//!
//! State managers stamp transitions with whole seconds since the Unix epoch,
//! stored as `i64`. All quiet periods and detection intervals are expressed
//! in the same unit, so no conversion happens inside the engine.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in whole seconds since the Unix epoch.
///
/// Clocks set before the epoch report negative values rather than failing.
#[must_use]
pub fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Seconds elapsed from `from` to `to`.
///
/// Saturates at the `i64` bounds so extreme timestamps cannot overflow.
#[must_use]
#[inline]
pub const fn elapsed_secs(from: i64, to: i64) -> i64 {
    to.saturating_sub(from)
}

/// Returns true if `elapsed` covers a quiet period of `quiet_secs` seconds.
///
/// Negative elapsed values never satisfy a quiet period.
#[must_use]
#[inline]
pub const fn covers(elapsed: i64, quiet_secs: u64) -> bool {
    elapsed >= 0 && elapsed as u64 >= quiet_secs
}
