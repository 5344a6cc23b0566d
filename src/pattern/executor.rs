// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Single-pass pattern evaluator.
//!
//! Walks a [`Timeline`] snapshot against a [`Pattern`] and produces a
//! tri-state [`PatternMatch`].
//!
//! # Algorithm
//!
//! A cursor holds the index just past the most recent anchor and that
//! anchor's timestamp. Steps are processed left to right:
//!
//! - **Positive**: the earliest event at or after the cursor with the
//!   required state becomes the next anchor. Events of any other state are
//!   skipped. If none exists the result is `PartialMatch` when something was
//!   already anchored, `NotMatched` otherwise.
//! - **Bounded negative**: deferred until the following anchor is known.
//!   The most recent forbidden occurrence stamped at or after the previous
//!   anchor's time (or anywhere, before the first anchor) and strictly
//!   earlier than the following anchor must be at least
//!   `min_quiet_secs` older than the anchor. With no quiet buffer any
//!   occurrence violates. A violation is final: `NotMatched`.
//! - **Terminal negative**: once every positive step is anchored, the time
//!   from the last anchor to the newest timeline entry must cover
//!   `min_quiet_secs`. Otherwise the result is `PartialMatch`. Elapsed time
//!   alone decides; a recurrence of the forbidden state is not re-checked.
//!
//! Anchors are greedy and never backtracked. Each positive step scans
//! forward from the cursor and each bounded negative step re-scans only the
//! window the positive step just crossed, plus any entries tied with the
//! previous anchor's timestamp, so evaluation is linear in the
//! timeline length for a fixed pattern.

use crate::common::state::{State, StateHistoryStep};
use crate::common::timeline::Timeline;
use crate::common::timestamp::{covers, elapsed_secs};
use crate::pattern::model::{Pattern, PatternStep};

/// Verdict of one evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternMatch {
    /// Every step is satisfied.
    Matched,
    /// Some progress was made; more events or more time are needed.
    PartialMatch,
    /// The pattern cannot match this timeline.
    NotMatched,
}

/// Verdict plus the anchor timestamps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// The verdict.
    pub result: PatternMatch,
    /// Timestamp of each positive step anchored before evaluation stopped,
    /// in pattern order.
    pub anchors: Vec<i64>,
}

/// Evaluates `pattern` against `timeline`.
///
/// Pure and deterministic: the same inputs always produce the same verdict,
/// and neither input is modified.
#[must_use]
pub fn evaluate(pattern: &Pattern, timeline: &Timeline) -> PatternMatch {
    evaluate_report(pattern, timeline).result
}

/// Evaluates `pattern` against `timeline`, also returning matched anchors.
#[must_use]
pub fn evaluate_report(pattern: &Pattern, timeline: &Timeline) -> MatchReport {
    let events = timeline.steps();
    let mut cursor = Cursor::START;
    let mut anchors = Vec::with_capacity(pattern.positive_count());
    // Bounded negatives waiting for the next anchor to fix their right edge.
    let mut guards: Vec<Guard> = Vec::new();

    for step in pattern.anchored_steps() {
        match *step {
            PatternStep::Negative {
                state,
                min_quiet_secs,
            } => guards.push(Guard {
                state,
                min_quiet_secs,
            }),
            PatternStep::Positive(state) => {
                let Some(found) = find_anchor(events, cursor.next, state) else {
                    let result = if anchors.is_empty() {
                        PatternMatch::NotMatched
                    } else {
                        PatternMatch::PartialMatch
                    };
                    return MatchReport { result, anchors };
                };
                let t_next = events[found].timestamp;
                let (tied, between) = cursor.window(events, found);
                if guards.iter().any(|g| g.violated(tied, between, t_next)) {
                    return MatchReport {
                        result: PatternMatch::NotMatched,
                        anchors,
                    };
                }
                guards.clear();
                anchors.push(t_next);
                cursor = Cursor {
                    next: found + 1,
                    t_prev: t_next,
                };
            }
        }
    }

    let result = match (pattern.terminal_steps(), timeline.last_timestamp()) {
        ([], _) | (_, None) => PatternMatch::Matched,
        (terminal, Some(t_last)) => {
            let elapsed = elapsed_secs(cursor.t_prev, t_last);
            if terminal.iter().all(|step| settled(step, elapsed)) {
                PatternMatch::Matched
            } else {
                PatternMatch::PartialMatch
            }
        }
    };
    MatchReport { result, anchors }
}

/// Scan position: index just past the last anchor, and that anchor's time.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    next: usize,
    t_prev: i64,
}

impl Cursor {
    const START: Self = Self {
        next: 0,
        t_prev: i64::MIN,
    };

    /// Events a bounded negative must inspect before the anchor at `found`.
    ///
    /// The window opens at `t_prev`, so it also covers entries recorded in
    /// the same second as the previous anchor but listed before it. The
    /// anchor itself is excluded. Returns those tied entries and the entries
    /// strictly between the two anchors.
    fn window<'a>(
        &self,
        events: &'a [StateHistoryStep],
        found: usize,
    ) -> (&'a [StateHistoryStep], &'a [StateHistoryStep]) {
        let anchor = self.next.saturating_sub(1);
        let start = events[..anchor].partition_point(|e| e.timestamp < self.t_prev);
        (&events[start..anchor], &events[self.next..found])
    }
}

/// A bounded negative step awaiting its right edge.
#[derive(Debug, Clone, Copy)]
struct Guard {
    state: State,
    min_quiet_secs: u64,
}

impl Guard {
    /// Checks the window between the previous anchor and the anchor at
    /// `t_next`.
    fn violated(
        &self,
        tied: &[StateHistoryStep],
        between: &[StateHistoryStep],
        t_next: i64,
    ) -> bool {
        let last_seen = tied
            .iter()
            .chain(between)
            .rev()
            .find(|e| e.state == self.state && e.timestamp < t_next);
        match last_seen {
            None => false,
            Some(_) if self.min_quiet_secs == 0 => true,
            Some(e) => !covers(elapsed_secs(e.timestamp, t_next), self.min_quiet_secs),
        }
    }
}

/// Earliest index at or after `from` whose state is `state`.
fn find_anchor(events: &[StateHistoryStep], from: usize, state: State) -> Option<usize> {
    events[from..]
        .iter()
        .position(|e| e.state == state)
        .map(|offset| from + offset)
}

/// Returns true if a terminal step's settling period has passed.
fn settled(step: &PatternStep, elapsed: i64) -> bool {
    match *step {
        PatternStep::Negative { min_quiet_secs, .. } => covers(elapsed, min_quiet_secs),
        PatternStep::Positive(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::parse_pattern;

    const DO: State = State::DOOR_OPEN;
    const DC: State = State::DOOR_CLOSED;
    const MI: State = State::MOTION_INSIDE_MASK;
    const MO: State = State::MOTION_OUTSIDE_MASK;
    const OD: State = State::OBJECT_DETECTED;

    fn timeline(data: &[(State, i64)]) -> Timeline {
        Timeline::new(
            data.iter()
                .map(|&(state, ts)| StateHistoryStep::new(state, ts))
                .collect(),
        )
        .unwrap()
    }

    fn pattern(src: &str) -> Pattern {
        parse_pattern(src).unwrap()
    }

    #[test]
    fn test_scenario_table() {
        use PatternMatch::{Matched, NotMatched, PartialMatch};

        let cases: &[(&str, &[(State, i64)], PatternMatch)] = &[
            // Mask states are noise once they are not the active anchor.
            (
                "motion_outside_mask door_open door_closed",
                &[(MI, 0), (MI, 1), (MO, 2), (MI, 3), (DO, 4), (MI, 5), (DC, 6), (MI, 7)],
                Matched,
            ),
            (
                "door_open motion_inside_mask",
                &[(OD, 0), (DO, 1), (OD, 2), (DC, 3)],
                PartialMatch,
            ),
            (
                "!object_detected door_open object_detected",
                &[(MI, 0), (DO, 1), (OD, 2), (DC, 3)],
                Matched,
            ),
            (
                "!object_detected door_open object_detected",
                &[(OD, 0), (DO, 1), (OD, 2), (DC, 3)],
                NotMatched,
            ),
            (
                "!object_detected(2) door_open object_detected",
                &[(OD, 0), (DO, 1), (OD, 2), (DC, 3)],
                NotMatched,
            ),
            (
                "!object_detected(1) door_open object_detected",
                &[(OD, 0), (DO, 4), (OD, 5), (DC, 6)],
                Matched,
            ),
            (
                "!object_detected(2) door_open object_detected",
                &[(OD, 0), (DO, 4), (OD, 5), (DC, 6)],
                Matched,
            ),
            (
                "door_open door_closed !object_detected(2)",
                &[(DO, 1), (MI, 2), (DC, 3), (MI, 4), (OD, 7)],
                Matched,
            ),
            (
                "door_open door_closed !object_detected(2)",
                &[(OD, 1), (DO, 2), (OD, 3), (DC, 4)],
                PartialMatch,
            ),
        ];

        for (i, (src, events, expected)) in cases.iter().enumerate() {
            let actual = evaluate(&pattern(src), &timeline(events));
            assert_eq!(actual, *expected, "case {i}: {src}");
        }
    }

    #[test]
    fn test_bounded_negative_between_anchors() {
        let p = pattern("door_open !object_detected door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (OD, 2), (DC, 3)])),
            PatternMatch::NotMatched
        );
        // Forbidden state before the left anchor is outside the window.
        assert_eq!(
            evaluate(&p, &timeline(&[(OD, 1), (DO, 2), (MI, 3), (DC, 4)])),
            PatternMatch::Matched
        );
    }

    #[test]
    fn test_bounded_window_opens_at_previous_anchor_time() {
        // OD@1 is recorded before DO@1 but shares its timestamp.
        let p = pattern("door_open !object_detected door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(OD, 1), (DO, 1), (DC, 2)])),
            PatternMatch::NotMatched
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(OD, 0), (DO, 1), (DC, 2)])),
            PatternMatch::Matched
        );
        let p = pattern("door_open !object_detected(1) door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(OD, 1), (DO, 1), (DC, 2)])),
            PatternMatch::Matched
        );
    }

    #[test]
    fn test_bounded_window_excludes_previous_anchor() {
        let p = pattern("door_open !door_open door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (DC, 2)])),
            PatternMatch::Matched
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (DO, 1), (DC, 2)])),
            PatternMatch::NotMatched
        );
    }

    #[test]
    fn test_bounded_violation_is_final() {
        // A later clean door cycle does not rescue an earlier violation.
        let p = pattern("door_open !object_detected door_closed");
        let t = timeline(&[(DO, 1), (OD, 2), (DC, 3), (DO, 4), (MI, 5), (DC, 6)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::NotMatched);
    }

    #[test]
    fn test_bounded_quiet_period_satisfied() {
        let p = pattern("door_open !object_detected(2) door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (OD, 2), (DC, 5)])),
            PatternMatch::Matched
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (OD, 2), (DC, 3)])),
            PatternMatch::NotMatched
        );
    }

    #[test]
    fn test_bounded_uses_most_recent_occurrence() {
        // OD@0 is far enough from DO@4 but OD@3 is not.
        let p = pattern("!object_detected(2) door_open object_detected");
        let t = timeline(&[(OD, 0), (MI, 1), (MO, 2), (OD, 3), (MI, 3), (DO, 4), (OD, 5), (DC, 6)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::NotMatched);
    }

    #[test]
    fn test_bounded_quiet_boundary_is_inclusive() {
        let p = pattern("!object_detected(1) door_open object_detected");
        let t = timeline(&[(OD, 0), (DO, 1), (OD, 2), (DC, 3), (DO, 4), (OD, 5), (DC, 6)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
    }

    #[test]
    fn test_bounded_ignores_same_timestamp_as_anchor() {
        let p = pattern("!object_detected(0) door_open");
        let t = timeline(&[(OD, 5), (DO, 5)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
        let t = timeline(&[(OD, 4), (OD, 5), (DO, 5)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::NotMatched);
    }

    #[test]
    fn test_consecutive_bounded_negatives() {
        let p = pattern("!object_detected !motion_inside_mask(3) door_open");
        assert_eq!(
            evaluate(&p, &timeline(&[(MI, 0), (DO, 3)])),
            PatternMatch::Matched
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(MI, 1), (DO, 3)])),
            PatternMatch::NotMatched
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(OD, 0), (DO, 3)])),
            PatternMatch::NotMatched
        );
    }

    #[test]
    fn test_terminal_negative_settles_with_time() {
        let p = pattern("door_open door_closed !object_detected(5)");
        let mut t = timeline(&[(OD, 1), (DO, 2), (OD, 3), (DC, 4)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::PartialMatch);
        t.push(StateHistoryStep::new(MI, 8)).unwrap();
        assert_eq!(evaluate(&p, &t), PatternMatch::PartialMatch);
        t.push(StateHistoryStep::new(MI, 9)).unwrap();
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
    }

    #[test]
    fn test_terminal_negative_recurrence_after_settling_still_matches() {
        let p = pattern("door_open door_closed !object_detected(5)");
        let t = timeline(&[(OD, 1), (DO, 2), (OD, 3), (DC, 4), (OD, 10)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
    }

    #[test]
    fn test_terminal_negative_without_buffer_matches_immediately() {
        let p = pattern("door_open door_closed !object_detected");
        let t = timeline(&[(DO, 1), (MI, 2), (DC, 3), (MI, 4)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
        let t = timeline(&[(DO, 1), (DC, 3)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::Matched);
    }

    #[test]
    fn test_terminal_never_not_matched() {
        let p = pattern("door_open !object_detected(60)");
        let t = timeline(&[(DO, 1), (OD, 2), (OD, 3)]);
        assert_eq!(evaluate(&p, &t), PatternMatch::PartialMatch);
    }

    #[test]
    fn test_multiple_terminal_steps_need_all_settled() {
        let p = pattern("door_closed !object_detected(2) !motion_inside_mask(4)");
        assert_eq!(
            evaluate(&p, &timeline(&[(DC, 0), (MO, 3)])),
            PatternMatch::PartialMatch
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(DC, 0), (MO, 4)])),
            PatternMatch::Matched
        );
    }

    #[test]
    fn test_missing_positive_before_any_anchor() {
        let p = pattern("door_open door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(DC, 1), (MI, 2)])),
            PatternMatch::NotMatched
        );
    }

    #[test]
    fn test_anchor_order_is_enforced() {
        // door_closed before door_open cannot be used.
        let p = pattern("door_open door_closed");
        assert_eq!(
            evaluate(&p, &timeline(&[(DC, 1), (DO, 2)])),
            PatternMatch::PartialMatch
        );
    }

    #[test]
    fn test_same_state_needs_distinct_events() {
        let p = pattern("door_open door_open");
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1)])),
            PatternMatch::PartialMatch
        );
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 1), (DO, 1)])),
            PatternMatch::Matched
        );
    }

    #[test]
    fn test_empty_timeline() {
        let t = Timeline::empty();
        assert_eq!(evaluate(&pattern("door_open"), &t), PatternMatch::NotMatched);
        assert_eq!(
            evaluate(&pattern("!object_detected door_open"), &t),
            PatternMatch::NotMatched
        );
        assert_eq!(
            evaluate(&pattern("door_open !object_detected(3)"), &t),
            PatternMatch::NotMatched
        );
    }

    #[test]
    fn test_leading_negative_on_clean_window_falls_through() {
        let p = pattern("!object_detected door_open");
        assert_eq!(
            evaluate(&p, &timeline(&[(DO, 0)])),
            PatternMatch::Matched
        );
    }

    #[test]
    fn test_report_anchors() {
        let p = pattern("motion_outside_mask door_open door_closed");
        let t = timeline(&[(MI, 0), (MO, 2), (DO, 4), (MI, 5), (DC, 6)]);
        let report = evaluate_report(&p, &t);
        assert_eq!(report.result, PatternMatch::Matched);
        assert_eq!(report.anchors, vec![2, 4, 6]);
    }

    #[test]
    fn test_report_partial_anchors() {
        let p = pattern("door_open motion_inside_mask");
        let report = evaluate_report(&p, &timeline(&[(OD, 0), (DO, 1), (DC, 3)]));
        assert_eq!(report.result, PatternMatch::PartialMatch);
        assert_eq!(report.anchors, vec![1]);
    }

    #[test]
    fn test_leftmost_anchor_is_used() {
        // Greedy: DO@1 is the anchor even though DO@5 would avoid the
        // forbidden state.
        let p = pattern("door_open !object_detected door_closed");
        let report = evaluate_report(&p, &timeline(&[(DO, 1), (OD, 2), (DO, 5), (DC, 6)]));
        assert_eq!(report.result, PatternMatch::NotMatched);
        assert_eq!(report.anchors, vec![1]);
    }
}
