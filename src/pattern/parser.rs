// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Recursive descent parser for movement pattern strings.
//!
//! Parses patterns like `!object_detected(2) door_open object_detected` into
//! a validated [`Pattern`].

use std::str::FromStr;

use crate::common::state::State;
use crate::error::Error;
use crate::pattern::model::{Pattern, PatternStep};

/// Error returned when pattern parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("pattern error at position {position}: {message}")]
#[non_exhaustive]
pub struct PatternError {
    /// Human-readable error message.
    pub message: String,
    /// Byte position in the input string where the error occurred.
    pub position: usize,
}

impl PatternError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Parses a pattern string into a [`Pattern`].
///
/// # Errors
///
/// Returns [`PatternError`] if the pattern string is malformed, names an
/// unknown state, or contains no positive step.
///
/// # Examples
///
/// ```
/// use movement::pattern::parser::parse_pattern;
///
/// let pattern = parse_pattern("door_open, !object_detected(2), door_closed").unwrap();
/// assert_eq!(pattern.steps().len(), 3);
/// assert_eq!(pattern.positive_count(), 2);
/// ```
pub fn parse_pattern(input: &str) -> Result<Pattern, PatternError> {
    let mut parser = Parser::new(input);
    let steps = parser.parse()?;
    Pattern::new(steps).map_err(|e| match e {
        Error::EmptyPattern => PatternError::new("empty pattern", 0),
        Error::NoPositiveStep => PatternError::new("pattern needs at least one positive step", 0),
        other => PatternError::new(other.to_string(), 0),
    })
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_pattern(s)?)
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Result<Vec<PatternStep>, PatternError> {
        let mut steps = Vec::new();
        loop {
            self.skip_separators();
            if self.pos >= self.input.len() {
                break;
            }
            steps.push(self.parse_step()?);
        }
        Ok(steps)
    }

    fn parse_step(&mut self) -> Result<PatternStep, PatternError> {
        match self.peek() {
            Some(b'!') => {
                self.advance();
                self.parse_negative()
            }
            Some(c) if c.is_ascii_lowercase() => {
                let state = self.parse_state()?;
                if self.peek() == Some(b'(') {
                    return Err(PatternError::new(
                        "quiet period is only allowed on negated steps",
                        self.pos,
                    ));
                }
                Ok(PatternStep::positive(state))
            }
            Some(c) => Err(PatternError::new(
                format!("unexpected character '{}'", char::from(c)),
                self.pos,
            )),
            None => Err(PatternError::new("unexpected end of pattern", self.pos)),
        }
    }

    fn parse_negative(&mut self) -> Result<PatternStep, PatternError> {
        let state = self.parse_state()?;
        if self.peek() != Some(b'(') {
            return Ok(PatternStep::negative(state));
        }
        self.advance();
        if self.peek() == Some(b'-') {
            return Err(PatternError::new(
                "quiet period must be non-negative",
                self.pos,
            ));
        }
        let secs = self.parse_number()?;
        self.expect(b')')?;
        Ok(PatternStep::negative_for(state, secs))
    }

    fn parse_state(&mut self) -> Result<State, PatternError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(PatternError::new("expected state name", start));
        }
        // Only ASCII bytes were consumed, so the slice is valid UTF-8.
        let name = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        name.parse()
            .map_err(|_| PatternError::new(format!("unknown state '{name}'"), start))
    }

    fn parse_number(&mut self) -> Result<u64, PatternError> {
        let start = self.pos;
        let mut num: u64 = 0;
        let mut digits = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                num = num
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(u64::from(c - b'0')))
                    .ok_or_else(|| PatternError::new("number overflow in pattern", start))?;
                digits += 1;
                self.advance();
            } else {
                break;
            }
        }
        if digits == 0 {
            return Err(PatternError::new("expected number", self.pos));
        }
        Ok(num)
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b',' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, expected: u8) -> Result<(), PatternError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(PatternError::new(
                format!(
                    "expected '{}', got '{}'",
                    char::from(expected),
                    char::from(c)
                ),
                self.pos,
            )),
            None => Err(PatternError::new(
                format!("expected '{}', got end of pattern", char::from(expected)),
                self.pos,
            )),
        }
    }
}
