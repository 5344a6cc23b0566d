// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Named movement patterns in evaluation priority order.
//!
//! # Configuration
//!
//! Registries are usually loaded from a TOML document:
//!
//! ```toml
//! order = ["person_entering_door", "person_exiting_door"]
//!
//! [patterns]
//! person_entering_door = "!object_detected door_open object_detected door_closed"
//! person_exiting_door = "object_detected door_open door_closed !object_detected(5)"
//! ```
//!
//! `order` fixes the evaluation priority. Every name in it must be defined
//! under `[patterns]`; definitions that `order` never mentions are skipped.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::common::state::State;
use crate::error::{Error, Result};
use crate::pattern::model::{Pattern, PatternStep};
use crate::pattern::parser::parse_pattern;

/// Pattern a person walking in through the door leaves behind: nobody in
/// view beforehand, the door opens, someone is seen, the door closes.
pub const PERSON_ENTERING_DOOR: &str = "person_entering_door";

/// Pattern a person walking out leaves behind: someone in view, the door
/// opens and closes, and nobody is seen for five seconds afterwards.
pub const PERSON_EXITING_DOOR: &str = "person_exiting_door";

/// Raw registry document as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryConfig {
    order: Vec<String>,
    #[serde(default)]
    patterns: BTreeMap<String, String>,
}

/// Named patterns with a fixed evaluation priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternRegistry {
    entries: Vec<(String, Pattern)>,
}

impl PatternRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `pattern` under `name` at the lowest priority so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePattern`] if `name` is already registered.
    pub fn register(&mut self, name: impl Into<String>, pattern: Pattern) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(Error::DuplicatePattern(name));
        }
        self.entries.push((name, pattern));
        Ok(())
    }

    /// Builds a registry from a TOML document.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the document is not valid TOML or has the
    ///   wrong shape.
    /// - [`Error::UnknownPattern`] if `order` names an undefined pattern.
    /// - [`Error::DuplicatePattern`] if `order` lists a name twice.
    /// - [`Error::Syntax`] if a pattern definition fails to parse.
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(doc)?;
        let mut registry = Self::new();
        for name in &config.order {
            let src = config
                .patterns
                .get(name)
                .ok_or_else(|| Error::UnknownPattern(name.clone()))?;
            let pattern = parse_pattern(src)
                .inspect_err(|e| log::warn!("pattern {name} failed to parse: {e}"))?;
            registry.register(name.as_str(), pattern)?;
        }
        for name in config.patterns.keys() {
            if registry.get(name).is_none() {
                log::warn!("pattern {name} is defined but not in the evaluation order, skipping");
            }
        }
        log::info!("loaded {} movement patterns", registry.len());
        Ok(registry)
    }

    /// The built-in door movement patterns, entering before exiting.
    #[must_use]
    pub fn door_movement() -> Self {
        use PatternStep as S;

        let defs = [
            (
                PERSON_ENTERING_DOOR,
                Pattern::new(vec![
                    S::negative(State::OBJECT_DETECTED),
                    S::positive(State::DOOR_OPEN),
                    S::positive(State::OBJECT_DETECTED),
                    S::positive(State::DOOR_CLOSED),
                ]),
            ),
            (
                PERSON_EXITING_DOOR,
                Pattern::new(vec![
                    S::positive(State::OBJECT_DETECTED),
                    S::positive(State::DOOR_OPEN),
                    S::positive(State::DOOR_CLOSED),
                    S::negative_for(State::OBJECT_DETECTED, 5),
                ]),
            ),
        ];
        let mut registry = Self::new();
        for (name, pattern) in defs {
            if let Err(e) = pattern.and_then(|p| registry.register(name, p)) {
                log::error!("built-in pattern {name} rejected: {e}");
            }
        }
        registry
    }

    /// Looks up a pattern by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Iterates `(name, pattern)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Pattern names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no patterns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
