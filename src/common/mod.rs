// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/duckdb-behavioral)

//! Sensor state and timeline types shared by the engine and the driver.

pub mod state;
pub mod timeline;
pub mod timestamp;
