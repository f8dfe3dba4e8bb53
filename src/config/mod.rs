// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for enforcer.
//!
//! This module handles locating, loading and parsing the TOML file that
//! declares rules and the project's dependencies.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
