// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Artifact coordinates and pattern matching.
//!
//! Patterns have the form
//! `groupId[:artifactId[:version[:type[:scope[:classifier]]]]]` and are
//! evaluated by [`ArtifactMatcher`] against anything implementing
//! [`Coordinates`].

mod coordinate;
mod matcher;
mod pattern;

pub use coordinate::{
    Artifact, Coordinate, Coordinates, Dependency, MatchingArtifact, DEFAULT_TYPE, SCOPE_COMPILE,
};
pub use matcher::ArtifactMatcher;
pub use pattern::Pattern;
