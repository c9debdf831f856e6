//! Step definitions for quality gate BDD scenarios.

pub mod when;
pub mod world;
