//! Editing aggregates over the parse/sync/validate layers.
//!
//! # Responsibility
//! - Own one model plus its baseline fragment for one edit session.
//! - Fire exactly one change signal per externally visible mutation.
//!
//! # Invariants
//! - Mutations go through setters; fields are not exposed mutably.
//! - `synchronize` never replaces the baseline; only `commit` does.
//! - Aggregates are not shared between threads mid-edit; callers serialize
//!   edits per aggregate.

pub mod geo_coverage;
pub mod non_numeric_domain;
pub mod party;
