//! In-memory metadata models.
//!
//! # Responsibility
//! - Define the typed shapes that parsers produce and synchronizers consume.
//! - Keep domain kinds a closed tagged union matched exhaustively.
//!
//! # Invariants
//! - Every domain fragment and party record carries a durable identifier.
//! - Models hold plain values; tree handling lives in `parse` and `sync`.
//!
//! # See also
//! - `crate::xml::names` for the element names each field maps to.

pub mod coverage;
pub mod domain;
pub mod party;
