//! Shared test fixtures for smtlink crates.
//!
//! This crate provides symbol tables and canned solver transcripts.
//! It only depends on `smtlink-core` so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`tables`] - Symbol tables over common kind mixes
//! - [`transcripts`] - Solver output as z3 prints it
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! smtlink-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use smtlink_test::tables::mixed_table;
//! use smtlink_test::transcripts::{lines, MIXED_MODEL};
//! ```

pub mod tables;
pub mod transcripts;

pub use tables::{ambiguous_table, bitvector_table, mixed_table, objective_table};
pub use transcripts::lines;
