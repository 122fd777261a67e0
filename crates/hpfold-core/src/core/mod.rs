//! # Core Module
//!
//! Stateless building blocks shared by every search strategy.
//!
//! ## Architecture
//!
//! - **Lattice Representation** ([`models`]) - Residue types, validated sequences, lattice
//!   geometry, conformations and fold codes
//! - **Energy Calculations** ([`forcefield`]) - The contact energy table and the scorer
//! - **File I/O** ([`io`]) - Reading and writing folds in the `amino,fold` CSV layout
//!
//! ## Conventions
//!
//! Coordinates are integer lattice points. Residue 0 always sits at the origin and
//! residue 1 at `(1, 0, 0)`; rotations and reflections of a fold are energetically
//! equivalent, so one orientation is fixed to avoid searching redundant copies.

pub mod forcefield;
pub mod io;
pub mod models;
