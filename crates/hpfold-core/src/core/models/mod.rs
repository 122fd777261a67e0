//! # Models Module
//!
//! Data structures describing a lattice protein.
//!
//! - [`residue`] - The `H`/`P`/`C` residue alphabet and validated [`residue::Sequence`]s
//! - [`lattice`] - Lattice coordinates, dimensionality and neighbourhood queries
//! - [`conformation`] - A (partial) self-avoiding placement of a sequence on the lattice
//! - [`fold`] - Direction codes used for export

pub mod conformation;
pub mod fold;
pub mod lattice;
pub mod residue;
