//! # HPFold Core Library
//!
//! Heuristic conformation search for lattice proteins in the HP model. A sequence of
//! hydrophobic (`H`), polar (`P`) and cysteine (`C`) residues is folded onto a square (2D)
//! or cubic (3D) lattice as a self-avoiding walk, and a search strategy tries to minimize
//! the pairwise contact energy of the resulting fold.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Residue and sequence types, lattice geometry, the
//!   `Conformation` data model, the contact energy table and scorer, and fold CSV I/O.
//!
//! - **[`engine`]: The Logic Core.** Move generation (chain growth and pull moves),
//!   the search strategies (random, greedy, beam with lookahead, pull-move hill climbing),
//!   configuration, progress reporting and error types.
//!
//! - **[`workflows`]: The Public API.** Runs a configured strategy over many independent
//!   trials and returns the best fold together with every trial's energy.

pub mod core;
pub mod engine;
pub mod workflows;
