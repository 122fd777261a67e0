//! # Engine Module
//!
//! The search engine that turns a residue sequence into low-energy lattice folds.
//!
//! ## Overview
//!
//! Every strategy works against a [`context::SearchContext`], which bundles the sequence,
//! the lattice dimension, the move generator and the energy scorer. Strategies are plain
//! values; the only mutable state they touch is the conformation they are growing and the
//! random number generator handed to them by the caller.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Strategy parameters and the validated [`config::FoldConfig`]
//! - **Moves** ([`moves`]) - Legal growth moves, dead-end pruning and pull moves
//! - **Strategies** ([`strategies`]) - Random, greedy, beam and pull-move local search
//! - **State Tracking** ([`state`]) - Finished [`state::Solution`]s ordered by energy
//! - **Progress Monitoring** ([`progress`]) - Progress reporting for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Failure Model
//!
//! Dead ends are expected during construction and are absorbed by restarting. They only
//! surface as [`error::EngineError::AttemptsExhausted`] when an attempt cap is configured.
//! A rejected placement, on the other hand, is a programming error and is reported as
//! [`error::EngineError::ContractViolation`].

pub mod config;
pub mod context;
pub mod error;
pub mod moves;
pub mod progress;
pub mod state;
pub mod strategies;
