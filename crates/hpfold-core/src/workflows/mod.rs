//! # Workflows Module
//!
//! Top-level entry points that run a configured search end to end.
//!
//! - **Fold Workflow** ([`fold`]) - Loads the contact table, repeats the chosen strategy over
//!   independent trials (in parallel with the `parallel` feature), and keeps the best fold
//!   together with every trial's energy.

pub mod fold;
