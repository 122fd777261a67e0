//! # I/O Module
//!
//! Persistence of finished folds. The [`fold_csv`] format is the interchange contract with
//! downstream export and plotting tools: an `amino,fold` header, one row per residue, and a
//! trailing `score` row.

pub mod fold_csv;
