//! # Forcefield Module
//!
//! The HP contact model: which residue pairs attract each other and how strongly.
//!
//! ## Components
//!
//! - [`params`] - The [`params::ContactEnergyTable`] and its optional TOML file format
//! - [`scoring`] - The [`scoring::EnergyScorer`] that totals contact energies over a fold
//!
//! ## Energy Model
//!
//! Two residues form a contact when they occupy adjacent lattice sites without being
//! neighbours in the chain. Each contact contributes the table entry for its residue pair;
//! entries are never positive, so lower totals mean more stable folds. The default table
//! uses `H-H = -1`, `H-C = -1`, `C-C = -5`, and zero for any pair involving `P`.

pub mod params;
pub mod scoring;
