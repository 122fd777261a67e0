use crate::core::models::residue::ResidueType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid residue pair '{0}'; expected two letters from H, P, C (e.g. 'HC')")]
    InvalidPair(String),
    #[error("Contact energy for pair '{pair}' must not be positive, got {energy}")]
    PositiveEnergy { pair: String, energy: i32 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    contacts: HashMap<String, i32>,
}

/// Symmetric contact energies for every pair of residue types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEnergyTable {
    energies: [[i32; 3]; 3],
}

impl Default for ContactEnergyTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ContactEnergyTable {
    /// `H-H = -1`, `H-C = -1`, `C-C = -5`; rows and columns in `H, P, C` order.
    pub const DEFAULT: Self = Self {
        energies: [[-1, 0, -1], [0, 0, 0], [-1, 0, -5]],
    };

    /// A table in which no pair interacts.
    pub fn zeroed() -> Self {
        Self {
            energies: [[0; 3]; 3],
        }
    }

    #[inline]
    pub fn energy(&self, a: ResidueType, b: ResidueType) -> i32 {
        self.energies[a.index()][b.index()]
    }

    pub fn set(&mut self, a: ResidueType, b: ResidueType, energy: i32) {
        self.energies[a.index()][b.index()] = energy;
        self.energies[b.index()][a.index()] = energy;
    }

    /// Whether `residue` has zero energy with every residue type.
    pub fn is_inert(&self, residue: ResidueType) -> bool {
        self.energies[residue.index()].iter().all(|&e| e == 0)
    }

    /// Loads a table from a TOML file with a `[contacts]` section keyed by residue pairs.
    /// Pairs that are not listed contribute zero.
    pub fn load(path: &Path) -> Result<Self, TableLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            TableLoadError::Toml { source, .. } => TableLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TableLoadError> {
        let file: TableFile = toml::from_str(content).map_err(|e| TableLoadError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;

        let mut table = Self::zeroed();
        for (pair, energy) in file.contacts {
            let (a, b) = parse_pair(&pair)?;
            if energy > 0 {
                return Err(TableLoadError::PositiveEnergy { pair, energy });
            }
            table.set(a, b, energy);
        }
        Ok(table)
    }
}

fn parse_pair(pair: &str) -> Result<(ResidueType, ResidueType), TableLoadError> {
    let mut chars = pair.chars().map(ResidueType::from_char);
    match (chars.next(), chars.next(), chars.next()) {
        (Some(Some(a)), Some(Some(b)), None) => Ok((a, b)),
        _ => Err(TableLoadError::InvalidPair(pair.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    use ResidueType::{C, H, P};

    #[test]
    fn default_table_matches_hp_model_with_cysteine() {
        let table = ContactEnergyTable::default();
        assert_eq!(table.energy(H, H), -1);
        assert_eq!(table.energy(H, C), -1);
        assert_eq!(table.energy(C, H), -1);
        assert_eq!(table.energy(C, C), -5);
        for other in ResidueType::ALL {
            assert_eq!(table.energy(P, other), 0);
            assert_eq!(table.energy(other, P), 0);
        }
    }

    #[test]
    fn set_keeps_table_symmetric() {
        let mut table = ContactEnergyTable::zeroed();
        table.set(P, C, -2);
        assert_eq!(table.energy(C, P), -2);
        assert!(table.is_inert(H));
        assert!(!table.is_inert(P));
    }

    #[test]
    fn default_table_treats_only_polar_residues_as_inert() {
        let table = ContactEnergyTable::default();
        for residue in ResidueType::ALL {
            assert_eq!(table.is_inert(residue), residue == P);
        }
    }

    #[test]
    fn from_toml_str_reads_pairs_in_either_order() {
        let table = ContactEnergyTable::from_toml_str(
            r#"
            [contacts]
            HH = -2
            CH = -3
            "#,
        )
        .unwrap();
        assert_eq!(table.energy(H, H), -2);
        assert_eq!(table.energy(H, C), -3);
        assert_eq!(table.energy(C, C), 0);
    }

    #[test]
    fn from_toml_str_rejects_positive_energy() {
        let result = ContactEnergyTable::from_toml_str("[contacts]\nHP = 1\n");
        assert!(matches!(
            result,
            Err(TableLoadError::PositiveEnergy { energy: 1, .. })
        ));
    }

    #[test]
    fn from_toml_str_rejects_malformed_pairs() {
        for key in ["H", "HHH", "HX"] {
            let content = format!("[contacts]\n{} = -1\n", key);
            assert!(matches!(
                ContactEnergyTable::from_toml_str(&content),
                Err(TableLoadError::InvalidPair(_))
            ));
        }
    }

    #[test]
    fn load_reads_table_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "[contacts]\nHH = -1\nHC = -1\nCC = -5").unwrap();

        let table = ContactEnergyTable::load(&path).unwrap();
        assert_eq!(table, ContactEnergyTable::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = ContactEnergyTable::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(TableLoadError::Io { .. })));
    }

    #[test]
    fn load_reports_toml_errors_with_file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[contacts\nHH = -1").unwrap();
        match ContactEnergyTable::load(&path) {
            Err(TableLoadError::Toml { path: reported, .. }) => {
                assert!(reported.ends_with("broken.toml"))
            }
            other => panic!("expected TOML error, got {:?}", other),
        }
    }
}
