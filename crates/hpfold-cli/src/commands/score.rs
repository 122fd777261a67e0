use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use hpfold::core::forcefield::params::ContactEnergyTable;
use hpfold::core::forcefield::scoring::{Contact, EnergyScorer};
use hpfold::core::io::fold_csv::read_fold;
use hpfold::core::models::lattice::Dimension;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
struct ScoreReport {
    sequence: String,
    recorded: i32,
    recomputed: i32,
    contacts: Vec<Contact>,
}

pub fn run(args: ScoreArgs) -> Result<()> {
    let dimension = if args.three_d {
        Dimension::Three
    } else {
        Dimension::Two
    };
    let report = score_file(&args.input, dimension, args.energy_table.as_deref())?;

    println!("Sequence:          {}", report.sequence);
    println!("Recorded energy:   {}", report.recorded);
    println!("Recomputed energy: {}", report.recomputed);
    for contact in &report.contacts {
        println!(
            "  contact {:>4} - {:<4} {}",
            contact.i, contact.j, contact.energy
        );
    }

    if report.recorded != report.recomputed {
        warn!(
            recorded = report.recorded,
            recomputed = report.recomputed,
            "Recorded score does not match the recomputed energy."
        );
        println!("Warning: the recorded score does not match the recomputed energy.");
    }
    Ok(())
}

fn score_file(path: &Path, dimension: Dimension, table: Option<&Path>) -> Result<ScoreReport> {
    info!("Reading fold from {:?}", path);
    let recorded = read_fold(path, dimension).map_err(|e| CliError::FoldFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let table = match table {
        Some(table_path) => ContactEnergyTable::load(table_path)?,
        None => ContactEnergyTable::default(),
    };
    let scorer = EnergyScorer::new(table);
    let conformation = &recorded.conformation;

    Ok(ScoreReport {
        sequence: conformation.sequence().to_string(),
        recorded: recorded.score,
        recomputed: scorer.score(conformation),
        contacts: scorer.contacts(conformation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HHPH_SQUARE: &str = "amino,fold\nH,1\nH,2\nP,-1\nH,0\nscore,-1\n";

    #[test]
    fn score_file_recomputes_recorded_energy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fold.csv");
        fs::write(&path, HHPH_SQUARE).unwrap();

        let report = score_file(&path, Dimension::Two, None).unwrap();
        assert_eq!(report.sequence, "HHPH");
        assert_eq!(report.recorded, -1);
        assert_eq!(report.recomputed, -1);
        assert_eq!(report.contacts.len(), 1);
        assert_eq!((report.contacts[0].i, report.contacts[0].j), (0, 3));
    }

    #[test]
    fn score_file_uses_custom_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fold.csv");
        let table = dir.path().join("table.toml");
        fs::write(&path, HHPH_SQUARE).unwrap();
        fs::write(&table, "[contacts]\nHH = -3\n").unwrap();

        let report = score_file(&path, Dimension::Two, Some(&table)).unwrap();
        assert_eq!(report.recorded, -1);
        assert_eq!(report.recomputed, -3);
    }

    #[test]
    fn score_file_reports_malformed_csv_with_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, "amino,fold\nH,1\nH,0\n").unwrap();

        match score_file(&path, Dimension::Two, None) {
            Err(CliError::FoldFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
