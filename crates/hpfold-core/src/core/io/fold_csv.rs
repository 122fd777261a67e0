use crate::core::models::conformation::{Conformation, ConformationError};
use crate::core::models::fold::{FoldCode, InvalidFoldCode};
use crate::core::models::lattice::Dimension;
use crate::core::models::residue::{ResidueType, Sequence, SequenceError};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

const HEADER: [&str; 2] = ["amino", "fold"];
const SCORE_LABEL: &str = "score";

#[derive(Debug, Error)]
pub enum FoldCsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error on line {line}: {kind}")]
    InvalidRow { line: u64, kind: FoldCsvParseErrorKind },
    #[error("Missing trailing 'score' row")]
    MissingScore,
    #[error("Invalid sequence: {0}")]
    Sequence(#[from] SequenceError),
    #[error("Invalid fold: {0}")]
    Conformation(#[from] ConformationError),
}

#[derive(Debug, Error)]
pub enum FoldCsvParseErrorKind {
    #[error("Expected header 'amino,fold', got '{0}'")]
    Header(String),
    #[error("Expected 2 fields, got {0}")]
    FieldCount(usize),
    #[error("Invalid residue '{0}'")]
    Residue(String),
    #[error("Invalid fold code '{0}'")]
    FoldCode(String),
    #[error(transparent)]
    FoldCodeRange(#[from] InvalidFoldCode),
    #[error("Invalid score '{0}'")]
    Score(String),
    #[error("Unexpected row after the score row")]
    TrailingRow,
}

/// A fold read back from CSV together with the score recorded next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFold {
    pub conformation: Conformation,
    pub score: i32,
}

/// The `amino,fold` CSV layout: one row per residue with its outgoing fold code, followed by
/// a `score,<energy>` row.
pub struct FoldCsvFile;

impl FoldCsvFile {
    pub fn write_to(
        conformation: &Conformation,
        score: i32,
        writer: &mut impl Write,
    ) -> Result<(), FoldCsvError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(HEADER)?;
        for ((_, residue), code) in conformation.residues().zip(conformation.fold_codes()) {
            csv.write_record([residue.to_string(), code.to_string()])?;
        }
        csv.write_record([SCORE_LABEL.to_string(), score.to_string()])?;
        csv.flush()?;
        Ok(())
    }

    /// Rebuilds the fold described by the CSV. The recorded score is returned as-is and is
    /// not checked against the conformation.
    pub fn read_from(
        reader: &mut impl Read,
        dimension: Dimension,
    ) -> Result<RecordedFold, FoldCsvError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = csv.headers()?.clone();
        if header.iter().ne(HEADER) {
            return Err(FoldCsvError::InvalidRow {
                line: 1,
                kind: FoldCsvParseErrorKind::Header(header.iter().collect::<Vec<_>>().join(",")),
            });
        }

        let mut residues = Vec::new();
        let mut codes = Vec::new();
        let mut score = None;

        for record in csv.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let invalid = |kind: FoldCsvParseErrorKind| FoldCsvError::InvalidRow { line, kind };

            if score.is_some() {
                return Err(invalid(FoldCsvParseErrorKind::TrailingRow));
            }
            let (first, second) = match (record.get(0), record.get(1), record.len()) {
                (Some(first), Some(second), 2) => (first, second),
                _ => return Err(invalid(FoldCsvParseErrorKind::FieldCount(record.len()))),
            };

            if first == SCORE_LABEL {
                let value = second
                    .parse::<i32>()
                    .map_err(|_| invalid(FoldCsvParseErrorKind::Score(second.to_string())))?;
                score = Some(value);
                continue;
            }

            let residue = single_char(first)
                .and_then(ResidueType::from_char)
                .ok_or_else(|| invalid(FoldCsvParseErrorKind::Residue(first.to_string())))?;
            let raw = second
                .parse::<i8>()
                .map_err(|_| invalid(FoldCsvParseErrorKind::FoldCode(second.to_string())))?;
            let code = FoldCode::try_from(raw).map_err(|e| invalid(e.into()))?;
            residues.push(residue);
            codes.push(code);
        }

        let score = score.ok_or(FoldCsvError::MissingScore)?;
        let sequence = Sequence::new(residues)?;
        let conformation = Conformation::from_fold_codes(sequence, dimension, &codes)?;
        Ok(RecordedFold {
            conformation,
            score,
        })
    }

    pub fn write_to_path<P: AsRef<Path>>(
        conformation: &Conformation,
        score: i32,
        path: P,
    ) -> Result<(), FoldCsvError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(conformation, score, &mut writer)
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        dimension: Dimension,
    ) -> Result<RecordedFold, FoldCsvError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, dimension)
    }
}

pub fn write_fold<P: AsRef<Path>>(
    path: P,
    conformation: &Conformation,
    score: i32,
) -> Result<(), FoldCsvError> {
    FoldCsvFile::write_to_path(conformation, score, path)
}

pub fn read_fold<P: AsRef<Path>>(
    path: P,
    dimension: Dimension,
) -> Result<RecordedFold, FoldCsvError> {
    FoldCsvFile::read_from_path(path, dimension)
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
