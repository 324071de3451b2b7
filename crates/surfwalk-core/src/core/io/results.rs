use super::error::IoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Final state of one crosslink query as written to the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryStatus {
    Ok,
    Unreachable,
    BeyondCutoff,
    UnknownResidue,
    UnreachableAnchor,
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryStatus::Ok => "ok",
            QueryStatus::Unreachable => "unreachable",
            QueryStatus::BeyondCutoff => "beyond-cutoff",
            QueryStatus::UnknownResidue => "unknown-residue",
            QueryStatus::UnreachableAnchor => "unreachable-anchor",
        };
        f.write_str(s)
    }
}

/// One row of the result table.
///
/// `sasd` is empty unless the status is [`QueryStatus::Ok`]; `euclidean_distance`
/// is empty when either atom could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SasdRecord {
    pub index: usize,
    pub model: String,
    pub atom1: String,
    pub atom2: String,
    pub sasd: Option<f64>,
    pub euclidean_distance: Option<f64>,
    pub status: QueryStatus,
}

/// Writes result rows as CSV with a header.
pub fn write_results<'a>(
    writer: impl Write,
    records: impl IntoIterator<Item = &'a SasdRecord>,
) -> Result<(), IoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes result rows to a file path.
pub fn write_results_to_path<'a, P: AsRef<Path>>(
    path: P,
    records: impl IntoIterator<Item = &'a SasdRecord>,
) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_results(BufWriter::new(file), records)
}

/// Reads a result table previously produced by [`write_results`].
pub fn read_results(reader: impl Read) -> Result<Vec<SasdRecord>, IoError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize()
        .map(|row| row.map_err(IoError::from))
        .collect()
}
