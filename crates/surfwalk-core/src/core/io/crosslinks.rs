use super::error::IoError;
use crate::core::models::crosslink::{AtomSpecifier, CrosslinkQuery, DEFAULT_ANCHOR_ATOM};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a pipe-delimited crosslink list.
///
/// Each line holds `res1|chain1|res2|chain2|` optionally followed by `atom1|atom2`.
/// Missing or empty atom columns default to [`DEFAULT_ANCHOR_ATOM`]. Blank lines and
/// lines starting with `#` are skipped.
pub fn read_crosslinks(reader: impl Read) -> Result<Vec<CrosslinkQuery>, IoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut queries = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 4 {
            return Err(IoError::record(
                line,
                format!("expected at least 4 fields, found {}", record.len()),
            ));
        }

        let atom_at = |index: usize| match record.get(index) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_ANCHOR_ATOM,
        };
        let first = parse_side(&record[0], &record[1], atom_at(4), line)?;
        let second = parse_side(&record[2], &record[3], atom_at(5), line)?;
        queries.push(CrosslinkQuery::new(first, second));
    }
    Ok(queries)
}

/// Reads a crosslink list from a file path.
pub fn read_crosslinks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CrosslinkQuery>, IoError> {
    let file = File::open(path)?;
    read_crosslinks(BufReader::new(file))
}

fn parse_side(residue: &str, chain: &str, atom: &str, line: u64) -> Result<AtomSpecifier, IoError> {
    let residue_number: isize = residue.parse().map_err(|_| {
        IoError::record(line, format!("invalid residue number '{}'", residue))
    })?;
    let mut chars = chain.chars();
    match (chars.next(), chars.next()) {
        (Some(chain_id), None) => Ok(AtomSpecifier::new(chain_id, residue_number, atom)),
        _ => Err(IoError::record(
            line,
            format!("chain identifier '{}' must be a single character", chain),
        )),
    }
}
