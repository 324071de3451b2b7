use super::error::IoError;
use super::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::radii;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::debug;

/// One row of an atom table.
///
/// `radius` and `element` are optional columns; a missing radius is looked up
/// from the element (or the element inferred from the atom name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub chain: String,
    pub residue_number: isize,
    pub residue_name: String,
    pub atom_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub element: Option<String>,
}

/// CSV atom table with a header row.
///
/// Lines starting with `#` are ignored and fields are trimmed.
pub struct AtomTableFile;

impl StructureFile for AtomTableFile {
    type Error = IoError;

    fn read_from(reader: &mut impl BufRead, name: &str) -> Result<Structure, IoError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut structure = Structure::new(name);
        let mut record = csv::StringRecord::new();

        while csv_reader.read_record(&mut record)? {
            let line = record.position().map_or(0, |p| p.line());
            let row: AtomRecord = record.deserialize(Some(&headers))?;
            add_record(&mut structure, row, line)?;
        }

        if structure.is_empty() {
            return Err(IoError::Empty("atom records"));
        }
        debug!(
            structure = name,
            atoms = structure.atom_count(),
            "Parsed atom table."
        );
        Ok(structure)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), IoError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (atom_id, _) in structure.atoms_iter() {
            let Some((chain, residue, atom)) = structure.atom_context(atom_id) else {
                continue;
            };
            csv_writer.serialize(AtomRecord {
                chain: chain.to_string(),
                residue_number: residue.number,
                residue_name: residue.name.clone(),
                atom_name: atom.name.clone(),
                x: atom.position.x,
                y: atom.position.y,
                z: atom.position.z,
                radius: Some(atom.radius),
                element: None,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn add_record(structure: &mut Structure, row: AtomRecord, line: u64) -> Result<(), IoError> {
    let mut chars = row.chain.chars();
    let chain_char = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(IoError::record(
                line,
                format!("chain identifier '{}' must be a single character", row.chain),
            ));
        }
    };
    if row.atom_name.is_empty() {
        return Err(IoError::record(line, "atom name is empty"));
    }
    let position = Point3::new(row.x, row.y, row.z);
    if !position.iter().all(|c| c.is_finite()) {
        return Err(IoError::record(line, "coordinates must be finite"));
    }
    let radius = match row.radius {
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => {
            return Err(IoError::record(
                line,
                format!("radius {} must be positive and finite", r),
            ));
        }
        None => radii::radius_for_atom(&row.atom_name, row.element.as_deref()),
    };

    let chain_id = structure.add_chain(chain_char);
    let residue_id = structure
        .add_residue(chain_id, row.residue_number, &row.residue_name)
        .ok_or_else(|| IoError::record(line, "failed to register residue"))?;
    structure
        .add_atom_to_residue(
            residue_id,
            Atom::new(&row.atom_name, residue_id, position, radius),
        )
        .ok_or_else(|| IoError::record(line, "failed to register atom"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::crosslink::AtomSpecifier;
    use std::io::{BufReader, Cursor};
    use tempfile::NamedTempFile;

    const TABLE: &str = "\
chain,residue_number,residue_name,atom_name,x,y,z,radius,element
# first residue
A,1,LYS,N,0.0,0.0,0.0,,N
A,1,LYS,CA,1.5,0.0,0.0,,
A,1,LYS,NZ,5.0,1.0,0.0,1.6,
B,7,GLY,CA,-4.0,2.0,1.0,,C
";

    fn read(text: &str) -> Result<Structure, IoError> {
        AtomTableFile::read_from(&mut BufReader::new(Cursor::new(text)), "test")
    }

    #[test]
    fn read_builds_chains_residues_and_atoms() {
        let structure = read(TABLE).unwrap();

        assert_eq!(structure.name(), "test");
        assert_eq!(structure.atom_count(), 4);
        assert_eq!(structure.chains_iter().count(), 2);
        assert!(structure.find_atom(&AtomSpecifier::new('B', 7, "CA")).is_some());
    }

    #[test]
    fn read_fills_missing_radii_from_elements() {
        let structure = read(TABLE).unwrap();
        let radius_of = |chain, number, name| {
            let id = structure
                .find_atom(&AtomSpecifier::new(chain, number, name))
                .unwrap();
            structure.atom(id).unwrap().radius
        };

        assert_eq!(radius_of('A', 1, "N"), 1.55);
        assert_eq!(radius_of('A', 1, "CA"), 1.70);
        assert_eq!(radius_of('A', 1, "NZ"), 1.6);
    }

    #[test]
    fn read_accepts_tables_without_optional_columns() {
        let text = "chain,residue_number,residue_name,atom_name,x,y,z\nA,3,SER,OG,1,2,3\n";
        let structure = read(text).unwrap();
        let (_, atom) = structure.atoms_iter().next().unwrap();
        assert_eq!(atom.radius, 1.52);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn read_rejects_multi_character_chain() {
        let text = "chain,residue_number,residue_name,atom_name,x,y,z\nAB,3,SER,OG,1,2,3\n";
        assert!(matches!(read(text), Err(IoError::Record { line: 2, .. })));
    }

    #[test]
    fn read_rejects_non_positive_radius() {
        let text = "chain,residue_number,residue_name,atom_name,x,y,z,radius\nA,3,SER,OG,1,2,3,-1.0\n";
        assert!(matches!(read(text), Err(IoError::Record { .. })));
    }

    #[test]
    fn read_rejects_unparseable_numbers() {
        let text = "chain,residue_number,residue_name,atom_name,x,y,z\nA,3,SER,OG,one,2,3\n";
        assert!(matches!(read(text), Err(IoError::Csv(_))));
    }

    #[test]
    fn read_rejects_empty_table() {
        let text = "chain,residue_number,residue_name,atom_name,x,y,z\n";
        assert!(matches!(read(text), Err(IoError::Empty(_))));
    }

    #[test]
    fn written_table_reads_back_identically() {
        let original = read(TABLE).unwrap();
        let file = NamedTempFile::new().unwrap();

        AtomTableFile::write_to_path(&original, file.path()).unwrap();
        let reread = AtomTableFile::read_from_path(file.path()).unwrap();

        assert_eq!(reread.atom_count(), original.atom_count());
        for ((_, a), (_, b)) in original.atoms_iter().zip(reread.atoms_iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.position, b.position);
            assert_eq!(a.radius, b.radius);
        }
    }
}
