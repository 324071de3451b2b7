use super::error::IoError;
use crate::core::utils::geometry::polyline_length;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Width of the PDB atom serial field.
const SERIAL_MODULUS: usize = 100_000;

/// A traversed path to be exported for visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct PathModel {
    /// Free-text label, written as a `REMARK` above the model.
    pub label: String,
    /// Path vertices in traversal order.
    pub points: Vec<Point3<f64>>,
}

/// Writes each path as one PDB `MODEL` of pseudo-atoms chained by `CONECT` records.
///
/// A second `REMARK` carries the path length. Serials wrap at the five-digit field width,
/// in `ATOM` and `CONECT` records alike.
///
/// Every path gets its own two-letter atom name and chain letter so that paths stay
/// distinguishable when a viewer flattens the models.
pub fn write_path_models<'a>(
    mut writer: impl Write,
    models: impl IntoIterator<Item = &'a PathModel>,
) -> Result<(), IoError> {
    for (model_index, model) in models.into_iter().enumerate() {
        let atom_name = format!("{}X", LETTERS[model_index % 26] as char);
        let chain = LETTERS[(model_index / 26) % 26] as char;
        let residue_name = format!("{}{}", chain, atom_name);

        writeln!(writer, "REMARK   1 {}", model.label)?;
        writeln!(writer, "REMARK   2 LENGTH {:.3}", polyline_length(&model.points))?;
        writeln!(writer, "MODEL     {:>4}", model_index + 1)?;
        for (i, p) in model.points.iter().enumerate() {
            let serial = i + 1;
            writeln!(
                writer,
                "ATOM  {:>5}  {:<3} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           X",
                serial % SERIAL_MODULUS,
                atom_name,
                residue_name,
                chain,
                serial % 10_000,
                p.x,
                p.y,
                p.z,
                1.0,
                0.0
            )?;
        }
        for serial in 1..model.points.len() {
            writeln!(
                writer,
                "CONECT{:>5}{:>5}",
                serial % SERIAL_MODULUS,
                (serial + 1) % SERIAL_MODULUS
            )?;
        }
        writeln!(writer, "ENDMDL")?;
    }
    writeln!(writer, "END")?;
    writer.flush()?;
    Ok(())
}

/// Writes path models to a file path.
pub fn write_path_models_to_path<'a, P: AsRef<Path>>(
    path: P,
    models: impl IntoIterator<Item = &'a PathModel>,
) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_path_models(BufWriter::new(file), models)
}
