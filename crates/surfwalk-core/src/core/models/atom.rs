use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents a single atom of a parsed structure.
///
/// Atoms are immutable once they have been added to a
/// [`Structure`](super::structure::Structure): the surface pipeline only ever reads
/// their positions and radii. Chain and residue membership are reached through
/// [`Atom::residue_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "NZ", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The van der Waals radius in Angstroms.
    pub radius: f64,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    /// * `radius` - The van der Waals radius of the atom in Angstroms.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            position,
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use nalgebra::Point3;

    #[test]
    fn new_atom_stores_all_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0), 1.7);

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.radius, 1.7);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("NZ", ResidueId::default(), Point3::new(0.5, 0.0, 0.0), 1.55);
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
