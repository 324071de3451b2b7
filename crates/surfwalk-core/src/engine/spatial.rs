use super::grid::VoxelLabel;
use crate::core::models::structure::Structure;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;

/// k-d tree over atom centres, used to restrict per-voxel tests to nearby atoms.
pub struct AtomIndex {
    tree: KdTree<f64, 3>,
    positions: Vec<[f64; 3]>,
    radii: Vec<f64>,
    max_radius: f64,
}

impl AtomIndex {
    pub fn new(structure: &Structure) -> Self {
        let (positions, radii): (Vec<[f64; 3]>, Vec<f64>) = structure
            .atoms_iter()
            .map(|(_, atom)| {
                (
                    [atom.position.x, atom.position.y, atom.position.z],
                    atom.radius,
                )
            })
            .unzip();
        let tree: KdTree<f64, 3> = (&positions).into();
        let max_radius = radii.iter().copied().fold(0.0, f64::max);
        Self {
            tree,
            positions,
            radii,
            max_radius,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Labels a point against every atom whose surface could be within `probe_radius`.
    ///
    /// Occupancy takes precedence over burial: a point inside any atom is
    /// [`VoxelLabel::AtomOccupied`] regardless of the other candidates.
    pub fn classify_point(&self, point: &Point3<f64>, probe_radius: f64) -> VoxelLabel {
        let reach = self.max_radius + probe_radius;
        let query = [point.x, point.y, point.z];
        let mut buried = false;

        for neighbour in self
            .tree
            .within_unsorted::<SquaredEuclidean>(&query, reach * reach)
        {
            let index = neighbour.item as usize;
            let radius = self.radii[index];
            let distance = neighbour.distance.sqrt();
            if distance < radius {
                return VoxelLabel::AtomOccupied;
            }
            if distance < radius + probe_radius {
                buried = true;
            }
        }

        if buried {
            VoxelLabel::Buried
        } else {
            VoxelLabel::Accessible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    fn two_atom_structure() -> Structure {
        let mut structure = Structure::new("pair");
        let chain = structure.add_chain('A');
        let residue = structure.add_residue(chain, 1, "UNK").unwrap();
        structure
            .add_atom_to_residue(residue, Atom::new("C1", residue, Point3::new(0.0, 0.0, 0.0), 2.0))
            .unwrap();
        structure
            .add_atom_to_residue(residue, Atom::new("C2", residue, Point3::new(10.0, 0.0, 0.0), 1.0))
            .unwrap();
        structure
    }

    #[test]
    fn index_records_atoms_and_max_radius() {
        let index = AtomIndex::new(&two_atom_structure());
        assert_eq!(index.len(), 2);
        assert_eq!(index.max_radius(), 2.0);
    }

    #[test]
    fn classify_point_distinguishes_all_three_labels() {
        let index = AtomIndex::new(&two_atom_structure());
        let probe = 1.4;

        assert_eq!(
            index.classify_point(&Point3::new(1.0, 0.0, 0.0), probe),
            VoxelLabel::AtomOccupied
        );
        assert_eq!(
            index.classify_point(&Point3::new(0.0, 3.0, 0.0), probe),
            VoxelLabel::Buried
        );
        assert_eq!(
            index.classify_point(&Point3::new(0.0, 3.5, 0.0), probe),
            VoxelLabel::Accessible
        );
    }

    #[test]
    fn classify_point_uses_each_atoms_own_radius() {
        let index = AtomIndex::new(&two_atom_structure());
        // 1.5 from the small atom: outside its radius 1.0 but within 1.0 + 1.4.
        assert_eq!(
            index.classify_point(&Point3::new(10.0, 1.5, 0.0), 1.4),
            VoxelLabel::Buried
        );
        assert_eq!(
            index.classify_point(&Point3::new(10.0, 2.5, 0.0), 1.4),
            VoxelLabel::Accessible
        );
    }

    #[test]
    fn zero_probe_leaves_nothing_buried() {
        let index = AtomIndex::new(&two_atom_structure());
        assert_eq!(
            index.classify_point(&Point3::new(0.0, 2.5, 0.0), 0.0),
            VoxelLabel::Accessible
        );
    }
}
