use super::config::{ConfigError, GridConfig, ResourceLimits};
use super::error::EngineError;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Classification of one voxel centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoxelLabel {
    /// The centre lies inside the van der Waals sphere of an atom.
    AtomOccupied,
    /// Outside every atom, but a probe sphere centred here would touch one.
    Buried,
    /// A probe sphere centred here touches no atom.
    Accessible,
}

/// Uniform 3-D lattice of voxel centres.
///
/// Voxel `(i, j, k)` is centred at `origin + (i, j, k) * voxel_size` and has linear index
/// `(k * ny + j) * nx + i`. The geometry is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    origin: Point3<f64>,
    voxel_size: f64,
    dims: [usize; 3],
}

impl Lattice {
    pub(crate) fn new(origin: Point3<f64>, voxel_size: f64, dims: [usize; 3]) -> Self {
        Self {
            origin,
            voxel_size,
            dims,
        }
    }

    /// Builds the lattice enclosing a structure's bounding box, expanded on every side
    /// by the largest atom radius plus the probe radius plus one voxel.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an empty structure or a non-positive
    /// voxel size, and [`EngineError::ResourceLimitExceeded`] when the lattice would
    /// exceed `limits.max_voxels`.
    pub fn enclosing(
        structure: &Structure,
        grid: &GridConfig,
        limits: &ResourceLimits,
    ) -> Result<Self, EngineError> {
        if !(grid.voxel_size.is_finite() && grid.voxel_size > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "voxel_size",
                reason: "must be a positive finite number".to_string(),
            }
            .into());
        }
        let (min, max) = structure
            .bounding_box()
            .ok_or_else(|| ConfigError::EmptyStructure(structure.name().to_string()))?;
        let max_radius = structure.max_atom_radius().unwrap_or(0.0);

        let margin = max_radius + grid.probe_radius + grid.voxel_size;
        let margin_vec = Vector3::repeat(margin);
        let origin = min - margin_vec;
        let extent = (max + margin_vec) - origin;

        let mut dims = [0usize; 3];
        let mut total = 1.0f64;
        for axis in 0..3 {
            let count = (extent[axis] / grid.voxel_size).ceil() + 1.0;
            total *= count;
            dims[axis] = count as usize;
        }
        if !total.is_finite() || total > limits.max_voxels as f64 {
            return Err(EngineError::ResourceLimitExceeded {
                structure: structure.name().to_string(),
                resource: "voxel",
                required: if total.is_finite() { total as usize } else { usize::MAX },
                limit: limits.max_voxels,
            });
        }

        debug!(
            structure = structure.name(),
            nx = dims[0],
            ny = dims[1],
            nz = dims[2],
            voxel_size = grid.voxel_size,
            "Computed lattice geometry."
        );
        Ok(Self::new(origin, grid.voxel_size, dims))
    }

    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    pub fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of voxels.
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of voxels in one z-slice.
    pub fn slice_len(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    #[inline]
    pub fn linear_index(&self, [i, j, k]: [usize; 3]) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    #[inline]
    pub fn coords(&self, index: usize) -> [usize; 3] {
        let [nx, ny, _] = self.dims;
        [index % nx, (index / nx) % ny, index / (nx * ny)]
    }

    /// Linear index of integer coordinates, or `None` when they fall outside the lattice.
    #[inline]
    pub fn checked_index(&self, coords: [isize; 3]) -> Option<usize> {
        let mut unsigned = [0usize; 3];
        for axis in 0..3 {
            let c = usize::try_from(coords[axis]).ok()?;
            if c >= self.dims[axis] {
                return None;
            }
            unsigned[axis] = c;
        }
        Some(self.linear_index(unsigned))
    }

    /// Index of the voxel reached from `index` by an integer step, if inside the lattice.
    #[inline]
    pub fn step(&self, index: usize, offset: [i8; 3]) -> Option<usize> {
        let c = self.coords(index);
        self.checked_index([
            c[0] as isize + offset[0] as isize,
            c[1] as isize + offset[1] as isize,
            c[2] as isize + offset[2] as isize,
        ])
    }

    #[inline]
    pub fn center(&self, [i, j, k]: [usize; 3]) -> Point3<f64> {
        self.origin + Vector3::new(i as f64, j as f64, k as f64) * self.voxel_size
    }

    #[inline]
    pub fn center_of(&self, index: usize) -> Point3<f64> {
        self.center(self.coords(index))
    }

    /// Integer coordinates of the voxel whose centre is nearest to `point`.
    ///
    /// The result is not clamped and may lie outside the lattice.
    pub fn nearest_coords(&self, point: &Point3<f64>) -> [isize; 3] {
        let rel = (point - self.origin) / self.voxel_size;
        [
            rel.x.round() as isize,
            rel.y.round() as isize,
            rel.z.round() as isize,
        ]
    }
}

/// Per-voxel label counts of a classified grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub occupied: usize,
    pub buried: usize,
    pub accessible: usize,
}

/// A lattice together with one label per voxel, stored densely in linear-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    lattice: Lattice,
    labels: Vec<VoxelLabel>,
}

impl VoxelGrid {
    /// Wraps pre-computed labels; `labels.len()` must equal `lattice.len()`.
    pub(crate) fn from_labels(lattice: Lattice, labels: Vec<VoxelLabel>) -> Result<Self, EngineError> {
        if labels.len() != lattice.len() {
            return Err(EngineError::Internal(format!(
                "label count {} does not match lattice size {}",
                labels.len(),
                lattice.len()
            )));
        }
        Ok(Self { lattice, labels })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn labels(&self) -> &[VoxelLabel] {
        &self.labels
    }

    #[inline]
    pub fn label(&self, index: usize) -> VoxelLabel {
        self.labels[index]
    }

    #[inline]
    pub fn is_accessible(&self, index: usize) -> bool {
        self.labels[index] == VoxelLabel::Accessible
    }

    pub fn counts(&self) -> LabelCounts {
        self.labels
            .iter()
            .fold(LabelCounts::default(), |mut counts, label| {
                match label {
                    VoxelLabel::AtomOccupied => counts.occupied += 1,
                    VoxelLabel::Buried => counts.buried += 1,
                    VoxelLabel::Accessible => counts.accessible += 1,
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    const TOLERANCE: f64 = 1e-9;

    fn single_atom_structure(radius: f64) -> Structure {
        let mut structure = Structure::new("sphere");
        let chain = structure.add_chain('A');
        let residue = structure.add_residue(chain, 1, "UNK").unwrap();
        structure
            .add_atom_to_residue(residue, Atom::new("X", residue, Point3::origin(), radius))
            .unwrap();
        structure
    }

    #[test]
    fn enclosing_lattice_adds_margin_on_every_side() {
        let structure = single_atom_structure(10.0);
        let lattice =
            Lattice::enclosing(&structure, &GridConfig::default(), &ResourceLimits::default())
                .unwrap();

        assert_eq!(lattice.dims(), [26, 26, 26]);
        assert!((lattice.origin().x + 12.4).abs() < TOLERANCE);
        assert_eq!(lattice.len(), 26 * 26 * 26);
        let far_corner = lattice.center([25, 25, 25]);
        assert!(far_corner.x >= 12.4 - TOLERANCE);
    }

    #[test]
    fn enclosing_rejects_empty_structure() {
        let structure = Structure::new("empty");
        let err = Lattice::enclosing(&structure, &GridConfig::default(), &ResourceLimits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Configuration(ConfigError::EmptyStructure(ref name)) if name == "empty"
        ));
    }

    #[test]
    fn enclosing_rejects_non_positive_voxel_size() {
        let structure = single_atom_structure(1.5);
        let grid = GridConfig {
            voxel_size: 0.0,
            probe_radius: 1.4,
        };
        let err = Lattice::enclosing(&structure, &grid, &ResourceLimits::default()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn enclosing_enforces_voxel_limit() {
        let structure = single_atom_structure(10.0);
        let limits = ResourceLimits {
            max_voxels: 1000,
            ..ResourceLimits::default()
        };
        let err = Lattice::enclosing(&structure, &GridConfig::default(), &limits).unwrap_err();
        match err {
            EngineError::ResourceLimitExceeded {
                structure,
                resource,
                required,
                limit,
            } => {
                assert_eq!(structure, "sphere");
                assert_eq!(resource, "voxel");
                assert_eq!(required, 26 * 26 * 26);
                assert_eq!(limit, 1000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn linear_index_and_coords_are_inverse() {
        let lattice = Lattice::new(Point3::origin(), 1.0, [4, 3, 5]);
        for index in 0..lattice.len() {
            assert_eq!(lattice.linear_index(lattice.coords(index)), index);
        }
        assert_eq!(lattice.linear_index([1, 0, 0]), 1);
        assert_eq!(lattice.linear_index([0, 1, 0]), 4);
        assert_eq!(lattice.linear_index([0, 0, 1]), 12);
    }

    #[test]
    fn checked_index_and_step_respect_bounds() {
        let lattice = Lattice::new(Point3::origin(), 1.0, [3, 3, 3]);
        assert_eq!(lattice.checked_index([-1, 0, 0]), None);
        assert_eq!(lattice.checked_index([0, 3, 0]), None);
        assert_eq!(lattice.checked_index([2, 2, 2]), Some(26));

        let corner = lattice.linear_index([0, 0, 0]);
        assert_eq!(lattice.step(corner, [-1, 0, 0]), None);
        assert_eq!(lattice.step(corner, [1, 1, 1]), Some(13));
    }

    #[test]
    fn nearest_coords_rounds_to_closest_center() {
        let lattice = Lattice::new(Point3::new(-1.0, -1.0, -1.0), 0.5, [10, 10, 10]);
        assert_eq!(lattice.nearest_coords(&Point3::new(-1.2, 0.26, 0.0)), [0, 3, 2]);
        assert_eq!(lattice.nearest_coords(&Point3::new(-5.0, 0.0, 0.0))[0], -8);
        let c = lattice.center([3, 4, 5]);
        assert!((c - Point3::new(0.5, 1.0, 1.5)).norm() < TOLERANCE);
    }

    #[test]
    fn from_labels_validates_length_and_counts_labels() {
        let lattice = Lattice::new(Point3::origin(), 1.0, [2, 1, 1]);
        assert!(VoxelGrid::from_labels(lattice.clone(), vec![VoxelLabel::Buried]).is_err());

        let grid =
            VoxelGrid::from_labels(lattice, vec![VoxelLabel::Buried, VoxelLabel::Accessible])
                .unwrap();
        assert!(grid.is_accessible(1));
        assert_eq!(
            grid.counts(),
            LabelCounts {
                occupied: 0,
                buried: 1,
                accessible: 1
            }
        );
    }
}
