use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::grid::{Lattice, VoxelGrid, VoxelLabel};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::spatial::AtomIndex;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Labels every voxel of `lattice` as occupied, buried, or accessible.
///
/// Each z-slice is classified independently; labels depend only on atom positions,
/// radii, and the lattice geometry, so the result is identical with or without the
/// `parallel` feature.
#[instrument(skip_all, name = "classification_task")]
pub fn run(
    structure: &Structure,
    lattice: Lattice,
    probe_radius: f64,
    reporter: &ProgressReporter,
) -> Result<VoxelGrid, EngineError> {
    let index = AtomIndex::new(structure);
    let [nx, ny, nz] = lattice.dims();
    let slice_len = lattice.slice_len();
    if slice_len == 0 {
        return Err(EngineError::Internal("lattice has an empty z-slice".to_string()));
    }

    info!(
        atoms = index.len(),
        voxels = lattice.len(),
        probe_radius,
        "Classifying voxels."
    );
    reporter.report(Progress::TaskStart {
        total_steps: nz as u64,
    });

    let mut labels = vec![VoxelLabel::Accessible; lattice.len()];

    #[cfg(not(feature = "parallel"))]
    let slices = labels.chunks_mut(slice_len);

    #[cfg(feature = "parallel")]
    let slices = labels.par_chunks_mut(slice_len);

    slices.enumerate().for_each(|(k, slice)| {
        for j in 0..ny {
            for i in 0..nx {
                let center = lattice.center([i, j, k]);
                slice[j * nx + i] = index.classify_point(&center, probe_radius);
            }
        }
        reporter.report(Progress::TaskIncrement { steps: 1 });
    });

    reporter.report(Progress::TaskFinish);

    let grid = VoxelGrid::from_labels(lattice, labels)?;
    let counts = grid.counts();
    info!(
        occupied = counts.occupied,
        buried = counts.buried,
        accessible = counts.accessible,
        "Voxel classification complete."
    );
    Ok(grid)
}
