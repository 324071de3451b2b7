use super::graph::{NodeId, SurfaceGraph};
use nalgebra::Point3;

/// Finds the surface node whose voxel centre is closest to `point`.
///
/// Shells of increasing Chebyshev radius around the voxel nearest to `point` are scanned,
/// up to `max_radius` voxels. Only shells that intersect the lattice are visited, and only
/// their in-lattice part, so the work is bounded by the lattice size whatever the radius.
/// Among accessible voxels the one with the smallest centre distance wins, ties going to
/// the lower linear index. Scanning stops early once no voxel in a further shell could be
/// closer.
pub fn resolve_anchor(graph: &SurfaceGraph, point: &Point3<f64>, max_radius: usize) -> Option<NodeId> {
    let lattice = graph.lattice();
    let center = lattice.nearest_coords(point);
    let voxel_size = lattice.voxel_size();
    let upper = lattice.dims().map(|d| d as isize - 1);

    // Chebyshev distance from `center` to the nearest and the farthest lattice voxel.
    let (mut first_shell, mut last_shell) = (0isize, 0isize);
    for axis in 0..3 {
        let below = 0isize.saturating_sub(center[axis]);
        let above = center[axis].saturating_sub(upper[axis]);
        first_shell = first_shell.max(below).max(above);
        last_shell = last_shell
            .max(center[axis])
            .max(upper[axis].saturating_sub(center[axis]));
    }
    let last_shell = isize::try_from(max_radius)
        .unwrap_or(isize::MAX)
        .min(last_shell);

    let candidate = |coords: [isize; 3]| -> Option<Candidate> {
        let voxel = lattice.checked_index(coords)?;
        let node = graph.node_of_voxel(voxel)?;
        let distance = nalgebra::distance(&lattice.center_of(voxel), point);
        Some((distance, voxel, node))
    };

    let mut best: Option<Candidate> = None;
    for shell in first_shell..=last_shell {
        let lo = |axis: usize| center[axis].saturating_sub(shell).max(0);
        let hi = |axis: usize| center[axis].saturating_add(shell).min(upper[axis]);

        for z in lo(2)..=hi(2) {
            let on_z_face = z.abs_diff(center[2]) == shell.unsigned_abs();
            for y in lo(1)..=hi(1) {
                if on_z_face || y.abs_diff(center[1]) == shell.unsigned_abs() {
                    for x in lo(0)..=hi(0) {
                        keep_closer(&mut best, candidate([x, y, z]));
                    }
                } else {
                    keep_closer(&mut best, candidate([center[0].saturating_sub(shell), y, z]));
                    keep_closer(&mut best, candidate([center[0].saturating_add(shell), y, z]));
                }
            }
        }

        if let Some((distance, _, _)) = best {
            if distance < (shell as f64 + 0.5) * voxel_size {
                break;
            }
        }
    }

    best.map(|(_, _, node)| node)
}

/// Centre distance, linear voxel index, and node of an accessible voxel.
type Candidate = (f64, usize, NodeId);

fn keep_closer(best: &mut Option<Candidate>, found: Option<Candidate>) {
    let Some((distance, voxel, node)) = found else {
        return;
    };
    let better = match *best {
        None => true,
        Some((d, v, _)) => distance < d || (distance == d && voxel < v),
    };
    if better {
        *best = Some((distance, voxel, node));
    }
}
