use super::config::Connectivity;
use super::error::EngineError;
use super::grid::{Lattice, VoxelGrid, VoxelLabel};
use super::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use std::collections::VecDeque;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Dense index of an accessible voxel in the surface graph.
pub type NodeId = u32;

const NO_NODE: u32 = u32::MAX;

/// One lattice step admitted by a connectivity pattern.
#[derive(Debug, Clone, PartialEq)]
struct NeighborOffset {
    offset: [i8; 3],
    /// Unit-voxel length of the step, `sqrt(number of non-zero components)`.
    unit_length: f64,
    /// Intermediate lattice steps the segment passes diagonally; empty for face steps.
    crossings: Vec<[i8; 3]>,
}

fn neighbor_offsets(connectivity: Connectivity) -> Vec<NeighborOffset> {
    let max_axes = connectivity.max_axes();
    let mut offsets = Vec::with_capacity(connectivity.neighbor_count());

    for dz in -1i8..=1 {
        for dy in -1i8..=1 {
            for dx in -1i8..=1 {
                let offset = [dx, dy, dz];
                let axes = offset.iter().filter(|&&c| c != 0).count() as u8;
                if axes == 0 || axes > max_axes {
                    continue;
                }
                offsets.push(NeighborOffset {
                    offset,
                    unit_length: (axes as f64).sqrt(),
                    crossings: proper_sub_offsets(offset),
                });
            }
        }
    }
    offsets
}

/// All offsets obtained by zeroing a non-empty, proper subset of the non-zero components.
fn proper_sub_offsets(offset: [i8; 3]) -> Vec<[i8; 3]> {
    let mut subs = Vec::new();
    for mask in 1u8..7 {
        let sub = [
            if mask & 1 != 0 { offset[0] } else { 0 },
            if mask & 2 != 0 { offset[1] } else { 0 },
            if mask & 4 != 0 { offset[2] } else { 0 },
        ];
        if sub != [0, 0, 0] && sub != offset && !subs.contains(&sub) {
            subs.push(sub);
        }
    }
    subs
}

/// Navigable graph over the accessible voxels of a classified grid.
///
/// Adjacency is stored in compressed sparse rows. Edges are undirected (each appears once
/// per endpoint) and weighted by the Euclidean distance between voxel centres. The graph is
/// immutable once built and is shared read-only by all searches on the same structure.
#[derive(Debug, Clone)]
pub struct SurfaceGraph {
    lattice: Lattice,
    connectivity: Connectivity,
    voxel_of_node: Vec<usize>,
    node_of_voxel: Vec<u32>,
    row_offsets: Vec<usize>,
    neighbors: Vec<NodeId>,
    weights: Vec<f64>,
    component_of_node: Vec<u32>,
    component_count: usize,
}

impl SurfaceGraph {
    #[instrument(skip_all, name = "surface_graph_task")]
    pub fn build(
        grid: &VoxelGrid,
        connectivity: Connectivity,
        reporter: &ProgressReporter,
    ) -> Result<Self, EngineError> {
        let lattice = grid.lattice().clone();
        let offsets = neighbor_offsets(connectivity);

        let voxel_of_node: Vec<usize> = grid
            .labels()
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == VoxelLabel::Accessible)
            .map(|(index, _)| index)
            .collect();
        if voxel_of_node.len() >= NO_NODE as usize {
            return Err(EngineError::Internal(format!(
                "{} accessible voxels exceed the surface graph capacity",
                voxel_of_node.len()
            )));
        }

        let mut node_of_voxel = vec![NO_NODE; lattice.len()];
        for (node, &voxel) in voxel_of_node.iter().enumerate() {
            node_of_voxel[voxel] = node as u32;
        }

        reporter.report(Progress::TaskStart {
            total_steps: voxel_of_node.len() as u64,
        });

        let voxel_size = lattice.voxel_size();
        let adjacency_of = |&voxel: &usize| -> Vec<(NodeId, f64)> {
            let adjacent = offsets
                .iter()
                .filter_map(|step| {
                    let target = lattice.step(voxel, step.offset)?;
                    let target_node = node_of_voxel[target];
                    if target_node == NO_NODE {
                        return None;
                    }
                    let tunnels = step.crossings.iter().any(|&crossing| {
                        lattice
                            .step(voxel, crossing)
                            .is_some_and(|v| grid.label(v) == VoxelLabel::AtomOccupied)
                    });
                    if tunnels {
                        return None;
                    }
                    Some((target_node, step.unit_length * voxel_size))
                })
                .collect();
            reporter.report(Progress::TaskIncrement { steps: 1 });
            adjacent
        };

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<(NodeId, f64)>> = voxel_of_node.iter().map(adjacency_of).collect();

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<(NodeId, f64)>> = voxel_of_node.par_iter().map(adjacency_of).collect();

        reporter.report(Progress::TaskFinish);

        let mut row_offsets = Vec::with_capacity(rows.len() + 1);
        row_offsets.push(0);
        let total: usize = rows.iter().map(Vec::len).sum();
        let mut neighbors = Vec::with_capacity(total);
        let mut weights = Vec::with_capacity(total);
        for row in rows {
            for (node, weight) in row {
                neighbors.push(node);
                weights.push(weight);
            }
            row_offsets.push(neighbors.len());
        }

        let mut graph = Self {
            lattice,
            connectivity,
            voxel_of_node,
            node_of_voxel,
            row_offsets,
            neighbors,
            weights,
            component_of_node: Vec::new(),
            component_count: 0,
        };
        graph.label_components();

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            components = graph.component_count,
            connectivity = %connectivity,
            "Surface graph built."
        );
        Ok(graph)
    }

    fn label_components(&mut self) {
        let mut component_of_node = vec![NO_NODE; self.voxel_of_node.len()];
        let mut queue = VecDeque::new();
        let mut next_component = 0u32;

        for start in 0..component_of_node.len() {
            if component_of_node[start] != NO_NODE {
                continue;
            }
            component_of_node[start] = next_component;
            queue.push_back(start as NodeId);
            while let Some(node) = queue.pop_front() {
                for (neighbor, _) in self.neighbors(node) {
                    let slot = &mut component_of_node[neighbor as usize];
                    if *slot == NO_NODE {
                        *slot = next_component;
                        queue.push_back(neighbor);
                    }
                }
            }
            next_component += 1;
        }

        self.component_of_node = component_of_node;
        self.component_count = next_component as usize;
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn node_count(&self) -> usize {
        self.voxel_of_node.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn component(&self, node: NodeId) -> u32 {
        self.component_of_node[node as usize]
    }

    /// Node of an accessible voxel, or `None` for any other voxel.
    #[inline]
    pub fn node_of_voxel(&self, voxel: usize) -> Option<NodeId> {
        match self.node_of_voxel.get(voxel) {
            Some(&node) if node != NO_NODE => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn voxel_of(&self, node: NodeId) -> usize {
        self.voxel_of_node[node as usize]
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Point3<f64> {
        self.lattice.center_of(self.voxel_of(node))
    }

    /// Adjacent nodes and edge weights, in fixed offset order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let start = self.row_offsets[node as usize];
        let end = self.row_offsets[node as usize + 1];
        self.neighbors[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::VoxelLabel::{Accessible as A, AtomOccupied as O, Buried as B};

    const TOLERANCE: f64 = 1e-9;

    fn grid_from(dims: [usize; 3], voxel_size: f64, labels: Vec<VoxelLabel>) -> VoxelGrid {
        VoxelGrid::from_labels(Lattice::new(Point3::origin(), voxel_size, dims), labels).unwrap()
    }

    fn build(grid: &VoxelGrid, connectivity: Connectivity) -> SurfaceGraph {
        SurfaceGraph::build(grid, connectivity, &ProgressReporter::new()).unwrap()
    }

    #[test]
    fn neighbor_offsets_match_connectivity_counts() {
        assert_eq!(neighbor_offsets(Connectivity::Face).len(), 6);
        assert_eq!(neighbor_offsets(Connectivity::Edge).len(), 18);
        assert_eq!(neighbor_offsets(Connectivity::Corner).len(), 26);
    }

    #[test]
    fn proper_sub_offsets_enumerate_diagonal_crossings() {
        assert!(proper_sub_offsets([1, 0, 0]).is_empty());
        let mut edge = proper_sub_offsets([1, -1, 0]);
        edge.sort();
        assert_eq!(edge, vec![[0, -1, 0], [1, 0, 0]]);
        assert_eq!(proper_sub_offsets([1, 1, 1]).len(), 6);
    }

    #[test]
    fn full_accessible_cube_has_expected_degrees_and_weights() {
        let grid = grid_from([3, 3, 3], 2.0, vec![A; 27]);
        let graph = build(&grid, Connectivity::Corner);

        let center = graph.node_of_voxel(13).unwrap();
        let edges: Vec<_> = graph.neighbors(center).collect();
        assert_eq!(edges.len(), 26);
        let corner_weight = edges
            .iter()
            .map(|&(_, w)| w)
            .fold(0.0, f64::max);
        assert!((corner_weight - 2.0 * 3f64.sqrt()).abs() < TOLERANCE);

        let face_graph = build(&grid, Connectivity::Face);
        assert_eq!(face_graph.neighbors(center).count(), 6);
        assert_eq!(face_graph.edge_count(), 54);
        assert_eq!(face_graph.component_count(), 1);
    }

    #[test]
    fn only_accessible_voxels_become_nodes() {
        let grid = grid_from([3, 1, 1], 1.0, vec![A, B, A]);
        let graph = build(&grid, Connectivity::Corner);

        assert_eq!(graph.node_count(), 2);
        assert!(graph.node_of_voxel(1).is_none());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.component_count(), 2);
    }

    #[test]
    fn diagonal_step_across_occupied_voxel_is_pruned() {
        // 2x2 slab in the xy-plane: (0,0) and (1,1) accessible, (1,0) occupied.
        let tunnel = grid_from([2, 2, 1], 1.0, vec![A, O, B, A]);
        let graph = build(&tunnel, Connectivity::Corner);
        let node = graph.node_of_voxel(0).unwrap();
        assert_eq!(graph.neighbors(node).count(), 0);

        // Same layout with a buried instead of occupied crossing keeps the diagonal.
        let open = grid_from([2, 2, 1], 1.0, vec![A, B, B, A]);
        let graph = build(&open, Connectivity::Corner);
        let node = graph.node_of_voxel(0).unwrap();
        let edges: Vec<_> = graph.neighbors(node).collect();
        assert_eq!(edges.len(), 1);
        assert!((edges[0].1 - 2f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let labels = vec![
            A, A, O, A, B, A, A, A, A, //
            A, O, A, A, A, B, O, A, A, //
            A, A, A, B, A, A, A, O, A,
        ];
        let grid = grid_from([3, 3, 3], 1.0, labels);
        let graph = build(&grid, Connectivity::Corner);

        for node in 0..graph.node_count() as NodeId {
            for (neighbor, weight) in graph.neighbors(node) {
                let back = graph
                    .neighbors(neighbor)
                    .find(|&(n, _)| n == node)
                    .map(|(_, w)| w);
                assert_eq!(back, Some(weight));
            }
        }
    }

    #[test]
    fn separated_blobs_form_distinct_components() {
        let grid = grid_from([5, 1, 1], 1.0, vec![A, A, B, A, A]);
        let graph = build(&grid, Connectivity::Corner);

        assert_eq!(graph.component_count(), 2);
        let left = graph.node_of_voxel(0).unwrap();
        let right = graph.node_of_voxel(4).unwrap();
        assert_ne!(graph.component(left), graph.component(right));
        assert_eq!(graph.component(left), graph.component(graph.node_of_voxel(1).unwrap()));
    }
}
