use super::anchor::resolve_anchor;
use super::config::SasdConfig;
use super::error::{EngineError, QueryError};
use super::graph::{NodeId, SurfaceGraph};
use super::grid::{Lattice, VoxelGrid};
use super::outcome::{CrosslinkMeasurement, QueryOutcome, Sasd, SurfaceSummary};
use super::progress::ProgressReporter;
use super::search::{PathSearch, SearchOutcome};
use super::tasks::classification;
use crate::core::models::crosslink::{AtomSpecifier, CrosslinkQuery};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use tracing::{debug, warn};

/// Path between two surface nodes, as voxel centres.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub sasd: Sasd,
    pub points: Vec<Point3<f64>>,
}

/// Per-structure session holding the classified grid and surface graph.
///
/// Built once per structure; every query against the structure borrows it read-only,
/// so queries can be evaluated concurrently.
pub struct SurfaceContext<'a> {
    structure: &'a Structure,
    config: &'a SasdConfig,
    grid: VoxelGrid,
    graph: SurfaceGraph,
}

impl<'a> SurfaceContext<'a> {
    /// Voxelizes, classifies, and builds the surface graph of a structure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for invalid parameters or an empty structure
    /// and [`EngineError::ResourceLimitExceeded`] when the grid would be too large.
    pub fn build(
        structure: &'a Structure,
        config: &'a SasdConfig,
        reporter: &ProgressReporter,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let lattice = reporter.phase("Voxelizing", || {
            Lattice::enclosing(structure, &config.grid, &config.limits)
        })?;
        let grid = reporter.phase("Classifying voxels", || {
            classification::run(structure, lattice, config.grid.probe_radius, reporter)
        })?;
        let graph = reporter.phase("Building surface graph", || {
            SurfaceGraph::build(&grid, config.search.connectivity, reporter)
        })?;

        Ok(Self {
            structure,
            config,
            grid,
            graph,
        })
    }

    pub fn structure(&self) -> &Structure {
        self.structure
    }

    pub fn config(&self) -> &SasdConfig {
        self.config
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn graph(&self) -> &SurfaceGraph {
        &self.graph
    }

    pub fn summary(&self) -> SurfaceSummary {
        SurfaceSummary {
            dims: self.grid.lattice().dims(),
            voxels: self.grid.counts(),
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            components: self.graph.component_count(),
        }
    }

    /// Nearest accessible node within the configured anchor search radius.
    pub fn anchor_for(&self, point: &Point3<f64>) -> Option<NodeId> {
        resolve_anchor(&self.graph, point, self.config.search.anchor_search_radius)
    }

    /// Shortest surface route between two nodes.
    ///
    /// Nodes on different connected components are reported unreachable without searching.
    pub fn route(&self, source: NodeId, target: NodeId) -> Result<Route, EngineError> {
        if self.graph.component(source) != self.graph.component(target) {
            return Ok(Route {
                sasd: Sasd::Unreachable,
                points: Vec::new(),
            });
        }

        let search = PathSearch::new(&self.graph, &self.config.search, &self.config.limits);
        let outcome = search
            .run(source, target)
            .map_err(|reached| EngineError::ResourceLimitExceeded {
                structure: self.structure.name().to_string(),
                resource: "search expansion",
                required: reached.limit.saturating_add(1),
                limit: reached.limit,
            })?;

        Ok(match outcome {
            SearchOutcome::Found { cost, path } => Route {
                sasd: Sasd::Distance(cost),
                points: path.into_iter().map(|n| self.graph.position(n)).collect(),
            },
            SearchOutcome::Unreachable => Route {
                sasd: Sasd::Unreachable,
                points: Vec::new(),
            },
            SearchOutcome::BeyondCutoff => Route {
                sasd: Sasd::BeyondCutoff {
                    cutoff: self.config.search.max_distance.unwrap_or(f64::INFINITY),
                },
                points: Vec::new(),
            },
        })
    }

    /// Evaluates one crosslink query.
    ///
    /// Lookup and anchoring failures are recorded in the returned outcome. Only
    /// structure-level failures, such as an exhausted search budget, are returned as errors.
    pub fn evaluate(&self, query: &CrosslinkQuery) -> Result<QueryOutcome, EngineError> {
        let residue_names = [
            self.residue_name(&query.first),
            self.residue_name(&query.second),
        ];
        let first = self.structure.find_atom(&query.first);
        let second = self.structure.find_atom(&query.second);

        let positions = first.zip(second).and_then(|(a, b)| {
            Some((
                self.structure.atom(a)?.position,
                self.structure.atom(b)?.position,
            ))
        });
        let euclidean_distance = positions.map(|(a, b)| nalgebra::distance(&a, &b));

        let outcome = |result: Result<CrosslinkMeasurement, QueryError>| QueryOutcome {
            query: query.clone(),
            residue_names: residue_names.clone(),
            euclidean_distance,
            result,
        };

        let Some((first_position, second_position)) = positions else {
            let missing = if first.is_none() {
                &query.first
            } else {
                &query.second
            };
            warn!(structure = self.structure.name(), atom = %missing, "Crosslink atom not found.");
            return Ok(outcome(Err(QueryError::UnknownResidue {
                spec: missing.clone(),
            })));
        };

        let radius = self.config.search.anchor_search_radius;
        let source = self.anchor_for(&first_position);
        let target = self.anchor_for(&second_position);
        let (source, target) = match (source, target) {
            (Some(s), Some(t)) => (s, t),
            (None, _) | (_, None) => {
                let spec = if source.is_none() {
                    &query.first
                } else {
                    &query.second
                };
                warn!(
                    structure = self.structure.name(),
                    atom = %spec,
                    radius,
                    "No accessible anchor near crosslink atom."
                );
                return Ok(outcome(Err(QueryError::UnreachableAnchor {
                    spec: spec.clone(),
                    radius,
                })));
            }
        };

        let route = self.route(source, target)?;
        debug!(
            structure = self.structure.name(),
            query = %query,
            sasd = %route.sasd,
            "Crosslink measured."
        );

        Ok(outcome(Ok(CrosslinkMeasurement {
            sasd: route.sasd,
            anchors: [self.graph.position(source), self.graph.position(target)],
            path: route.points,
        })))
    }

    fn residue_name(&self, spec: &AtomSpecifier) -> Option<String> {
        let chain_id = self.structure.find_chain_by_id(spec.chain_id)?;
        let residue_id = self
            .structure
            .find_residue_by_id(chain_id, spec.residue_number)?;
        self.structure.residue(residue_id).map(|r| r.name.clone())
    }
}
