use crate::core::models::crosslink::CrosslinkQuery;
use crate::core::models::structure::Structure;
use crate::engine::config::SasdConfig;
use crate::engine::context::SurfaceContext;
use crate::engine::error::EngineError;
use crate::engine::outcome::SasdReport;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use tracing::{info, instrument};

/// Measures the solvent-accessible surface distance of every query on one structure.
///
/// The grid and surface graph are built once and shared by all queries. Queries that
/// name missing atoms or cannot be anchored are reported in their outcome without
/// affecting the others.
///
/// # Errors
///
/// Returns an [`EngineError`] when the whole structure cannot be processed: invalid
/// configuration, an empty structure, or an exceeded resource limit.
#[instrument(skip_all, name = "sasd_workflow", fields(structure = structure.name()))]
pub fn run(
    structure: &Structure,
    queries: &[CrosslinkQuery],
    config: &SasdConfig,
    reporter: &ProgressReporter,
) -> Result<SasdReport, EngineError> {
    info!(
        atoms = structure.atom_count(),
        queries = queries.len(),
        "Starting SASD workflow."
    );

    // === Phase 1-3: Surface construction ===
    let context = SurfaceContext::build(structure, config, reporter)?;
    let summary = context.summary();

    // === Phase 4: Crosslink measurement ===
    let outcomes = reporter.phase("Measuring crosslinks", || {
        tasks::crosslink_search::run(&context, queries, reporter)
    })?;

    info!(
        accessible_voxels = summary.voxels.accessible,
        components = summary.components,
        outcomes = outcomes.len(),
        "SASD workflow complete."
    );

    Ok(SasdReport {
        structure: structure.name().to_string(),
        summary,
        outcomes,
    })
}
