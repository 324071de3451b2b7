use crate::core::models::crosslink::CrosslinkQuery;
use crate::engine::context::SurfaceContext;
use crate::engine::error::EngineError;
use crate::engine::outcome::QueryOutcome;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates all queries against one surface context, preserving query order.
///
/// Per-query failures are captured in each outcome; the first structure-level failure
/// aborts the whole batch.
#[instrument(skip_all, name = "crosslink_search_task")]
pub fn run(
    context: &SurfaceContext,
    queries: &[CrosslinkQuery],
    reporter: &ProgressReporter,
) -> Result<Vec<QueryOutcome>, EngineError> {
    info!(
        structure = context.structure().name(),
        queries = queries.len(),
        "Measuring crosslinks."
    );
    if queries.is_empty() {
        return Ok(Vec::new());
    }

    reporter.report(Progress::TaskStart {
        total_steps: queries.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = queries.iter();

    #[cfg(feature = "parallel")]
    let iterator = queries.par_iter();

    let outcomes = iterator
        .map(|query| {
            let outcome = context.evaluate(query);
            reporter.report(Progress::TaskIncrement { steps: 1 });
            outcome
        })
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);

    let measured = outcomes.iter().filter(|o| o.sasd().is_some()).count();
    info!(
        measured,
        failed = outcomes.len() - measured,
        "Crosslink measurement complete."
    );
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::results::QueryStatus;
    use crate::core::models::atom::Atom;
    use crate::core::models::crosslink::AtomSpecifier;
    use crate::core::models::structure::Structure;
    use crate::engine::config::SasdConfig;
    use crate::engine::error::QueryError;
    use nalgebra::Point3;

    // A large central atom flanked by two small surface atoms, plus one small atom
    // buried inside the large one.
    fn decorated_sphere() -> Structure {
        let mut structure = Structure::new("decorated");
        let chain = structure.add_chain('A');
        let core = structure.add_residue(chain, 1, "UNK").unwrap();
        structure
            .add_atom_to_residue(core, Atom::new("X", core, Point3::origin(), 8.0))
            .unwrap();
        for (number, x) in [(2, 9.0), (3, -9.0)] {
            let residue = structure.add_residue(chain, number, "LYS").unwrap();
            structure
                .add_atom_to_residue(residue, Atom::new("CA", residue, Point3::new(x, 0.0, 0.0), 1.7))
                .unwrap();
        }
        let buried = structure.add_residue(chain, 4, "LYS").unwrap();
        structure
            .add_atom_to_residue(buried, Atom::new("CA", buried, Point3::new(0.0, 0.5, 0.0), 1.5))
            .unwrap();
        structure
    }

    fn query(a: isize, b: isize) -> CrosslinkQuery {
        CrosslinkQuery::new(AtomSpecifier::new('A', a, "CA"), AtomSpecifier::new('A', b, "CA"))
    }

    #[test]
    fn failed_queries_do_not_stop_the_others() {
        let structure = decorated_sphere();
        let config = SasdConfig::default();
        let context = SurfaceContext::build(&structure, &config, &ProgressReporter::new()).unwrap();
        let queries = vec![query(2, 3), query(2, 99), query(2, 4), query(3, 2)];

        let outcomes = run(&context, &queries, &ProgressReporter::new()).unwrap();

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].status(), QueryStatus::Ok);
        assert_eq!(outcomes[1].status(), QueryStatus::UnknownResidue);
        assert_eq!(
            outcomes[1].result,
            Err(QueryError::UnknownResidue {
                spec: AtomSpecifier::new('A', 99, "CA")
            })
        );
        assert_eq!(outcomes[2].status(), QueryStatus::UnreachableAnchor);
        assert_eq!(
            outcomes[2].result,
            Err(QueryError::UnreachableAnchor {
                spec: AtomSpecifier::new('A', 4, "CA"),
                radius: 3
            })
        );
        assert_eq!(outcomes[3].status(), QueryStatus::Ok);
    }

    #[test]
    fn sasd_is_symmetric_and_bounded_by_euclidean_distance() {
        let structure = decorated_sphere();
        let config = SasdConfig::default();
        let context = SurfaceContext::build(&structure, &config, &ProgressReporter::new()).unwrap();

        let outcomes = run(&context, &[query(2, 3), query(3, 2)], &ProgressReporter::new()).unwrap();
        let forward = outcomes[0].sasd().unwrap();
        let backward = outcomes[1].sasd().unwrap();

        assert!((forward - backward).abs() < 1e-9);
        assert!(forward > outcomes[0].euclidean_distance.unwrap());
    }

    #[test]
    fn same_atom_query_costs_zero() {
        let structure = decorated_sphere();
        let config = SasdConfig::default();
        let context = SurfaceContext::build(&structure, &config, &ProgressReporter::new()).unwrap();

        let outcomes = run(&context, &[query(2, 2)], &ProgressReporter::new()).unwrap();
        assert_eq!(outcomes[0].sasd(), Some(0.0));
        assert_eq!(outcomes[0].euclidean_distance, Some(0.0));
    }

    #[test]
    fn empty_query_list_yields_no_outcomes() {
        let structure = decorated_sphere();
        let config = SasdConfig::default();
        let context = SurfaceContext::build(&structure, &config, &ProgressReporter::new()).unwrap();
        assert!(run(&context, &[], &ProgressReporter::new()).unwrap().is_empty());
    }
}
