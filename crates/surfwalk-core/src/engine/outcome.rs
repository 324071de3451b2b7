use super::error::QueryError;
use super::grid::LabelCounts;
use crate::core::io::paths::PathModel;
use crate::core::io::results::{QueryStatus, SasdRecord};
use crate::core::models::crosslink::{AtomSpecifier, CrosslinkQuery};
use nalgebra::Point3;
use std::fmt;

/// Surface distance between two anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sasd {
    /// Length of the shortest surface path in Angstroms.
    Distance(f64),
    /// The anchors lie on disconnected surface patches.
    Unreachable,
    /// The shortest path, if any, is longer than the configured cutoff.
    BeyondCutoff { cutoff: f64 },
}

impl Sasd {
    /// The finite distance, if one was found.
    pub fn value(&self) -> Option<f64> {
        match self {
            Sasd::Distance(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Sasd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sasd::Distance(d) => write!(f, "{:.3}", d),
            Sasd::Unreachable => f.write_str("unreachable"),
            Sasd::BeyondCutoff { cutoff } => write!(f, "> {:.3}", cutoff),
        }
    }
}

/// Successful measurement of one crosslink.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosslinkMeasurement {
    pub sasd: Sasd,
    /// Centres of the anchor voxels of the first and second atom.
    pub anchors: [Point3<f64>; 2],
    /// Voxel centres along the path, empty unless a path was found and recorded.
    pub path: Vec<Point3<f64>>,
}

/// Everything known about one query after evaluation, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub query: CrosslinkQuery,
    /// Residue names of both sides, when the residues exist.
    pub residue_names: [Option<String>; 2],
    /// Straight-line distance between the two atoms, when both were found.
    pub euclidean_distance: Option<f64>,
    pub result: Result<CrosslinkMeasurement, QueryError>,
}

impl QueryOutcome {
    pub fn status(&self) -> QueryStatus {
        match &self.result {
            Ok(m) => match m.sasd {
                Sasd::Distance(_) => QueryStatus::Ok,
                Sasd::Unreachable => QueryStatus::Unreachable,
                Sasd::BeyondCutoff { .. } => QueryStatus::BeyondCutoff,
            },
            Err(QueryError::UnknownResidue { .. }) => QueryStatus::UnknownResidue,
            Err(QueryError::UnreachableAnchor { .. }) => QueryStatus::UnreachableAnchor,
        }
    }

    pub fn sasd(&self) -> Option<f64> {
        self.result.as_ref().ok().and_then(|m| m.sasd.value())
    }

    /// Label of one side in `RES-number-chain-ATOM` form, with `?` for an unknown residue.
    pub fn atom_label(&self, side: usize) -> String {
        let spec: &AtomSpecifier = if side == 0 {
            &self.query.first
        } else {
            &self.query.second
        };
        let name = self
            .residue_names
            .get(side)
            .and_then(|n| n.as_deref())
            .unwrap_or("?");
        format!(
            "{}-{}-{}-{}",
            name, spec.residue_number, spec.chain_id, spec.atom_name
        )
    }

    pub fn to_record(&self, index: usize, model: &str) -> SasdRecord {
        SasdRecord {
            index,
            model: model.to_string(),
            atom1: self.atom_label(0),
            atom2: self.atom_label(1),
            sasd: self.sasd(),
            euclidean_distance: self.euclidean_distance,
            status: self.status(),
        }
    }

    /// Path model for visualization, if a path was recorded.
    pub fn path_model(&self) -> Option<PathModel> {
        let measurement = self.result.as_ref().ok()?;
        if measurement.path.is_empty() {
            return None;
        }
        Some(PathModel {
            label: format!("{} {}", self.atom_label(0), self.atom_label(1)),
            points: measurement.path.clone(),
        })
    }
}

/// Size of the derived surface of one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSummary {
    pub dims: [usize; 3],
    pub voxels: LabelCounts,
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
}

/// All results for one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct SasdReport {
    pub structure: String,
    pub summary: SurfaceSummary,
    pub outcomes: Vec<QueryOutcome>,
}

impl SasdReport {
    /// Result table rows, numbered from 1 in query order.
    pub fn records(&self) -> Vec<SasdRecord> {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| outcome.to_record(i + 1, &self.structure))
            .collect()
    }

    pub fn path_models(&self) -> Vec<PathModel> {
        self.outcomes
            .iter()
            .filter_map(QueryOutcome::path_model)
            .collect()
    }

    pub fn count_with_status(&self, status: QueryStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status() == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> CrosslinkQuery {
        CrosslinkQuery::new(
            AtomSpecifier::new('A', 1, "CA"),
            AtomSpecifier::new('B', 20, "NZ"),
        )
    }

    fn measured(sasd: Sasd, path: Vec<Point3<f64>>) -> QueryOutcome {
        QueryOutcome {
            query: query(),
            residue_names: [Some("LYS".into()), Some("LYS".into())],
            euclidean_distance: Some(12.5),
            result: Ok(CrosslinkMeasurement {
                sasd,
                anchors: [Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
                path,
            }),
        }
    }

    #[test]
    fn status_reflects_measurement_and_errors() {
        assert_eq!(measured(Sasd::Distance(3.0), vec![]).status(), QueryStatus::Ok);
        assert_eq!(
            measured(Sasd::Unreachable, vec![]).status(),
            QueryStatus::Unreachable
        );
        assert_eq!(
            measured(Sasd::BeyondCutoff { cutoff: 30.0 }, vec![]).status(),
            QueryStatus::BeyondCutoff
        );

        let failed = QueryOutcome {
            query: query(),
            residue_names: [Some("LYS".into()), None],
            euclidean_distance: None,
            result: Err(QueryError::UnknownResidue {
                spec: query().second,
            }),
        };
        assert_eq!(failed.status(), QueryStatus::UnknownResidue);
        assert_eq!(failed.atom_label(1), "?-20-B-NZ");
    }

    #[test]
    fn record_carries_labels_and_optional_values() {
        let record = measured(Sasd::Distance(18.0), vec![]).to_record(4, "model_1");
        assert_eq!(record.index, 4);
        assert_eq!(record.atom1, "LYS-1-A-CA");
        assert_eq!(record.atom2, "LYS-20-B-NZ");
        assert_eq!(record.sasd, Some(18.0));
        assert_eq!(record.euclidean_distance, Some(12.5));

        let unreachable = measured(Sasd::Unreachable, vec![]).to_record(1, "m");
        assert_eq!(unreachable.sasd, None);
        assert_eq!(unreachable.status, QueryStatus::Unreachable);
    }

    #[test]
    fn path_model_requires_recorded_path() {
        assert!(measured(Sasd::Distance(1.0), vec![]).path_model().is_none());
        let model = measured(
            Sasd::Distance(1.0),
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
        )
        .path_model()
        .unwrap();
        assert_eq!(model.label, "LYS-1-A-CA LYS-20-B-NZ");
        assert_eq!(model.points.len(), 2);
    }

    #[test]
    fn sasd_display_is_human_readable() {
        assert_eq!(Sasd::Distance(35.81234).to_string(), "35.812");
        assert_eq!(Sasd::Unreachable.to_string(), "unreachable");
        assert_eq!(Sasd::BeyondCutoff { cutoff: 40.0 }.to_string(), "> 40.000");
    }
}
