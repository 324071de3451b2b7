use crate::core::models::crosslink::{AtomSpecifier, CrosslinkQuery, DEFAULT_ANCHOR_ATOM};
use crate::core::models::structure::Structure;
use itertools::Itertools;
use nalgebra::Point3;
use tracing::debug;

/// Which residues take part in generated crosslink pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSelection {
    /// Residue names eligible for crosslinking, matched case-insensitively.
    pub residue_names: Vec<String>,
    /// Also include the first residue of every chain, whatever its name.
    pub include_n_terminus: bool,
    /// Atom used as the anchor of every selected residue.
    pub atom_name: String,
    /// Drop pairs whose atoms are farther apart than this, in Angstroms.
    pub max_euclidean_distance: Option<f64>,
}

impl Default for PairSelection {
    fn default() -> Self {
        Self {
            residue_names: vec!["LYS".to_string()],
            include_n_terminus: true,
            atom_name: DEFAULT_ANCHOR_ATOM.to_string(),
            max_euclidean_distance: None,
        }
    }
}

/// Generates every pair of selected residues in a structure.
///
/// Residues are visited by chain identifier, then in chain order, so the output is
/// deterministic. Residues lacking the anchor atom are skipped.
pub fn enumerate_crosslinks(structure: &Structure, selection: &PairSelection) -> Vec<CrosslinkQuery> {
    let mut chains: Vec<_> = structure.chains_iter().map(|(_, chain)| chain).collect();
    chains.sort_by_key(|chain| chain.id);

    let candidates: Vec<(AtomSpecifier, Point3<f64>)> = chains
        .into_iter()
        .flat_map(|chain| {
            let n_terminus = chain.first_residue();
            chain.residues().iter().filter_map(move |&residue_id| {
                let residue = structure.residue(residue_id)?;
                let by_name = selection
                    .residue_names
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(&residue.name));
                let by_terminus = selection.include_n_terminus && n_terminus == Some(residue_id);
                if !(by_name || by_terminus) {
                    return None;
                }
                let atom_id = residue.get_atom_id_by_name(&selection.atom_name)?;
                let atom = structure.atom(atom_id)?;
                Some((
                    AtomSpecifier::new(chain.id, residue.number, &selection.atom_name),
                    atom.position,
                ))
            })
        })
        .collect();

    let pairs: Vec<CrosslinkQuery> = candidates
        .iter()
        .tuple_combinations()
        .filter(|((_, a), (_, b))| {
            selection
                .max_euclidean_distance
                .is_none_or(|max| nalgebra::distance(a, b) <= max)
        })
        .map(|((first, _), (second, _))| CrosslinkQuery::new(first.clone(), second.clone()))
        .collect();

    debug!(
        structure = structure.name(),
        residues = candidates.len(),
        pairs = pairs.len(),
        "Enumerated crosslink pairs."
    );
    pairs
}
