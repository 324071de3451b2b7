use super::atom::Atom;
use super::chain::Chain;
use super::crosslink::AtomSpecifier;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents one parsed atomic structure with its chains, residues, and atoms.
///
/// This struct is the geometry model of the surface pipeline: it stores atom
/// records and answers identity lookups (chain + residue + atom name) and simple
/// spatial queries such as the bounding box. Atoms are never mutated once added;
/// their insertion order is preserved by [`Structure::atoms_iter`].
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Identifier used when reporting results and failures (usually the file stem).
    name: String,
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Lookup map for finding residues by chain ID and residue number.
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl Structure {
    /// Creates a new, empty structure with the given name.
    ///
    /// # Arguments
    ///
    /// * `name` - The identifier reported alongside results for this structure.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Returns the identifier of this structure.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns the number of atoms in the structure.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the structure holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The residue ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves an immutable reference to a chain by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The chain ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Chain)` if the chain exists, otherwise `None`.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ChainId, &Chain)` pairs.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The character identifier of the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID and residue number.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `residue_number` - The sequence number of the residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue_by_id(&self, chain_id: ChainId, residue_number: isize) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Resolves an atom specifier (chain, residue number, atom name) to an atom ID.
    ///
    /// # Arguments
    ///
    /// * `spec` - The atom specifier to resolve.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if the chain, the residue, and the named atom all exist,
    /// otherwise `None`.
    pub fn find_atom(&self, spec: &AtomSpecifier) -> Option<AtomId> {
        let chain_id = self.find_chain_by_id(spec.chain_id)?;
        let residue_id = self.find_residue_by_id(chain_id, spec.residue_number)?;
        self.residues
            .get(residue_id)?
            .get_atom_id_by_name(&spec.atom_name)
    }

    /// Adds a new chain to the structure or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    ///
    /// # Arguments
    ///
    /// * `id` - The single-character identifier for the chain.
    ///
    /// # Return
    ///
    /// The ID of the chain (new or existing).
    pub fn add_chain(&mut self, id: char) -> ChainId {
        *self
            .chain_id_map
            .entry(id)
            .or_insert_with(|| self.chains.insert(Chain::new(id)))
    }

    /// Adds a new residue to the structure or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the given chain ID and
    /// residue number already exists, it returns the existing residue ID.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `residue_number` - The sequence number of the residue.
    /// * `name` - The name of the residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            self.residues
                .insert(Residue::new(residue_number, name, chain_id))
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The ID of the residue to add the atom to.
    /// * `atom` - The atom to add. Its `residue_id` is overwritten with `residue_id`.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Returns the chain identifier, residue, and atom for an atom ID in one lookup.
    pub fn atom_context(&self, id: AtomId) -> Option<(char, &Residue, &Atom)> {
        let atom = self.atoms.get(id)?;
        let residue = self.residues.get(atom.residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some((chain.id, residue, atom))
    }

    /// Computes the axis-aligned bounding box of all atom centres.
    ///
    /// # Return
    ///
    /// Returns `Some((min, max))`, or `None` for an empty structure.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        crate::core::utils::geometry::bounding_box(self.atoms.values().map(|a| &a.position))
    }

    /// Returns the largest van der Waals radius in the structure, or `None` if empty.
    pub fn max_atom_radius(&self) -> Option<f64> {
        self.atoms.values().map(|a| a.radius).reduce(f64::max)
    }
}
