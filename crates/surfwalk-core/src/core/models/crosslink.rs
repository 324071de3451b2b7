use std::fmt;

/// Default atom used to anchor a crosslinked residue when none is given.
pub const DEFAULT_ANCHOR_ATOM: &str = "CA";

/// Identifies one atom of a structure by chain, residue number and atom name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomSpecifier {
    pub chain_id: char,
    pub residue_number: isize,
    pub atom_name: String,
}

impl AtomSpecifier {
    pub fn new(chain_id: char, residue_number: isize, atom_name: &str) -> Self {
        Self {
            chain_id,
            residue_number,
            atom_name: atom_name.trim().to_string(),
        }
    }
}

impl fmt::Display for AtomSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.residue_number, self.chain_id, self.atom_name)
    }
}

/// A pair of atoms, one per crosslinked residue, whose SASD is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrosslinkQuery {
    pub first: AtomSpecifier,
    pub second: AtomSpecifier,
}

impl CrosslinkQuery {
    pub fn new(first: AtomSpecifier, second: AtomSpecifier) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for CrosslinkQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.second)
    }
}
