use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an atom stored in a [`Structure`](super::structure::Structure).
    pub struct AtomId;
    /// Stable handle to a residue stored in a [`Structure`](super::structure::Structure).
    pub struct ResidueId;
    /// Stable handle to a chain stored in a [`Structure`](super::structure::Structure).
    pub struct ChainId;
}
