use phf::{Map, Set, phf_map, phf_set};

/// Radius used for elements missing from [`VDW_RADII`], in Angstroms.
pub const DEFAULT_VDW_RADIUS: f64 = 1.80;

/// Bondi van der Waals radii in Angstroms, keyed by upper-case element symbol.
pub static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H"  => 1.20,
    "C"  => 1.70,
    "N"  => 1.55,
    "O"  => 1.52,
    "F"  => 1.47,
    "P"  => 1.80,
    "S"  => 1.80,
    "CL" => 1.75,
    "BR" => 1.85,
    "I"  => 1.98,
    "SE" => 1.90,
    "NA" => 2.27,
    "K"  => 2.75,
    "MG" => 1.73,
    "ZN" => 1.39,
    "CU" => 1.40,
    "FE" => 1.94,
    "MN" => 1.97,
};

// Whole atom names that denote a two-letter element rather than, say, a carbon.
// "CA" is deliberately absent: in protein files it is the alpha carbon.
static TWO_LETTER_ATOM_NAMES: Set<&'static str> = phf_set! {
    "CL", "BR", "SE", "NA", "MG", "ZN", "CU", "FE", "MN",
};

/// Infers an element symbol from a PDB-style atom name.
///
/// Leading digits are skipped (`1HB` is hydrogen). Names that are exactly a known
/// two-letter element symbol map to that element; all others map to their first letter.
///
/// # Return
///
/// Returns `None` if the name contains no alphabetic character.
pub fn infer_element(atom_name: &str) -> Option<String> {
    let trimmed: String = atom_name
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .to_ascii_uppercase();

    if TWO_LETTER_ATOM_NAMES.contains(trimmed.as_str()) {
        return Some(trimmed);
    }
    trimmed
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
}

/// Looks up the van der Waals radius for an element symbol (case-insensitive).
pub fn vdw_radius(element: &str) -> f64 {
    VDW_RADII
        .get(element.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_VDW_RADIUS)
}

/// Resolves the radius of an atom from an optional element column, falling back
/// to inference from the atom name.
pub fn radius_for_atom(atom_name: &str, element: Option<&str>) -> f64 {
    match element.filter(|e| !e.trim().is_empty()) {
        Some(e) => vdw_radius(e),
        None => infer_element(atom_name)
            .as_deref()
            .map_or(DEFAULT_VDW_RADIUS, vdw_radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_element_uses_first_letter_for_protein_atoms() {
        assert_eq!(infer_element("CA").as_deref(), Some("C"));
        assert_eq!(infer_element("NZ").as_deref(), Some("N"));
        assert_eq!(infer_element(" OG1 ").as_deref(), Some("O"));
        assert_eq!(infer_element("SD").as_deref(), Some("S"));
    }

    #[test]
    fn infer_element_skips_leading_digits() {
        assert_eq!(infer_element("1HB").as_deref(), Some("H"));
        assert_eq!(infer_element("2HG1").as_deref(), Some("H"));
    }

    #[test]
    fn infer_element_recognizes_ion_names() {
        assert_eq!(infer_element("ZN").as_deref(), Some("ZN"));
        assert_eq!(infer_element("fe").as_deref(), Some("FE"));
        assert_eq!(infer_element("123"), None);
    }

    #[test]
    fn vdw_radius_is_case_insensitive_with_default_fallback() {
        assert_eq!(vdw_radius("c"), 1.70);
        assert_eq!(vdw_radius("Se"), 1.90);
        assert_eq!(vdw_radius("XX"), DEFAULT_VDW_RADIUS);
    }

    #[test]
    fn radius_for_atom_prefers_explicit_element() {
        assert_eq!(radius_for_atom("CA", Some("CA")), DEFAULT_VDW_RADIUS);
        assert_eq!(radius_for_atom("CA", None), 1.70);
        assert_eq!(radius_for_atom("NZ", Some("  ")), 1.55);
        assert_eq!(radius_for_atom("ZN", None), 1.39);
    }
}
