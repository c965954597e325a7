//! Canonical spellings for attribute values.
//!
//! Datasheets and buyer requirements spell the same thing many ways
//! ("Aluminium", "aluminum", "Al"). Everything that reaches the match engine
//! goes through [`normalize`] first.

/// Synonym table, keyed by the lower-cased, trimmed spelling.
const SYNONYMS: &[(&str, &str)] = &[
    // Conductor materials
    ("aluminum", "al"),
    ("aluminium", "al"),
    ("al", "al"),
    ("copper", "cu"),
    ("cu", "cu"),
    // Insulation
    ("xlpe", "xlpe"),
    ("cross linked polyethylene", "xlpe"),
    ("cross-linked polyethylene", "xlpe"),
    ("pvc", "pvc"),
    ("polyvinyl chloride", "pvc"),
    ("epr", "epr"),
    ("ethylene propylene rubber", "epr"),
    // Armouring
    ("gi strip", "gi_strip"),
    ("galvanized iron strip", "gi_strip"),
    ("galvanised iron strip", "gi_strip"),
    ("gi wire", "gi_wire"),
    ("galvanized iron wire", "gi_wire"),
    ("galvanised iron wire", "gi_wire"),
    ("steel wire", "swa"),
    ("swa", "swa"),
    ("steel wire armoured", "swa"),
    ("steel wire armour", "swa"),
    ("unarmoured", "unarmoured"),
    ("none", "unarmoured"),
    // Sheathing
    ("pe", "pe"),
    ("polyethylene", "pe"),
    ("lszh", "lszh"),
    ("low smoke zero halogen", "lszh"),
];

/// Canonicalize a raw attribute value.
///
/// Lower-cases and trims, then maps known synonyms to their canonical token.
/// Unknown values pass through lower-cased and trimmed.
pub fn normalize(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase();
    SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == cleaned)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(cleaned)
}
