//! Grade symbol scale shared by the evaluation rules.
//!
//! Ranks order symbols from strongest (1) to weakest; WASSCE composite codes
//! and plain letter grades coexist in the same scale. Unresolvable symbols
//! degrade to [`WORST_RANK`] so a malformed grade weakens a single check
//! instead of aborting the whole evaluation.

/// Sentinel rank for symbols outside the scale.
pub(crate) const WORST_RANK: u8 = 10;

/// Numeric rank for a grade symbol, lower is better.
pub(crate) fn rank(symbol: &str) -> u8 {
    match symbol.trim().to_ascii_uppercase().as_str() {
        "A1" => 1,
        "B2" => 2,
        "B3" => 3,
        "C4" => 4,
        "C5" => 5,
        "C6" => 6,
        "D7" => 7,
        "E8" => 8,
        "F9" => 9,
        "A" => 1,
        "B" => 2,
        "C" => 3,
        "D" => 4,
        "E" => 5,
        "F" => 6,
        _ => WORST_RANK,
    }
}
