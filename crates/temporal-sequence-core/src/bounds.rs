//! Inclusivity bounds of a temporal sequence and their bracket glyphs.

use serde::{Deserialize, Serialize};

/// Whether the first and last instants of a sequence include their endpoint.
///
/// Written on encode as the leading `[`/`(` and trailing `]`/`)` glyphs. The
/// glyphs are discarded on decode, so bounds are column metadata rather than
/// data carried by each value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundSpec {
    /// `true` renders `[`, `false` renders `(`.
    pub left_closed: bool,
    /// `true` renders `]`, `false` renders `)`.
    pub right_closed: bool,
}

impl BoundSpec {
    /// Both ends closed: `[ ... ]`.
    pub const CLOSED: BoundSpec = BoundSpec::new(true, true);

    /// Both ends open: `( ... )`.
    pub const OPEN: BoundSpec = BoundSpec::new(false, false);

    /// Build a spec from explicit flags. Every combination is legal.
    pub const fn new(left_closed: bool, right_closed: bool) -> Self {
        BoundSpec {
            left_closed,
            right_closed,
        }
    }

    /// Leading and trailing glyphs for this spec.
    pub const fn glyphs(&self) -> (char, char) {
        let left = if self.left_closed { '[' } else { '(' };
        let right = if self.right_closed { ']' } else { ')' };
        (left, right)
    }
}

impl Default for BoundSpec {
    fn default() -> Self {
        BoundSpec::CLOSED
    }
}

/// `true` if `c` may open a sequence.
pub(crate) fn is_open_glyph(c: char) -> bool {
    matches!(c, '[' | '(')
}

/// `true` if `c` may close a sequence.
pub(crate) fn is_close_glyph(c: char) -> bool {
    matches!(c, ']' | ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_cover_all_combinations() {
        assert_eq!(BoundSpec::new(true, true).glyphs(), ('[', ']'));
        assert_eq!(BoundSpec::new(true, false).glyphs(), ('[', ')'));
        assert_eq!(BoundSpec::new(false, true).glyphs(), ('(', ']'));
        assert_eq!(BoundSpec::new(false, false).glyphs(), ('(', ')'));
    }

    #[test]
    fn default_is_closed() {
        assert_eq!(BoundSpec::default(), BoundSpec::CLOSED);
    }

    #[test]
    fn glyph_predicates_match_spec_glyphs() {
        for spec in [BoundSpec::CLOSED, BoundSpec::OPEN, BoundSpec::new(true, false)] {
            let (l, r) = spec.glyphs();
            assert!(is_open_glyph(l));
            assert!(is_close_glyph(r));
            assert!(!is_open_glyph(r));
            assert!(!is_close_glyph(l));
        }
    }

    #[test]
    fn serde_round_trip_uses_flag_names() {
        let json = serde_json::to_string(&BoundSpec::new(true, false)).expect("serialize");
        assert_eq!(json, r#"{"left_closed":true,"right_closed":false}"#);
        let back: BoundSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, BoundSpec::new(true, false));
    }
}
