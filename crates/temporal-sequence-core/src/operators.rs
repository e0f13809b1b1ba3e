//! Operator tokens for comparisons on temporal, range and box columns.
//!
//! The set of predicates is closed. Each [`Predicate`] maps to the operator
//! symbol the store understands and to the kind of result it yields. Callers
//! building query expressions look predicates up by name and splice the
//! symbol into their SQL; nothing here evaluates anything.
//!
//! Some symbols are shared by more than one predicate (`<<`, `>>`, `&<`,
//! `&>`, `<<#`). The store disambiguates by operand types, so the table keeps
//! every name with its own entry.

use std::{fmt, str::FromStr};

use serde::Serialize;
use snafu::prelude::*;

use crate::column_type::ColumnType;

/// What a predicate evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// A plain boolean.
    Boolean,
    /// A temporal boolean (`TBOOL`).
    TemporalBoolean,
    /// A plain float.
    Float,
    /// A temporal float (`TFLOAT`).
    TemporalFloat,
}

impl ResultKind {
    /// Column type of the result, for temporal results.
    pub const fn result_column(&self) -> Option<ColumnType> {
        match self {
            ResultKind::TemporalBoolean => Some(ColumnType::TBool),
            ResultKind::TemporalFloat => Some(ColumnType::TFloat),
            ResultKind::Boolean | ResultKind::Float => None,
        }
    }

    /// `true` for predicates (boolean-valued, plain or temporal).
    pub const fn is_comparison(&self) -> bool {
        matches!(self, ResultKind::Boolean | ResultKind::TemporalBoolean)
    }
}

/// A resolved (name, symbol, result kind) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OperatorToken {
    /// Predicate name.
    pub name: &'static str,
    /// Operator symbol.
    pub symbol: &'static str,
    /// Result classification.
    pub result: ResultKind,
}

impl fmt::Display for OperatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Lookup of a predicate name that is not in the table.
#[derive(Debug, Snafu)]
#[snafu(display("unknown operator predicate '{name}'"))]
pub struct UnknownOperatorError {
    /// The name that was looked up.
    name: String,
}

impl UnknownOperatorError {
    /// The name that was looked up.
    pub fn name(&self) -> &str {
        &self.name
    }
}

macro_rules! predicates {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, $symbol:literal, $result:ident; )+) => {
        /// Every comparison and distance predicate the store exposes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Predicate {
            $( $(#[$doc])* $variant, )+
        }

        impl Predicate {
            /// All predicates, in table order.
            pub const ALL: &'static [Predicate] = &[ $( Predicate::$variant, )+ ];

            /// Snake-case predicate name.
            pub const fn name(&self) -> &'static str {
                match self { $( Predicate::$variant => $name, )+ }
            }

            /// Operator symbol.
            pub const fn symbol(&self) -> &'static str {
                match self { $( Predicate::$variant => $symbol, )+ }
            }

            /// Result classification.
            pub const fn result_kind(&self) -> ResultKind {
                match self { $( Predicate::$variant => ResultKind::$result, )+ }
            }
        }

        impl FromStr for Predicate {
            type Err = UnknownOperatorError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $( $name => Ok(Predicate::$variant), )+
                    _ => UnknownOperatorSnafu { name }.fail(),
                }
            }
        }
    };
}

predicates! {
    /// Some instant equals the operand.
    EverEqualTo => "ever_equal_to", "?=", Boolean;
    /// Every instant equals the operand.
    AlwaysEqualTo => "always_equal_to", "%=", Boolean;
    /// Some instant differs from the operand.
    EverDifferentFrom => "ever_different_from", "?<>", Boolean;
    /// Every instant differs from the operand.
    AlwaysDifferentFrom => "always_different_from", "@<>", Boolean;
    /// Some instant is less than the operand.
    EverLessThan => "ever_less_than", "?<", Boolean;
    /// Some instant is greater than the operand.
    EverGreaterThan => "ever_greater_than", "?>", Boolean;
    /// Some instant is at most the operand.
    EverLessThanOrEqualTo => "ever_less_than_or_equal_to", "?<=", Boolean;
    /// Some instant is at least the operand.
    EverGreaterThanOrEqualTo => "ever_greater_than_or_equal_to", "?>=", Boolean;
    /// Every instant is less than the operand.
    AlwaysLessThan => "always_less_than", "%<", Boolean;
    /// Every instant is greater than the operand.
    AlwaysGreaterThan => "always_greater_than", "%>", Boolean;
    /// Every instant is at most the operand.
    AlwaysLessThanOrEqualTo => "always_less_than_or_equal_to", "%<=", Boolean;
    /// Every instant is at least the operand.
    AlwaysGreaterThanOrEqualTo => "always_greater_than_or_equal_to", "%>=", Boolean;
    /// Pointwise equality over time.
    TemporalEqual => "temporal_equal", "#=", TemporalBoolean;
    /// Pointwise inequality over time.
    TemporalNotEqual => "temporal_not_equal", "#<>", TemporalBoolean;
    /// Pointwise `<` over time.
    TemporalLessThan => "temporal_less_than", "#<", TemporalBoolean;
    /// Pointwise `>` over time.
    TemporalGreaterThan => "temporal_greater_than", "#>", TemporalBoolean;
    /// Pointwise `<=` over time.
    TemporalLessThanOrEqualTo => "temporal_less_than_or_equal_to", "#<=", TemporalBoolean;
    /// Pointwise `>=` over time.
    TemporalGreaterThanOrEqualTo => "temporal_greater_than_or_equal_to", "#>=", TemporalBoolean;
    /// Value range strictly below the operand's.
    BboxAlwaysStrictlyLessThan => "bbox_always_strictly_less_than", "<<", Boolean;
    /// Value range strictly above the operand's.
    BboxAlwaysStrictlyGreaterThan => "bbox_always_strictly_greater_than", ">>", Boolean;
    /// Value range never above the operand's.
    BboxNeverGreaterThan => "bbox_never_greater_than", "&<", Boolean;
    /// Value range never below the operand's.
    BboxNeverLessThan => "bbox_never_less_than", "&>", Boolean;
    /// Box strictly left of the operand's.
    BboxStrictlyToLeft => "bbox_strictly_to_left", "<<", Boolean;
    /// Box strictly right of the operand's.
    BboxStrictlyToRight => "bbox_strictly_to_right", ">>", Boolean;
    /// Box strictly below the operand's.
    BboxStrictlyBelow => "bbox_strictly_below", "<<|", Boolean;
    /// Box strictly above the operand's.
    BboxStrictlyAbove => "bbox_strictly_above", "|>>", Boolean;
    /// Box does not extend to the left of the operand's.
    BboxDoesNotExtendToLeft => "bbox_does_not_extend_to_left", "&>", Boolean;
    /// Box does not extend to the right of the operand's.
    BboxDoesNotExtendToRight => "bbox_does_not_extend_to_right", "&<", Boolean;
    /// Box does not extend below the operand's.
    BboxDoesNotExtendBelow => "bbox_does_not_extend_below", "&<|", Boolean;
    /// Box does not extend above the operand's.
    BboxDoesNotExtendAbove => "bbox_does_not_extend_above", "|&>", Boolean;
    /// Box strictly in front of the operand's.
    BboxStrictlyInFront => "bbox_strictly_in_front", "<</", Boolean;
    /// Box strictly behind the operand's.
    BboxStrictlyInBack => "bbox_strictly_in_back", "/>>", Boolean;
    /// Box does not extend in front of the operand's.
    BboxDoesNotExtendInFront => "bbox_does_not_extend_in_front", "&</", Boolean;
    /// Box does not extend behind the operand's.
    BboxDoesNotExtendInBack => "bbox_does_not_extend_in_back", "/&>", Boolean;
    /// Time span strictly before the operand's.
    BboxAlwaysBefore => "bbox_always_before", "<<#", Boolean;
    /// Time span strictly after the operand's. Same symbol as
    /// [`Predicate::BboxAlwaysBefore`].
    BboxAlwaysAfter => "bbox_always_after", "<<#", Boolean;
    /// Time span does not extend after the operand's.
    BboxNeverAfter => "bbox_never_after", "&<#", Boolean;
    /// Time span does not extend before the operand's.
    BboxNeverBefore => "bbox_never_before", "#&>", Boolean;
    /// Bounding box contains the operand's.
    BboxContains => "bbox_contains", "@>", Boolean;
    /// Bounding box is contained in the operand's.
    BboxContained => "bbox_contained", "<@", Boolean;
    /// Bounding boxes intersect.
    BboxesOverlap => "bboxes_overlap", "&&", Boolean;
    /// Bounding boxes are equal.
    BboxesEqual => "bboxes_equal", "~=", Boolean;
    /// Smallest distance ever between two temporal values.
    SmallestDistanceEverBetween => "smallest_distance_ever_between", "|=|", Float;
    /// Distance between two temporal values at each instant.
    Distance => "distance", "<->", TemporalFloat;
}

/// Python-style alias of [`Predicate::BboxStrictlyToLeft`].
pub const LSHIFT: Predicate = Predicate::BboxStrictlyToLeft;

/// Python-style alias of [`Predicate::BboxStrictlyToRight`].
pub const RSHIFT: Predicate = Predicate::BboxStrictlyToRight;

impl Predicate {
    /// Resolved token for this predicate.
    pub const fn token(&self) -> OperatorToken {
        OperatorToken {
            name: self.name(),
            symbol: self.symbol(),
            result: self.result_kind(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a predicate name to its operator token.
pub fn lookup(name: &str) -> Result<OperatorToken, UnknownOperatorError> {
    name.parse::<Predicate>().map(|p| p.token())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_forty_four_distinct_names() {
        assert_eq!(Predicate::ALL.len(), 44);
        let names: HashSet<_> = Predicate::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), 44);
    }

    #[test]
    fn every_name_resolves_to_itself() {
        for p in Predicate::ALL {
            assert_eq!(p.name().parse::<Predicate>().expect("known"), *p);
            assert_eq!(lookup(p.name()).expect("known"), p.token());
        }
    }

    #[test]
    fn representative_symbols() {
        assert_eq!(lookup("ever_equal_to").expect("known").symbol, "?=");
        assert_eq!(lookup("temporal_equal").expect("known").symbol, "#=");
        assert_eq!(lookup("bbox_contains").expect("known").symbol, "@>");
        assert_eq!(lookup("distance").expect("known").symbol, "<->");
        assert_eq!(lookup("smallest_distance_ever_between").expect("known").symbol, "|=|");
    }

    #[test]
    fn shared_symbols_are_kept() {
        assert_eq!(Predicate::BboxAlwaysBefore.symbol(), "<<#");
        assert_eq!(Predicate::BboxAlwaysAfter.symbol(), "<<#");
        assert_eq!(
            Predicate::BboxStrictlyToLeft.symbol(),
            Predicate::BboxAlwaysStrictlyLessThan.symbol()
        );
    }

    #[test]
    fn shift_aliases() {
        assert_eq!(LSHIFT.symbol(), "<<");
        assert_eq!(RSHIFT.name(), "bbox_strictly_to_right");
    }

    #[test]
    fn result_kinds_and_columns() {
        let temporal_bool = lookup("temporal_less_than").expect("known");
        assert_eq!(temporal_bool.result, ResultKind::TemporalBoolean);
        assert_eq!(temporal_bool.result.result_column(), Some(ColumnType::TBool));

        let dist = lookup("distance").expect("known");
        assert_eq!(dist.result.result_column(), Some(ColumnType::TFloat));
        assert!(!dist.result.is_comparison());

        assert_eq!(
            lookup("smallest_distance_ever_between").expect("known").result,
            ResultKind::Float
        );
        assert_eq!(lookup("bboxes_overlap").expect("known").result.result_column(), None);
    }

    #[test]
    fn unknown_names_fail() {
        let err = lookup("overlaps_somewhat").unwrap_err();
        assert_eq!(err.name(), "overlaps_somewhat");
        assert_eq!(err.to_string(), "unknown operator predicate 'overlaps_somewhat'");
        assert!(lookup("EVER_EQUAL_TO").is_err());
    }

    #[test]
    fn token_serializes_with_result_kind() {
        let json = serde_json::to_string(&Predicate::Distance.token()).expect("json");
        assert_eq!(json, r#"{"name":"distance","symbol":"<->","result":"temporal_float"}"#);
    }
}
