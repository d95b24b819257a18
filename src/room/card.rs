//! Card values and the per-user selection toggle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A selected estimate. Absence is modelled as `Option<Card>`.
///
/// On the wire a numeric card is a JSON number and a symbolic card ("?",
/// "coffee", ...) is a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Card {
    Numeric(f64),
    Symbolic(String),
}

impl Card {
    /// Numeric value of the card for statistics, if it has one.
    ///
    /// Symbolic cards whose text parses as a finite number ("5", " 0.5")
    /// count as numeric; everything else is left out of the sample.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Card::Numeric(v) if v.is_finite() => Some(*v),
            Card::Numeric(_) => None,
            Card::Symbolic(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Numeric(v) => write!(f, "{}", format_number(*v)),
            Card::Symbolic(s) => f.write_str(s),
        }
    }
}

/// Integral values print without a fractional part (`5`, not `5.0`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Toggle rule shared by `card` and `card_index`: re-submitting the current
/// value clears it, anything else replaces it.
pub fn toggle<T: PartialEq>(current: &Option<T>, submitted: Option<T>) -> Option<T> {
    if *current == submitted {
        None
    } else {
        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_detection() {
        assert_eq!(Card::Numeric(8.0).as_number(), Some(8.0));
        assert_eq!(Card::Symbolic("13".into()).as_number(), Some(13.0));
        assert_eq!(Card::Symbolic("0.5".into()).as_number(), Some(0.5));
        assert_eq!(Card::Symbolic("?".into()).as_number(), None);
        assert_eq!(Card::Symbolic("".into()).as_number(), None);
        assert_eq!(Card::Numeric(f64::NAN).as_number(), None);
    }

    #[test]
    fn toggle_sets_replaces_and_clears() {
        assert_eq!(toggle(&None, Some(3)), Some(3));
        assert_eq!(toggle(&Some(3), Some(5)), Some(5));
        assert_eq!(toggle(&Some(5), Some(5)), None);
        assert_eq!(toggle::<u32>(&Some(5), None), None);
        assert_eq!(toggle::<u32>(&None, None), None);
    }

    #[test]
    fn numeric_and_symbolic_are_distinct() {
        let current = Some(Card::Numeric(5.0));
        assert_eq!(
            toggle(&current, Some(Card::Symbolic("5".into()))),
            Some(Card::Symbolic("5".into()))
        );
    }

    #[test]
    fn wire_format() {
        let cards: Vec<Option<Card>> = serde_json::from_str(r#"[3, "?", null, 0.5]"#).unwrap();
        assert_eq!(
            cards,
            vec![
                Some(Card::Numeric(3.0)),
                Some(Card::Symbolic("?".into())),
                None,
                Some(Card::Numeric(0.5)),
            ]
        );
        assert_eq!(Card::Numeric(3.0).to_string(), "3");
        assert_eq!(Card::Numeric(0.5).to_string(), "0.5");
    }
}
