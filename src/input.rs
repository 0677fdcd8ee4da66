//! Form input admission and parsing.
//!
//! Text typed into the form fields goes through two layers. The first is a
//! per-keystroke admission filter: each inserted fragment must look numeric
//! on its own, or the edit is reverted. The second is submit-time parsing,
//! which turns the accumulated field texts into a checked
//! [`FilterSpec`]. Only the second layer guarantees well-formed numbers; the
//! keystroke filter cannot, since it never sees the whole field value (a
//! field can accumulate several decimal points, for example).

use crate::{
    error::{Error, Result},
    spec::FilterSpec,
};
use std::fmt;

/// Identifier of a form field.
///
/// Used to name fields in diagnostics and errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    /// Sampling rate in Hz.
    SampleRate,
    /// Cutoff frequency in Hz.
    Cutoff,
    /// Transition width in Hz.
    TransitionWidth,
    /// Number of filter taps.
    Taps,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::SampleRate => "sampling rate",
            Field::Cutoff => "cutoff frequency",
            Field::TransitionWidth => "transition width",
            Field::Taps => "number of taps",
        })
    }
}

/// Returns true if a fragment may be inserted into a numeric field.
///
/// A fragment is admissible when it consists entirely of ASCII digits, or
/// entirely of decimal points. The match is anchored: fragments such as
/// `"1e5"` or `"1a"` are rejected even though they start with a digit.
pub fn fragment_is_numeric(fragment: &str) -> bool {
    !fragment.is_empty()
        && (fragment.chars().all(|c| c.is_ascii_digit()) || fragment.chars().all(|c| c == '.'))
}

/// Returns the fragment inserted by an edit that turned `before` into
/// `after`.
///
/// Returns `None` when the edit is not a pure insertion (a deletion, a
/// replacement, or no change at all). Such edits are not the concern of the
/// keystroke filter and are always admitted.
pub fn inserted_fragment<'a>(before: &str, after: &'a str) -> Option<&'a str> {
    if after.len() <= before.len() {
        return None;
    }
    // longest common prefix, in bytes, on char boundaries
    let prefix = before
        .char_indices()
        .zip(after.chars())
        .find(|&((_, b), a)| b != a)
        .map(|((i, _), _)| i)
        .unwrap_or(before.len());
    // longest common suffix of what remains
    let suffix: usize = before[prefix..]
        .chars()
        .rev()
        .zip(after[prefix..].chars().rev())
        .take_while(|(b, a)| b == a)
        .map(|(b, _)| b.len_utf8())
        .sum();
    if prefix + suffix != before.len() {
        return None;
    }
    Some(&after[prefix..after.len() - suffix])
}

/// Parses the four form fields into a [`FilterSpec`].
///
/// Every parse failure maps to an explicit error naming the field, so the
/// caller can show it to the user instead of crashing on malformed input.
pub fn parse_spec(
    sample_rate: &str,
    cutoff: &str,
    transition_width: &str,
    num_taps: &str,
) -> Result<FilterSpec> {
    let sample_rate = parse_f64(Field::SampleRate, sample_rate)?;
    let cutoff = parse_f64(Field::Cutoff, cutoff)?;
    let transition_width = parse_f64(Field::TransitionWidth, transition_width)?;
    let num_taps = parse_usize(Field::Taps, num_taps)?;
    FilterSpec::new(sample_rate, cutoff, transition_width, num_taps)
}

fn parse_f64(field: Field, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_usize(field: Field, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digit_and_dot_fragments_admitted() {
        for fragment in ["0", "7", "123", "0005", ".", "..."] {
            assert!(fragment_is_numeric(fragment), "{fragment:?}");
        }
    }

    #[test]
    fn other_fragments_rejected() {
        for fragment in ["", "a", "-", "+", "1e5", "1a", "1.5", " ", "1 "] {
            assert!(!fragment_is_numeric(fragment), "{fragment:?}");
        }
    }

    #[test]
    fn insertion_detection() {
        assert_eq!(inserted_fragment("12", "123"), Some("3"));
        assert_eq!(inserted_fragment("12", "1.2"), Some("."));
        assert_eq!(inserted_fragment("", "8"), Some("8"));
        assert_eq!(inserted_fragment("22", "222"), Some("2"));
        assert_eq!(inserted_fragment("80", "8a0"), Some("a"));
        // deletions and replacements are not insertions
        assert_eq!(inserted_fragment("123", "12"), None);
        assert_eq!(inserted_fragment("12", "13"), None);
        assert_eq!(inserted_fragment("12", "34"), None);
        assert_eq!(inserted_fragment("12", "12"), None);
    }

    #[test]
    fn parse_reports_offending_field() {
        assert!(parse_spec("8000", "1000", "200", "31").is_ok());
        assert!(parse_spec("8000.", "1000.5", "200", "31").is_ok());
        assert!(matches!(
            parse_spec("", "1000", "200", "31"),
            Err(Error::InvalidNumber {
                field: Field::SampleRate,
                ..
            })
        ));
        assert!(matches!(
            parse_spec("8000", "1..5", "200", "31"),
            Err(Error::InvalidNumber {
                field: Field::Cutoff,
                ..
            })
        ));
        assert!(matches!(
            parse_spec("8000", "1000", "200", "31.5"),
            Err(Error::InvalidNumber {
                field: Field::Taps,
                ..
            })
        ));
    }
}
