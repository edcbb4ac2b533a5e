//! Turns the raw text of the calibration form into validated numeric pairs.
//!
//! Every entry is classified as valid, invalid or empty. Only valid entries
//! contribute a [`ValuePair`], in the order they appear in the form.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

static UNSIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*([.][0-9]*)?$").expect("valid regex literal"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Actual,
    Measured,
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRole::Actual => write!(f, "actual"),
            SlotRole::Measured => write!(f, "measured"),
        }
    }
}

/// One text field of a value set, tagged with the role it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub role: SlotRole,
    pub text: String,
}

impl RawField {
    pub fn new(role: SlotRole, text: impl Into<String>) -> Self {
        RawField {
            role,
            text: text.into(),
        }
    }
}

/// The text fields of one on-screen value set.
///
/// A well-formed entry holds exactly one actual and one measured field, but
/// the UI layer hands over whatever it found so the structure can be checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub fields: Vec<RawField>,
}

impl RawEntry {
    pub fn new(actual: impl Into<String>, measured: impl Into<String>) -> Self {
        RawEntry {
            fields: vec![
                RawField::new(SlotRole::Actual, actual),
                RawField::new(SlotRole::Measured, measured),
            ],
        }
    }

    pub fn empty() -> Self {
        RawEntry::new("", "")
    }

    pub fn from_fields(fields: Vec<RawField>) -> Self {
        RawEntry { fields }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Valid,
    Invalid,
    Empty,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Valid => write!(f, "valid"),
            EntryStatus::Invalid => write!(f, "invalid"),
            EntryStatus::Empty => write!(f, "empty"),
        }
    }
}

/// One validated (actual, measured) temperature reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuePair {
    pub actual: f64,
    pub measured: f64,
}

impl ValuePair {
    pub fn new(actual: f64, measured: f64) -> Self {
        ValuePair { actual, measured }
    }
}

/// Why an entry was classified invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("no {0} field")]
    MissingSlot(SlotRole),
    #[error("more than one {0} field")]
    DuplicateSlot(SlotRole),
    #[error("{role} value '{text}' is not an unsigned decimal")]
    Malformed { role: SlotRole, text: String },
    #[error("{0} value missing")]
    PartiallyFilled(SlotRole),
    #[error("{role} value '{text}' is out of range")]
    OutOfRange { role: SlotRole, text: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub values: Vec<ValuePair>,
    pub statuses: Vec<EntryStatus>,
}

pub fn extract_values(entries: &[RawEntry]) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, entry) in entries.iter().enumerate() {
        let status = match classify_entry(entry) {
            Ok(Some(pair)) => {
                extraction.values.push(pair);
                EntryStatus::Valid
            }
            Ok(None) => EntryStatus::Empty,
            Err(err) => {
                debug!(entry = index, reason = %err, "entry rejected");
                EntryStatus::Invalid
            }
        };

        extraction.statuses.push(status);
    }

    debug!(
        entries = entries.len(),
        values = extraction.values.len(),
        "values extracted"
    );

    extraction
}

/// `Ok(None)` means the entry has not been filled in yet.
pub fn classify_entry(entry: &RawEntry) -> Result<Option<ValuePair>, EntryError> {
    let actual = find_slot(entry, SlotRole::Actual)?;
    let measured = find_slot(entry, SlotRole::Measured)?;

    check_grammar(SlotRole::Actual, actual)?;
    check_grammar(SlotRole::Measured, measured)?;

    match (actual.is_empty(), measured.is_empty()) {
        (true, true) => Ok(None),
        (true, false) => Err(EntryError::PartiallyFilled(SlotRole::Actual)),
        (false, true) => Err(EntryError::PartiallyFilled(SlotRole::Measured)),
        (false, false) => Ok(Some(ValuePair::new(
            parse_value(SlotRole::Actual, actual)?,
            parse_value(SlotRole::Measured, measured)?,
        ))),
    }
}

fn find_slot(entry: &RawEntry, role: SlotRole) -> Result<&str, EntryError> {
    let mut found = None;

    for field in entry.fields.iter().filter(|field| field.role == role) {
        if found.is_some() {
            return Err(EntryError::DuplicateSlot(role));
        }
        found = Some(field.text.as_str());
    }

    found.ok_or(EntryError::MissingSlot(role))
}

fn check_grammar(role: SlotRole, text: &str) -> Result<(), EntryError> {
    if UNSIGNED_DECIMAL.is_match(text) {
        Ok(())
    } else {
        Err(EntryError::Malformed {
            role,
            text: text.to_string(),
        })
    }
}

fn parse_value(role: SlotRole, text: &str) -> Result<f64, EntryError> {
    // a lone point is accepted by the grammar and read as zero
    let normalized = if text == "." { "0" } else { text };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EntryError::OutOfRange {
            role,
            text: text.to_string(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn statuses(entries: &[RawEntry]) -> Vec<EntryStatus> {
        extract_values(entries).statuses
    }

    #[test]
    fn it_accepts_unsigned_decimals() {
        for text in ["12", "12.5", ".5", "5.", "007", "0.000"] {
            assert!(
                matches!(classify_entry(&RawEntry::new(text, "1")), Ok(Some(_))),
                "{text} should be accepted"
            );
        }
    }

    #[test]
    fn it_rejects_signs_exponents_and_separators() {
        for text in ["-5", "+5", "1e3", "1,000", "1.2.3", " 5", "abc", "0x10"] {
            assert!(
                matches!(
                    classify_entry(&RawEntry::new(text, "1")),
                    Err(EntryError::Malformed { .. })
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn it_reads_lone_point_as_zero() {
        let pair = classify_entry(&RawEntry::new(".", "2.5")).unwrap();

        assert_eq!(pair, Some(ValuePair::new(0.0, 2.5)));
    }

    #[test]
    fn it_classifies_blank_entry_as_empty() {
        assert_eq!(classify_entry(&RawEntry::empty()), Ok(None));
        assert_eq!(statuses(&[RawEntry::empty()]), vec![EntryStatus::Empty]);
    }

    #[test]
    fn it_classifies_malformed_measured_as_invalid() {
        let extraction = extract_values(&[RawEntry::new("12", "abc")]);

        assert_eq!(extraction.statuses, vec![EntryStatus::Invalid]);
        assert!(extraction.values.is_empty());
    }

    #[test]
    fn it_classifies_half_filled_entry_as_invalid() {
        assert_eq!(
            classify_entry(&RawEntry::new("12", "")),
            Err(EntryError::PartiallyFilled(SlotRole::Measured))
        );
        assert_eq!(
            classify_entry(&RawEntry::new("", "12")),
            Err(EntryError::PartiallyFilled(SlotRole::Actual))
        );
    }

    #[test]
    fn it_rejects_duplicate_and_missing_slots() {
        let duplicate = RawEntry::from_fields(vec![
            RawField::new(SlotRole::Actual, "1"),
            RawField::new(SlotRole::Measured, "2"),
            RawField::new(SlotRole::Measured, "3"),
        ]);
        let missing = RawEntry::from_fields(vec![RawField::new(SlotRole::Actual, "1")]);

        assert_eq!(
            classify_entry(&duplicate),
            Err(EntryError::DuplicateSlot(SlotRole::Measured))
        );
        assert_eq!(
            classify_entry(&missing),
            Err(EntryError::MissingSlot(SlotRole::Measured))
        );
        assert_eq!(
            statuses(&[duplicate, missing]),
            vec![EntryStatus::Invalid, EntryStatus::Invalid]
        );
    }

    #[test]
    fn it_accepts_fields_in_any_order() {
        let entry = RawEntry::from_fields(vec![
            RawField::new(SlotRole::Measured, "9.5"),
            RawField::new(SlotRole::Actual, "10"),
        ]);

        assert_eq!(classify_entry(&entry), Ok(Some(ValuePair::new(10.0, 9.5))));
    }

    #[test]
    fn it_rejects_values_that_overflow() {
        let huge = "9".repeat(400);

        assert!(matches!(
            classify_entry(&RawEntry::new(huge.as_str(), "1")),
            Err(EntryError::OutOfRange { .. })
        ));
    }

    #[test]
    fn it_keeps_entry_order_and_skips_rejected_entries() {
        let extraction = extract_values(&[
            RawEntry::new("30", "29"),
            RawEntry::empty(),
            RawEntry::new("x", "1"),
            RawEntry::new("10", "9.5"),
        ]);

        assert_eq!(
            extraction.values,
            vec![ValuePair::new(30.0, 29.0), ValuePair::new(10.0, 9.5)]
        );
        assert_eq!(
            extraction.statuses,
            vec![
                EntryStatus::Valid,
                EntryStatus::Empty,
                EntryStatus::Invalid,
                EntryStatus::Valid
            ]
        );
    }
}
