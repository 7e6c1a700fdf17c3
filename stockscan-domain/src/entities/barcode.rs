// Barcode entities
// Parsed forms of the two accepted grammars and the ways a scan is refused

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value_objects::LookupKey;

/// `NNNNN-XNNNN`: part number, hyphen, category letter and four digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartCategoryCode {
    pub part_number: String,
    pub category: String,
    pub full_code: String,
}

/// Bracketed label carrying `P`, `7Q` and `3S` data identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketedLabel {
    pub part: String,
    pub quantity: i64,
    pub tag: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grammar", rename_all = "snake_case")]
pub enum ParsedBarcode {
    PartCategory(PartCategoryCode),
    Bracketed(BracketedLabel),
}

impl ParsedBarcode {
    pub fn lookup_key(&self) -> LookupKey {
        match self {
            ParsedBarcode::PartCategory(code) => LookupKey::raw_data(code.full_code.clone()),
            ParsedBarcode::Bracketed(label) => LookupKey::tag_number(label.tag.clone()),
        }
    }

    pub fn raw_data(&self) -> &str {
        match self {
            ParsedBarcode::PartCategory(code) => &code.full_code,
            ParsedBarcode::Bracketed(label) => &label.raw,
        }
    }

    pub fn part_number(&self) -> &str {
        match self {
            ParsedBarcode::PartCategory(code) => &code.part_number,
            ParsedBarcode::Bracketed(label) => &label.part,
        }
    }
}

/// Data identifiers a bracketed label must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelField {
    #[serde(rename = "P")]
    Part,
    #[serde(rename = "7Q")]
    Quantity,
    #[serde(rename = "3S")]
    Tag,
}

impl LabelField {
    pub const ALL: [LabelField; 3] = [LabelField::Part, LabelField::Quantity, LabelField::Tag];

    pub fn identifier(&self) -> &'static str {
        match self {
            LabelField::Part => "P",
            LabelField::Quantity => "7Q",
            LabelField::Tag => "3S",
        }
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanRejection {
    #[error("nothing to scan")]
    Unrecognized,
    #[error("invalid barcode format: expected NNNNN-XNNNN or a label of the form [ ... *EOT")]
    InvalidFormat,
    #[error(
        "required label elements missing: {} (a label needs P, 7Q and 3S)",
        join_fields(.missing)
    )]
    MissingFields { missing: Vec<LabelField> },
}

impl ScanRejection {
    pub fn reason_code(&self) -> &'static str {
        match self {
            ScanRejection::Unrecognized => "unrecognized",
            ScanRejection::InvalidFormat => "invalid_format",
            ScanRejection::MissingFields { .. } => "missing_fields",
        }
    }
}

fn join_fields(fields: &[LabelField]) -> String {
    fields
        .iter()
        .map(LabelField::identifier)
        .collect::<Vec<_>>()
        .join(", ")
}
