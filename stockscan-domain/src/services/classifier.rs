//! Barcode classifier.
//!
//! Recognizes the two dialects printed on inbound stock:
//!
//! - part/category codes such as `49560-L3010`,
//! - bracketed labels that open with `[` and close with `*EOT`, carrying the
//!   `P` (part), `7Q` (quantity) and `3S` (tag) data identifiers.
//!
//! Refusals are returned as [`ScanRejection`] values so that every input
//! channel can branch on them the same way.

use std::sync::OnceLock;

use regex::Regex;

use crate::entities::{BracketedLabel, LabelField, ParsedBarcode, PartCategoryCode, ScanRejection};

const LABEL_PREFIX: &str = "[";
const LABEL_SUFFIX: &str = "*EOT";

fn part_category_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{5})-([A-Z][0-9]{4})$").expect("part/category pattern compiles")
    })
}

/// Strips every whitespace character. ASCII information separators (GS, RS)
/// are not whitespace and survive, so they still delimit label elements.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Classifies raw scanner text. Part/category codes are tried first since
/// that pattern is strict; anything else must be a bracketed label.
pub fn classify(raw: &str) -> Result<ParsedBarcode, ScanRejection> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(ScanRejection::Unrecognized);
    }
    if let Some(code) = parse_part_category(&normalized) {
        return Ok(ParsedBarcode::PartCategory(code));
    }
    parse_bracketed(&normalized).map(ParsedBarcode::Bracketed)
}

pub fn parse_part_category(normalized: &str) -> Option<PartCategoryCode> {
    let captures = part_category_pattern().captures(normalized)?;
    Some(PartCategoryCode {
        part_number: captures[1].to_string(),
        category: captures[2].to_string(),
        full_code: normalized.to_string(),
    })
}

pub fn parse_bracketed(normalized: &str) -> Result<BracketedLabel, ScanRejection> {
    if !normalized.starts_with(LABEL_PREFIX) || !normalized.ends_with(LABEL_SUFFIX) {
        return Err(ScanRejection::InvalidFormat);
    }
    let body = &normalized[LABEL_PREFIX.len()..normalized.len() - LABEL_SUFFIX.len()];
    let fields = LabelFields::extract(body);

    match (fields.part, fields.quantity, fields.tag) {
        (Some(part), Some(quantity), Some(tag)) => Ok(BracketedLabel {
            part,
            quantity,
            tag,
            raw: normalized.to_string(),
        }),
        (part, quantity, tag) => {
            let mut missing = Vec::new();
            if part.is_none() {
                missing.push(LabelField::Part);
            }
            if quantity.is_none() {
                missing.push(LabelField::Quantity);
            }
            if tag.is_none() {
                missing.push(LabelField::Tag);
            }
            Err(ScanRejection::MissingFields { missing })
        }
    }
}

#[derive(Debug, Default)]
struct LabelFields {
    part: Option<String>,
    quantity: Option<i64>,
    tag: Option<String>,
}

impl LabelFields {
    /// Splits the label body into segments on any non-alphanumeric
    /// delimiter. Each segment that opens with a data identifier carries that
    /// element. Identifiers that never open a segment are also searched for
    /// inside other values, which recovers labels whose separators were
    /// spaces and got stripped (`PABC7Q123SXYZ`). First occurrence wins.
    fn extract(body: &str) -> Self {
        let segments: Vec<&str> = body
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|segment| !segment.is_empty())
            .collect();
        let embedded: Vec<LabelField> = [LabelField::Quantity, LabelField::Tag]
            .into_iter()
            .filter(|field| {
                !segments
                    .iter()
                    .any(|segment| leading_field(segment) == Some(*field))
            })
            .collect();

        let mut fields = Self::default();
        for segment in &segments {
            let mut rest = *segment;
            while let Some(field) = leading_field(rest) {
                rest = fields.read(field, &rest[field.identifier().len()..], &embedded);
            }
        }

        // Identifiers behind other text in a segment, e.g. a `[)>06` envelope
        // header whose separators were stripped.
        for field in LabelField::ALL {
            if fields.has(field) {
                continue;
            }
            let found = segments.iter().find_map(|segment| {
                embedded_marker(segment, field).map(|index| (*segment, index))
            });
            if let Some((segment, index)) = found {
                fields.read(field, &segment[index + field.identifier().len()..], &embedded);
            }
        }
        fields
    }

    /// Records the value right after an identifier and returns what follows it.
    fn read<'a>(&mut self, field: LabelField, value_start: &'a str, embedded: &[LabelField]) -> &'a str {
        let stops: Vec<LabelField> = embedded.iter().copied().filter(|stop| *stop != field).collect();
        let end = next_marker(value_start, &stops).unwrap_or(value_start.len());
        let value = &value_start[..end];
        match field {
            LabelField::Quantity => {
                let digits = value
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(value.len());
                self.record_quantity(&value[..digits]);
                &value_start[digits..]
            }
            LabelField::Part | LabelField::Tag => {
                self.record_text(field, value);
                &value_start[end..]
            }
        }
    }

    fn has(&self, field: LabelField) -> bool {
        match field {
            LabelField::Part => self.part.is_some(),
            LabelField::Quantity => self.quantity.is_some(),
            LabelField::Tag => self.tag.is_some(),
        }
    }

    fn record_text(&mut self, field: LabelField, value: &str) {
        if value.is_empty() {
            return;
        }
        let slot = match field {
            LabelField::Part => &mut self.part,
            LabelField::Tag => &mut self.tag,
            LabelField::Quantity => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    // Zero and unparsable quantities count as absent.
    fn record_quantity(&mut self, digits: &str) {
        if self.quantity.is_some() {
            return;
        }
        self.quantity = digits.parse::<i64>().ok().filter(|quantity| *quantity > 0);
    }
}

fn leading_field(segment: &str) -> Option<LabelField> {
    if segment.starts_with("7Q") {
        Some(LabelField::Quantity)
    } else if segment.starts_with("3S") {
        Some(LabelField::Tag)
    } else if segment.starts_with('P') {
        Some(LabelField::Part)
    } else {
        None
    }
}

/// First place `field`'s identifier appears with a value behind it.
fn embedded_marker(segment: &str, field: LabelField) -> Option<usize> {
    let identifier = field.identifier();
    segment
        .match_indices(identifier)
        .map(|(index, _)| index)
        .find(|index| {
            let value = &segment[index + identifier.len()..];
            match field {
                LabelField::Quantity => value.starts_with(|c: char| c.is_ascii_digit()),
                LabelField::Part | LabelField::Tag => !value.is_empty(),
            }
        })
}

fn next_marker(value: &str, stops: &[LabelField]) -> Option<usize> {
    stops
        .iter()
        .filter_map(|field| marker_position(value, *field))
        .min()
}

fn marker_position(value: &str, field: LabelField) -> Option<usize> {
    match field {
        LabelField::Quantity => value
            .match_indices("7Q")
            .map(|(index, _)| index)
            .find(|index| value[index + 2..].starts_with(|c: char| c.is_ascii_digit())),
        LabelField::Tag => value.find("3S"),
        LabelField::Part => None,
    }
}
