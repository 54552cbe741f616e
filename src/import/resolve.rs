// CSV rows -> new blips for one radar.
//
// Header columns are matched case-insensitively. `name`, `quadrant` and
// `ring` are required, `description` and `isNew` optional. Quadrant and
// ring cells are matched against the radar's existing names, trimmed and
// case-insensitive. A bad row is reported and skipped; the rest still import.

use rand::Rng;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, info};

use super::csv::{Record, parse_csv};
use crate::model::{Quadrant, Ring};
use crate::offsets::random_offset;

/// Document-level failures. Nothing is imported when one of these occurs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV must have a header row and at least one data row")]
    NoDataRows,

    #[error("CSV must have columns: name, quadrant, ring. Optional: description, isNew")]
    MissingColumns,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    #[error("missing name")]
    MissingName,

    #[error("unknown quadrant \"{given}\". Valid: {valid}")]
    UnknownQuadrant { given: String, valid: String },

    #[error("unknown ring \"{given}\". Valid: {valid}")]
    UnknownRing { given: String, valid: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based, header is row 1
    pub row: usize,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub kind: RowErrorKind,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.kind)
    }
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

/// A blip ready to be stored. Ids are assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedBlip {
    pub name: String,
    pub description: Option<String>,
    pub is_new: bool,
    pub quadrant_id: String,
    pub ring_id: String,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub blips: Vec<ImportedBlip>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.blips.len()
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return format!("Imported {} blip(s)", self.imported());
        }
        let lines: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        format!(
            "Imported {} blip(s) with {} error(s):\n{}",
            self.imported(),
            self.errors.len(),
            lines.join("\n")
        )
    }
}

struct Columns {
    name: usize,
    quadrant: usize,
    ring: usize,
    description: Option<usize>,
    is_new: Option<usize>,
}

impl Columns {
    // The header goes through the same quote-aware tokenizer as data rows,
    // so a quoted column name still matches. Plain headers split identically.
    fn from_header(header: &Record) -> Result<Self, ImportError> {
        let names: Vec<String> = header.fields.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |col: &str| names.iter().position(|n| n == col);

        match (find("name"), find("quadrant"), find("ring")) {
            (Some(name), Some(quadrant), Some(ring)) => Ok(Self {
                name,
                quadrant,
                ring,
                description: find("description"),
                is_new: find("isnew"),
            }),
            _ => Err(ImportError::MissingColumns),
        }
    }
}

/// Lower-cased, trimmed name -> id, in the radar's order.
struct NameIndex<'a> {
    entries: Vec<(String, &'a str)>,
}

impl<'a> NameIndex<'a> {
    fn new(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs.map(|(name, id)| (name.trim().to_lowercase(), id)).collect(),
        }
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        let key = name.trim().to_lowercase();
        self.entries.iter().find(|(n, _)| *n == key).map(|(_, id)| *id)
    }

    fn valid_names(&self) -> String {
        self.entries.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>().join(", ")
    }
}

fn cell(record: &Record, idx: usize) -> &str {
    record.fields.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn parse_is_new(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1")
}

/// Turn CSV text into blips for a radar with the given quadrants and rings.
///
/// Each accepted row gets a fresh offset from `rng`.
pub fn import_blips<R: Rng + ?Sized>(
    csv: &str,
    quadrants: &[Quadrant],
    rings: &[Ring],
    rng: &mut R,
) -> Result<ImportReport, ImportError> {
    let records = parse_csv(csv);
    if records.len() < 2 {
        return Err(ImportError::NoDataRows);
    }
    let columns = Columns::from_header(&records[0])?;

    let quadrant_index = NameIndex::new(quadrants.iter().map(|q| (q.name.as_str(), q.id.as_str())));
    let ring_index = NameIndex::new(rings.iter().map(|r| (r.name.as_str(), r.id.as_str())));

    let mut report = ImportReport::default();
    for record in &records[1..] {
        match resolve_row(record, &columns, &quadrant_index, &ring_index) {
            Ok((name, description, is_new, quadrant_id, ring_id)) => {
                let offset = random_offset(rng);
                report.blips.push(ImportedBlip {
                    name,
                    description,
                    is_new,
                    quadrant_id: quadrant_id.to_string(),
                    ring_id: ring_id.to_string(),
                    offset_x: offset.x,
                    offset_y: offset.y,
                });
            }
            Err(kind) => {
                debug!(row = record.row, error = %kind, "skipping csv row");
                report.errors.push(RowError { row: record.row, kind });
            }
        }
    }

    info!(
        imported = report.imported(),
        errors = report.errors.len(),
        "csv import finished"
    );
    Ok(report)
}

type ResolvedRow<'a> = (String, Option<String>, bool, &'a str, &'a str);

fn resolve_row<'a>(
    record: &Record,
    columns: &Columns,
    quadrants: &NameIndex<'a>,
    rings: &NameIndex<'a>,
) -> Result<ResolvedRow<'a>, RowErrorKind> {
    let name = cell(record, columns.name);
    if name.is_empty() {
        return Err(RowErrorKind::MissingName);
    }

    let quadrant_name = cell(record, columns.quadrant);
    let quadrant_id = quadrants.get(quadrant_name).ok_or_else(|| RowErrorKind::UnknownQuadrant {
        given: quadrant_name.to_string(),
        valid: quadrants.valid_names(),
    })?;

    let ring_name = cell(record, columns.ring);
    let ring_id = rings.get(ring_name).ok_or_else(|| RowErrorKind::UnknownRing {
        given: ring_name.to_string(),
        valid: rings.valid_names(),
    })?;

    let description = columns
        .description
        .map(|idx| cell(record, idx))
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let is_new = columns.is_new.is_none_or(|idx| parse_is_new(cell(record, idx)));

    Ok((name.to_string(), description, is_new, quadrant_id, ring_id))
}
