mod csv;
mod resolve;
mod sample;

pub use csv::{Record, escape_field, parse_csv, parse_csv_line, split_records};
pub use resolve::{ImportError, ImportReport, ImportedBlip, RowError, RowErrorKind, import_blips};
pub use sample::{SAMPLE_HEADER, sample_csv};
