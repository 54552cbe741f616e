// Minimal CSV tokenizer for blip import.
//
// - Fields are separated by ','
// - A '"' at the start of a field opens a quoted section; '""' inside
//   quotes is a literal '"'. Anywhere else '"' is an ordinary character
// - Newlines inside quotes belong to the field
// - Records end at an unquoted '\n' (a trailing '\r' is dropped)
// - Whitespace-only records are skipped
//
// The tokenizer never fails. A quote left open at end of input does not
// swallow later lines: the text from that record on is split at plain
// line breaks instead. Semantic checks happen in `resolve`.

/// One non-blank record with its 1-based row number (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub row: usize,
    pub fields: Vec<String>,
}

/// Split a single record into fields.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(ch),
            }
        } else {
            match ch {
                '"' if field_start => in_quotes = true,
                ',' => {
                    result.push(std::mem::take(&mut current));
                    field_start = true;
                    continue;
                }
                _ => current.push(ch),
            }
        }
        field_start = false;
    }
    result.push(current);
    result
}

fn push_record<'a>(records: &mut Vec<&'a str>, raw: &'a str) {
    records.push(raw.strip_suffix('\r').unwrap_or(raw));
}

/// Split input into raw record strings at unquoted line breaks.
pub fn split_records(input: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut start = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek().map(|&(_, c)| c) == Some('"') => {
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else {
            match ch {
                '"' if field_start => in_quotes = true,
                ',' => {
                    field_start = true;
                    continue;
                }
                '\n' => {
                    push_record(&mut records, &input[start..idx]);
                    start = idx + 1;
                    field_start = true;
                    continue;
                }
                _ => {}
            }
        }
        field_start = false;
    }

    if in_quotes {
        for raw in input[start..].split_terminator('\n') {
            push_record(&mut records, raw);
        }
    } else if start < input.len() {
        push_record(&mut records, &input[start..]);
    }
    records
}

/// Tokenize a whole document, dropping blank records.
pub fn parse_csv(input: &str) -> Vec<Record> {
    split_records(input)
        .into_iter()
        .filter(|raw| !raw.trim().is_empty())
        .enumerate()
        .map(|(i, raw)| Record {
            row: i + 1,
            fields: parse_csv_line(raw),
        })
        .collect()
}

/// Quote a field if it would not survive tokenizing as-is.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
