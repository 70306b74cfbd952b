//! Remote company directory: a spreadsheet published as CSV with
//! "Company Name" and "Company Address" columns.

use crate::error::{InvoiceError, Result};
use crate::model::Company;

const NAME_COLUMN: &str = "Company Name";
const ADDRESS_COLUMN: &str = "Company Address";

/// Fetch the directory CSV and parse it into companies.
pub fn fetch_companies(url: &str) -> Result<Vec<Company>> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    parse_companies(&body)
}

/// Parse directory CSV. The header row must contain both expected columns
/// (header cells are trimmed before matching); rows with an empty name are
/// skipped, missing cells read as empty.
pub fn parse_companies(csv: &str) -> Result<Vec<Company>> {
    let records = parse_records(csv);
    let header = records.first().ok_or(InvoiceError::SheetEmpty)?;

    let name_idx = column_index(header, NAME_COLUMN)?;
    let address_idx = column_index(header, ADDRESS_COLUMN)?;

    let companies = records[1..]
        .iter()
        .filter_map(|row| {
            let name = row.get(name_idx).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                return None;
            }
            Some(Company {
                name: name.to_string(),
                address: row.get(address_idx).map(|s| s.trim()).unwrap_or("").to_string(),
            })
        })
        .collect();
    Ok(companies)
}

fn column_index(header: &[String], column: &'static str) -> Result<usize> {
    header
        .iter()
        .position(|cell| cell.trim() == column)
        .ok_or(InvoiceError::SheetColumnMissing(column))
}

/// RFC-4180-style record parsing: quoted fields may contain commas, line
/// breaks and doubled quotes.
fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {} // CRLF: the '\n' closes the record
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_rows() {
        let csv = "Company Name,Company Address\nAcme FZE,Jebel Ali\nTabib Co,Riyadh\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].name, "Acme FZE");
        assert_eq!(companies[1].address, "Riyadh");
    }

    #[test]
    fn header_cells_are_trimmed_before_matching() {
        let csv = " Company Name , Company Address \nAcme FZE,Jebel Ali\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies[0].name, "Acme FZE");
    }

    #[test]
    fn quoted_fields_keep_commas_and_line_breaks() {
        let csv = "Company Name,Company Address\n\"Acme, FZE\",\"P.O. Box 1\nJebel Ali\"\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies[0].name, "Acme, FZE");
        assert_eq!(companies[0].address, "P.O. Box 1\nJebel Ali");
    }

    #[test]
    fn doubled_quotes_unescape() {
        let csv = "Company Name,Company Address\n\"Acme \"\"Global\"\"\",Dubai\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies[0].name, "Acme \"Global\"");
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let csv = "Company Name,Company Address\nAcme FZE\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies[0].address, "");
    }

    #[test]
    fn rows_with_empty_name_are_skipped() {
        let csv = "Company Name,Company Address\n,Nowhere\nAcme FZE,Dubai\n";
        let companies = parse_companies(csv).unwrap();
        assert_eq!(companies.len(), 1);
    }

    #[test]
    fn missing_column_is_a_contract_error() {
        let csv = "Name,Address\nAcme FZE,Dubai\n";
        match parse_companies(csv) {
            Err(InvoiceError::SheetColumnMissing(col)) => assert_eq!(col, "Company Name"),
            other => panic!("expected missing-column error, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_companies(""), Err(InvoiceError::SheetEmpty)));
    }
}
