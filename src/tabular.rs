//! Spreadsheet conversions between XLSX and CSV.

use crate::Result;
use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, WriterBuilder};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Writes the first worksheet as CSV, one record per row, from A1 to the end
/// of its used range.
pub fn xlsx_to_csv(input: &Path, output: &Path) -> Result<()> {
    let mut workbook = open_workbook_auto(input)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| calamine::Error::Msg("Workbook has no worksheets"))?;
    let range = workbook.worksheet_range(&sheet)?;
    log::debug!(
        "exporting sheet '{}' ({} rows x {} columns)",
        sheet,
        range.height(),
        range.width()
    );

    // The used range may not start at A1; pad so cells keep their position.
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let width = first_col as usize + range.width();
    let mut writer = WriterBuilder::new().flexible(true).from_path(output)?;
    for _ in 0..first_row {
        writer.write_record(std::iter::repeat("").take(width))?;
    }
    for row in range.rows() {
        let leading = std::iter::repeat(String::new()).take(first_col as usize);
        writer.write_record(leading.chain(row.iter().map(cell_text)))?;
    }
    writer.flush()?;
    Ok(())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Integral values print without a fractional part.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Writes every CSV record into the first worksheet of a new workbook.
/// Numeric and boolean fields keep their type; empty fields leave the cell
/// blank.
pub fn csv_to_xlsx(input: &Path, output: &Path) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let mut rows = 0u32;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let row = row as u32;
        for (col, field) in record.iter().enumerate() {
            let col = col as u16;
            match classify(field) {
                Field::Empty => {}
                Field::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                Field::Bool(b) => {
                    worksheet.write_boolean(row, col, b)?;
                }
                Field::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
        }
        rows += 1;
    }

    log::debug!("writing {} rows to {}", rows, output.display());
    workbook.save(output)?;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Field<'a> {
    Empty,
    Number(f64),
    Bool(bool),
    Text(&'a str),
}

fn classify(field: &str) -> Field<'_> {
    if field.is_empty() {
        return Field::Empty;
    }
    match field {
        "true" => return Field::Bool(true),
        "false" => return Field::Bool(false),
        _ => {}
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Field::Number(n),
        _ => Field::Text(field),
    }
}
