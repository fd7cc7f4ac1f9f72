//! Workbook reading through calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use super::{Cell, Sheet};
use crate::error::DocumentError;

/// Read the first worksheet of a workbook.
///
/// Saved workbooks list the active sheet first in the overwhelming majority
/// of vendor exports, so the first sheet stands in for the active one.
pub fn read_first_worksheet(path: &Path) -> Result<Sheet, DocumentError> {
    let filename = path.display().to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DocumentError::Open(format!("{e}: {filename}")))?;

    let sheet_names = workbook.sheet_names();
    debug!("Workbook {} has sheets {:?}", filename, sheet_names);

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DocumentError::NoWorksheet)?
        .map_err(|e| DocumentError::Open(format!("failed to read sheet: {e}: {filename}")))?;

    Ok(sheet_from_range(&range))
}

/// Convert a calamine range into an absolute-positioned sheet.
///
/// calamine ranges start at the first used cell; the offset is restored so
/// that row 1 / column 1 of the sheet are row 1 / column A of the worksheet.
pub fn sheet_from_range(range: &Range<Data>) -> Sheet {
    let Some((row0, col0)) = range.start() else {
        return Sheet::default();
    };
    let (row0, col0) = (row0 as usize, col0 as usize);
    let (height, width) = range.get_size();

    let mut rows = vec![vec![Cell::Empty; col0 + width]; row0 + height];
    for (r, c, data) in range.used_cells() {
        rows[row0 + r][col0 + c] = cell_from_data(data);
    }

    trace!("Range {}x{} starting at ({}, {})", height, width, row0, col0);
    Sheet::new(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if !dt.is_duration() => excel_serial_to_datetime(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::from_text(s)),
        Data::DurationIso(s) => Cell::from_text(s),
        Data::Error(_) => Cell::Empty,
    }
}

/// Convert a 1900-system Excel serial to a timestamp.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.floor() as i64;
    let secs = ((serial - serial.floor()) * 86_400.0).round() as i64;

    // Serials from 61 on count from 1899-12-30 because Excel keeps the
    // non-existent 1900-02-29 as serial 60.
    let epoch = if days >= 61 {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    };

    let midnight = epoch.checked_add_signed(Duration::try_days(days)?)?.and_hms_opt(0, 0, 0)?;
    midnight.checked_add_signed(Duration::try_seconds(secs)?)
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_excel_serial_conversion() {
        let dt = excel_serial_to_datetime(45952.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 10, 22).unwrap());

        let dt = excel_serial_to_datetime(1.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());

        let dt = excel_serial_to_datetime(45952.5).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "12:00");
    }

    #[test]
    fn test_out_of_range_serial_falls_back_to_number() {
        assert_eq!(excel_serial_to_datetime(1.0e15), None);
        assert_eq!(excel_serial_to_datetime(f64::MAX), None);

        let mut range: Range<Data> = Range::new((0, 0), (0, 0));
        range.set_value(
            (0, 0),
            Data::DateTime(ExcelDateTime::new(1.0e15, ExcelDateTimeType::DateTime, false)),
        );

        let sheet = sheet_from_range(&range);
        assert_eq!(sheet.raw(1, 1), Some(&Cell::Number(1.0e15)));
    }

    #[test]
    fn test_range_offset_is_preserved() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Sr No".to_string()));
        range.set_value((3, 2), Data::Float(381.0));

        let sheet = sheet_from_range(&range);
        assert_eq!(sheet.max_row(), 4);
        assert_eq!(sheet.max_column(), 3);
        assert_eq!(sheet.value(3, 2), "Sr No");
        assert_eq!(sheet.value(4, 3), "381");
        assert_eq!(sheet.value(1, 1), "");
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2025-10-22".to_string())).text(),
            "22-10-2025"
        );
    }

    #[test]
    fn test_missing_workbook_is_open_error() {
        let err = read_first_worksheet(Path::new("/nonexistent/pi.xlsx")).unwrap_err();
        assert!(matches!(err, DocumentError::Open(_)));
    }
}
