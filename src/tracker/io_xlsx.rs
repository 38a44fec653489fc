// Reading an Excel export (.xlsx) of a championship sheet.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::Days;

use crate::tracker::io_common::{header_indexes, rows_from_grid};
use crate::tracker::*;

/// Reads the rows of a worksheet, by default the first one.
pub fn read_xlsx_rows(path: &str, worksheet: Option<&str>) -> TrackerResult<Vec<SheetRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(WorksheetNotFoundSnafu { title: name })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?,
    }
    .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let header_cells = iter.next().context(EmptyExcelSnafu { path })?;
    let header: Vec<String> = header_cells
        .iter()
        .map(|c| read_cell(c, false, 1))
        .collect::<TrackerResult<Vec<String>>>()?;
    debug!("read_xlsx_rows: header: {:?}", header);
    let date_col = header_indexes(&header)?[3];

    let mut grid: Vec<Vec<String>> = vec![header];
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let line = row
            .iter()
            .enumerate()
            .map(|(col, c)| read_cell(c, col == date_col, lineno))
            .collect::<TrackerResult<Vec<String>>>()?;
        debug!("read_xlsx_rows: line {}: {:?}", lineno, line);
        grid.push(line);
    }
    rows_from_grid(&grid)
}

/// The text of a cell. Numbers in the date column are Excel day serials.
fn read_cell(cell: &DataType, is_date: bool, lineno: usize) -> TrackerResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        DataType::DateTime(f) | DataType::Float(f) if is_date => serial_to_date(*f, lineno),
        DataType::Int(i) if is_date => serial_to_date(*i as f64, lineno),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        other => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", other),
        }
        .fail(),
    }
}

fn serial_to_date(serial: f64, lineno: usize) -> TrackerResult<String> {
    let wrong = || ExcelWrongCellTypeSnafu {
        lineno,
        content: format!("date serial {}", serial),
    };
    ensure!(serial >= 0.0, wrong());
    // Day 0 of the 1900 date system, accounting for the 1900 leap year bug.
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.checked_add_days(Days::new(serial.floor() as u64)))
        .with_context(wrong)?;
    Ok(date.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(
            read_cell(&DataType::String("User 1".to_string()), false, 2).unwrap(),
            "User 1"
        );
        assert_eq!(read_cell(&DataType::Empty, true, 2).unwrap(), "");
        assert_eq!(read_cell(&DataType::Float(3.0), false, 2).unwrap(), "3");
        assert_eq!(read_cell(&DataType::Int(7), false, 2).unwrap(), "7");
        assert_eq!(
            read_cell(&DataType::String("2024-04-01".to_string()), true, 2).unwrap(),
            "2024-04-01"
        );
    }

    #[test]
    fn date_serials() {
        assert_eq!(
            read_cell(&DataType::DateTime(45383.0), true, 2).unwrap(),
            "2024-04-01"
        );
        assert_eq!(
            read_cell(&DataType::Float(45383.75), true, 2).unwrap(),
            "2024-04-01"
        );
        assert_eq!(read_cell(&DataType::Int(1), true, 2).unwrap(), "1899-12-31");
        assert!(matches!(
            read_cell(&DataType::Float(-1.0), true, 5),
            Err(TrackerError::ExcelWrongCellType { lineno: 5, .. })
        ));
    }

    #[test]
    fn missing_file() {
        let res = read_xlsx_rows("/nonexistent/export.xlsx", None);
        assert!(matches!(res, Err(TrackerError::OpeningExcel { .. })));
    }
}
