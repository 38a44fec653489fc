use crate::tracker::*;

/// Maps a table read from a store (header row first) to rows.
///
/// The columns are found by their header, so extra columns and a different
/// column order are accepted. Lines where every expected cell is empty are dropped.
pub fn rows_from_grid(grid: &[Vec<String>]) -> TrackerResult<Vec<SheetRow>> {
    let header = match grid.first() {
        Some(h) => h,
        None => return Ok(Vec::new()),
    };
    let cols = header_indexes(header)?;
    debug!("rows_from_grid: header: {:?} columns: {:?}", header, cols);

    let mut res: Vec<SheetRow> = Vec::new();
    for (idx, line) in grid.iter().enumerate().skip(1) {
        let cell = |col: usize| -> String {
            line.get(cols[col])
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let row = SheetRow {
            championship_name: cell(0),
            winner: cell(1),
            colour: cell(2),
            date: cell(3),
        };
        if row == SheetRow::default() {
            debug!("rows_from_grid: line {}: empty, skipping", idx + 1);
            continue;
        }
        res.push(row);
    }
    Ok(res)
}

/// Position of each of the expected headers, in the order of HEADERS.
pub fn header_indexes(header: &[String]) -> TrackerResult<[usize; 4]> {
    let mut cols = [0; 4];
    for (i, name) in HEADERS.iter().enumerate() {
        cols[i] = header
            .iter()
            .position(|h| h.trim() == *name)
            .context(MissingHeaderSnafu {
                header: *name,
                found: header.join(", "),
            })?;
    }
    Ok(cols)
}

pub fn header_row() -> Vec<String> {
    HEADERS.iter().map(|s| s.to_string()).collect()
}

/// Flattens a cell returned by the sheets API.
pub fn json_cell_to_string(v: &JSValue) -> String {
    match v {
        JSValue::String(s) => s.clone(),
        JSValue::Null => String::new(),
        x => x.to_string(),
    }
}

pub fn parse_colour(s: &str) -> TrackerResult<Colour> {
    s.parse::<Colour>().context(InvalidColourSnafu {})
}

/// Parses a date typed by the user, today when not provided.
pub fn parse_user_date(s: Option<&str>, today: NaiveDate) -> TrackerResult<NaiveDate> {
    match s {
        None => Ok(today),
        Some(x) if x.trim().eq_ignore_ascii_case("today") => Ok(today),
        Some(x) => parse_date(x).context(InvalidDateSnafu { value: x }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_grid() {
        assert!(rows_from_grid(&[]).unwrap().is_empty());
        let g = grid(&[&["Championship Name", "Winner", "Winner Colour", "Date"]]);
        assert!(rows_from_grid(&g).unwrap().is_empty());
    }

    #[test]
    fn short_lines_are_padded() {
        let g = grid(&[
            &["Championship Name", "Winner", "Winner Colour", "Date"],
            &["Spring Open"],
            &["Spring Open", "Alice", "White", "2024-04-01"],
            &[],
            &["", "", "", ""],
        ]);
        let rows = rows_from_grid(&g).unwrap();
        assert_eq!(rows, vec![
            SheetRow::marker("Spring Open"),
            SheetRow {
                championship_name: "Spring Open".to_string(),
                winner: "Alice".to_string(),
                colour: "White".to_string(),
                date: "2024-04-01".to_string(),
            },
        ]);
    }

    #[test]
    fn columns_are_found_by_header() {
        let g = grid(&[
            &["Date", "Notes", "Winner", "Championship Name", "Winner Colour"],
            &["2024-04-01", "long game", "Bob", "Club Cup", "Black"],
        ]);
        let rows = rows_from_grid(&g).unwrap();
        assert_eq!(rows[0].cells(), [
            "Club Cup".to_string(),
            "Bob".to_string(),
            "Black".to_string(),
            "2024-04-01".to_string()
        ]);
    }

    #[test]
    fn missing_header() {
        let g = grid(&[&["Championship Name", "Winner", "Date"]]);
        let res = rows_from_grid(&g);
        assert!(matches!(
            res,
            Err(TrackerError::MissingHeader { ref header, .. }) if header == "Winner Colour"
        ));
    }

    #[test]
    fn json_cells() {
        assert_eq!(json_cell_to_string(&json!("Alice")), "Alice");
        assert_eq!(json_cell_to_string(&json!(2024)), "2024");
        assert_eq!(json_cell_to_string(&JSValue::Null), "");
    }

    #[test]
    fn user_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(parse_user_date(None, today).unwrap(), today);
        assert_eq!(parse_user_date(Some("today"), today).unwrap(), today);
        assert_eq!(
            parse_user_date(Some("2023-12-31"), today).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert!(matches!(
            parse_user_date(Some("2023-13-01"), today),
            Err(TrackerError::InvalidDate { .. })
        ));
        assert_eq!(parse_colour("Black").unwrap(), Colour::Black);
        assert!(parse_colour("grey").is_err());
    }
}
