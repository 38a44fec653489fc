// A row store kept in a local CSV file, with the same four columns as the spreadsheet.

use std::fs::OpenOptions;
use std::path::Path;

use crate::tracker::io_common::{header_row, rows_from_grid};
use crate::tracker::*;

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: String,
}

impl CsvStore {
    /// Opens the file, creating it with a header row when it does not exist.
    pub fn open(path: &str) -> TrackerResult<CsvStore> {
        if !Path::new(path).exists() {
            info!("CsvStore::open: creating {}", path);
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).context(FileAccessSnafu { path })?;
                }
            }
            let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
            wtr.write_record(header_row())
                .context(CsvWriteSnafu { path })?;
            wtr.flush().context(FileAccessSnafu { path })?;
        }
        Ok(CsvStore {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl RowStore for CsvStore {
    type Error = TrackerError;

    fn read_all(&mut self) -> Result<Vec<SheetRow>, Self::Error> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .context(CsvOpenSnafu { path: &self.path })?;
        let mut grid: Vec<Vec<String>> = Vec::new();
        for (idx, line_r) in rdr.into_records().enumerate() {
            let line = line_r.context(CsvLineParseSnafu { lineno: idx + 1 })?;
            grid.push(line.iter().map(|s| s.to_string()).collect());
        }
        debug!("CsvStore::read_all: {} lines in {}", grid.len(), self.path);
        rows_from_grid(&grid)
    }

    fn append(&mut self, row: &SheetRow) -> Result<(), Self::Error> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .context(FileAccessSnafu { path: &self.path })?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(row.cells())
            .context(CsvWriteSnafu { path: &self.path })?;
        wtr.flush().context(FileAccessSnafu { path: &self.path })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CsvStore {
        let path = dir.path().join("games.csv");
        CsvStore::open(path.to_str().unwrap()).unwrap()
    }

    #[test]
    fn new_file_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Championship Name,Winner,Winner Colour,Date\n");
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let row = SheetRow {
            championship_name: "Club, \"Winter\" Cup".to_string(),
            winner: "User 1".to_string(),
            colour: "White".to_string(),
            date: "2024-01-05".to_string(),
        };
        store.append(&SheetRow::marker("Club, \"Winter\" Cup")).unwrap();
        store.append(&row).unwrap();

        // A second handle sees the same rows.
        let mut other = store_in(&dir);
        assert_eq!(
            other.read_all().unwrap(),
            vec![SheetRow::marker("Club, \"Winter\" Cup"), row]
        );
    }

    #[test]
    fn session_over_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::create(store_in(&dir));
        session.create_championship("Blitz").unwrap();
        session
            .log_match(
                "Blitz",
                Match {
                    winner: "User 2".to_string(),
                    colour: Colour::Black,
                    date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                },
            )
            .unwrap();

        let mut reopened = Session::create(store_in(&dir));
        reopened.hydrate_once().unwrap();
        let c = reopened.select("Blitz").unwrap();
        assert_eq!(c.matches.len(), 1);
        assert_eq!(c.matches[0].colour, Colour::Black);
    }

    #[test]
    fn unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.csv");
        fs::write(&path, "Name,Score\nA,1\n").unwrap();
        let mut store = CsvStore::open(path.to_str().unwrap()).unwrap();
        assert!(matches!(
            store.read_all(),
            Err(TrackerError::MissingHeader { .. })
        ));
    }
}
