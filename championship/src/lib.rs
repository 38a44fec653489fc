/*!
In-memory model of chess championships.

The model mirrors an append-only row store (a spreadsheet in practice): every
row names a championship and, optionally, the winner of one match. A
[`Collection`] groups these rows by championship and answers win statistics.

```
use championship::*;
use chrono::NaiveDate;

let mut store: Vec<SheetRow> = Vec::new();
let mut coll = Collection::new();
coll.hydrate(&store.read_all()?);

coll.create_championship(&mut store, "Spring Open")?;
let m = Match {
    winner: "Alice".to_string(),
    colour: Colour::White,
    date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
};
coll.log_match(&mut store, "Spring Open", m)?;

assert_eq!(store.len(), 2);
assert_eq!(tally(coll.all_matches()), vec![("Alice".to_string(), 1)]);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
mod config;
pub mod manual;
pub mod session;

use log::{debug, info, warn};

use std::collections::HashMap;

use chrono::NaiveDate;

pub use crate::config::*;
pub use crate::session::Session;

/// Date formats accepted when reading rows back from the store.
const READ_DATE_FORMATS: [&str; 3] = [DATE_FORMAT, "%Y/%m/%d", "%d/%m/%Y"];

/// Parses a date as written in the store.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    READ_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// All the championships of a session, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    championships: Vec<Championship>,
    hydrated: bool,
}

impl Collection {
    pub fn new() -> Collection {
        Collection::default()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Loads the content of the store.
    ///
    /// Only the first call reads the rows. Rows with an empty winner only create
    /// their championship. Rows that cannot be understood are skipped and listed
    /// in the report.
    pub fn hydrate(&mut self, rows: &[SheetRow]) -> HydrateOutcome {
        if self.hydrated {
            debug!("hydrate: collection already hydrated, ignoring {} rows", rows.len());
            return HydrateOutcome::AlreadyHydrated;
        }
        self.hydrated = true;

        let mut report = HydrateReport {
            rows_read: rows.len(),
            ..HydrateReport::default()
        };
        for (idx, row) in rows.iter().enumerate() {
            let name = row.championship_name.trim();
            if name.is_empty() {
                warn!("hydrate: row {}: no championship name, skipping {:?}", idx, row);
                report.skipped.push((idx, "missing championship name".to_string()));
                continue;
            }
            let cidx = match self.position(name) {
                Some(cidx) => cidx,
                None => {
                    self.championships.push(Championship::new(name));
                    self.championships.len() - 1
                }
            };
            if row.is_marker() {
                continue;
            }
            match match_from_row(row) {
                Ok(m) => {
                    debug!("hydrate: row {}: {} <- {:?}", idx, name, m);
                    self.championships[cidx].matches.push(m);
                    report.matches += 1;
                }
                Err(reason) => {
                    warn!("hydrate: row {}: {}, skipping {:?}", idx, reason, row);
                    report.skipped.push((idx, reason));
                }
            }
        }
        report.championships = self.championships.len();
        info!(
            "hydrate: {} rows, {} championships, {} matches, {} skipped",
            report.rows_read,
            report.championships,
            report.matches,
            report.skipped.len()
        );
        HydrateOutcome::Loaded(report)
    }

    /// Creates an empty championship.
    ///
    /// The marker row is appended to the store first; the championship only
    /// exists in the collection once the store accepted it. The collection must
    /// have been hydrated, otherwise the new row would be read a second time.
    pub fn create_championship<S: RowStore>(
        &mut self,
        store: &mut S,
        name: &str,
    ) -> Result<&Championship, ModelError> {
        if !self.hydrated {
            return Err(ModelError::NotHydrated);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.position(name).is_some() {
            return Err(ModelError::DuplicateChampionship(name.to_string()));
        }
        store
            .append(&SheetRow::marker(name))
            .map_err(|e| ModelError::StoreWrite(Box::new(e)))?;
        info!("create_championship: {}", name);
        self.championships.push(Championship::new(name));
        Ok(&self.championships[self.championships.len() - 1])
    }

    /// Records the result of a match in an existing championship.
    ///
    /// The winner is stored trimmed, as it is read back by `hydrate`.
    pub fn log_match<S: RowStore>(
        &mut self,
        store: &mut S,
        championship_name: &str,
        m: Match,
    ) -> Result<&Championship, ModelError> {
        if !self.hydrated {
            return Err(ModelError::NotHydrated);
        }
        let m = Match {
            winner: m.winner.trim().to_string(),
            ..m
        };
        // An empty winner would be read back as a championship marker.
        if m.winner.is_empty() {
            return Err(ModelError::EmptyWinner);
        }
        let cidx = self
            .position(championship_name.trim())
            .ok_or_else(|| ModelError::NotFound(championship_name.to_string()))?;
        let row = SheetRow::from_match(&self.championships[cidx].name, &m);
        store
            .append(&row)
            .map_err(|e| ModelError::StoreWrite(Box::new(e)))?;
        info!("log_match: {} <- {:?}", row.championship_name, m);
        let champ = &mut self.championships[cidx];
        champ.matches.push(m);
        Ok(champ)
    }

    pub fn select(&self, championship_name: &str) -> Result<&Championship, ModelError> {
        self.position(championship_name.trim())
            .map(|cidx| &self.championships[cidx])
            .ok_or_else(|| ModelError::NotFound(championship_name.to_string()))
    }

    /// Every match of every championship, championship after championship.
    pub fn all_matches(&self) -> Vec<&Match> {
        self.championships
            .iter()
            .flat_map(|c| c.matches.iter())
            .collect()
    }

    pub fn championships(&self) -> &[Championship] {
        &self.championships
    }

    pub fn names(&self) -> Vec<&str> {
        self.championships.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.championships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.championships.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.championships.iter().position(|c| c.name == name)
    }
}

fn match_from_row(row: &SheetRow) -> Result<Match, String> {
    let colour: Colour = row.colour.parse().map_err(|e| format!("{}", e))?;
    let date = parse_date(&row.date).ok_or_else(|| format!("unreadable date {:?}", row.date))?;
    Ok(Match {
        winner: row.winner.trim().to_string(),
        colour,
        date,
    })
}

/// Counts the wins of each player.
///
/// The most frequent winners come first; players with the same number of wins
/// keep the order in which they first appear.
pub fn tally<'a, I>(matches: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for m in matches {
        let c = counts.entry(m.winner.as_str()).or_insert_with(|| {
            order.push(m.winner.clone());
            0
        });
        *c += 1;
    }
    let mut res: Vec<(String, u64)> = order
        .into_iter()
        .map(|name| {
            let c = counts.get(name.as_str()).cloned().unwrap_or(0);
            (name, c)
        })
        .collect();
    // Stable sort: ties keep the order of first appearance.
    res.sort_by(|a, b| b.1.cmp(&a.1));
    res
}

/// Number of wins obtained with each colour, white first.
pub fn colour_tally<'a, I>(matches: I) -> Vec<(Colour, u64)>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut white = 0;
    let mut black = 0;
    for m in matches {
        match m.colour {
            Colour::White => white += 1,
            Colour::Black => black += 1,
        }
    }
    vec![(Colour::White, white), (Colour::Black, black)]
}
