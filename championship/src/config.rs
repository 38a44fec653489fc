// ********* Row data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;

/// Column headers of the row store, in column order.
pub const HEADERS: [&str; 4] = ["Championship Name", "Winner", "Winner Colour", "Date"];

/// The format used to write dates into the row store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The colour of the pieces played by the winner of a match.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub const ALL: [Colour; 2] = [Colour::White, Colour::Black];

    pub fn as_str(&self) -> &'static str {
        match self {
            Colour::White => "White",
            Colour::Black => "Black",
        }
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseColourError(pub String);

impl Error for ParseColourError {}

impl Display for ParseColourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown colour {:?}, expected White or Black", self.0)
    }
}

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Colour::White),
            "black" | "b" => Ok(Colour::Black),
            _ => Err(ParseColourError(s.to_string())),
        }
    }
}

/// A single recorded game: who won, with which colour and when.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Match {
    pub winner: String,
    pub colour: Colour,
    pub date: NaiveDate,
}

/// A named group of matches, in the order they were entered.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Championship {
    pub name: String,
    pub matches: Vec<Match>,
}

impl Championship {
    pub fn new(name: &str) -> Championship {
        Championship {
            name: name.to_string(),
            matches: Vec::new(),
        }
    }
}

/// One row of the store, as plain strings.
///
/// A row with an empty winner only declares its championship.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SheetRow {
    pub championship_name: String,
    pub winner: String,
    pub colour: String,
    pub date: String,
}

impl SheetRow {
    pub fn marker(championship_name: &str) -> SheetRow {
        SheetRow {
            championship_name: championship_name.to_string(),
            ..SheetRow::default()
        }
    }

    pub fn from_match(championship_name: &str, m: &Match) -> SheetRow {
        SheetRow {
            championship_name: championship_name.to_string(),
            winner: m.winner.clone(),
            colour: m.colour.to_string(),
            date: m.date.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn is_marker(&self) -> bool {
        self.winner.trim().is_empty()
    }

    pub fn cells(&self) -> [String; 4] {
        [
            self.championship_name.clone(),
            self.winner.clone(),
            self.colour.clone(),
            self.date.clone(),
        ]
    }
}

// ********* Store **********

/// An append-only table of rows.
///
/// Implementations block until the remote side has answered.
pub trait RowStore {
    type Error: Error + Send + Sync + 'static;

    /// All the rows of the table, in table order, without the header.
    fn read_all(&mut self) -> Result<Vec<SheetRow>, Self::Error>;

    /// Appends one row at the end of the table.
    fn append(&mut self, row: &SheetRow) -> Result<(), Self::Error>;
}

/// An in-memory store. Rows are kept in append order.
impl RowStore for Vec<SheetRow> {
    type Error = std::convert::Infallible;

    fn read_all(&mut self) -> Result<Vec<SheetRow>, Self::Error> {
        Ok(self.clone())
    }

    fn append(&mut self, row: &SheetRow) -> Result<(), Self::Error> {
        self.push(row.clone());
        Ok(())
    }
}

// ******** Output data structures *********

/// What happened during hydration.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct HydrateReport {
    pub rows_read: usize,
    pub championships: usize,
    pub matches: usize,
    /// Rows that could not be turned into a match: (row index, reason).
    pub skipped: Vec<(usize, String)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum HydrateOutcome {
    Loaded(HydrateReport),
    /// The collection was already hydrated in this session, nothing was read.
    AlreadyHydrated,
}

/// Errors returned by the operations on a collection.
#[derive(Debug)]
pub enum ModelError {
    EmptyName,
    /// A match must name its winner.
    EmptyWinner,
    DuplicateChampionship(String),
    NotFound(String),
    /// The collection was changed before it was loaded from the store.
    NotHydrated,
    /// The store could not be read while hydrating before a mutation.
    StoreRead(Box<dyn Error + Send + Sync>),
    /// The store refused the append. The collection was not modified.
    StoreWrite(Box<dyn Error + Send + Sync>),
}

impl ModelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelError::StoreRead(e) | ModelError::StoreWrite(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::EmptyName => write!(f, "the championship name is empty"),
            ModelError::EmptyWinner => write!(f, "the winner of the match is empty"),
            ModelError::DuplicateChampionship(name) => {
                write!(f, "championship '{}' already exists", name)
            }
            ModelError::NotFound(name) => write!(f, "championship '{}' not found", name),
            ModelError::NotHydrated => {
                write!(f, "the championships must be loaded before they are changed")
            }
            ModelError::StoreRead(e) => write!(f, "could not read the rows: {}", e),
            ModelError::StoreWrite(e) => write!(f, "could not save the row: {}", e),
        }
    }
}
