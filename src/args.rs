use clap::{Parser, Subcommand};

/// Keeps track of chess championships: match results and win statistics, saved in a shared spreadsheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default config.toml) The TOML configuration file. It holds the store settings,
    /// the players and, unless credentials are read from the environment, the service account key.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// ('file' or 'env') Where to read the service account key from: the [GOOGLE_SHEETS_KEY] section of
    /// the configuration file, or the GOOGLE_SHEETS_KEY_* environment variables.
    #[clap(long, value_parser)]
    pub credentials: Option<String>,

    /// ('sheets' or 'csv', default sheets) The store holding the championships.
    #[clap(long, value_parser)]
    pub store: Option<String>,

    /// (file path) The CSV file used with --store csv.
    #[clap(long, value_parser)]
    pub csv_path: Option<String>,

    /// Name of the first player (default User 1).
    #[clap(long, value_parser)]
    pub player1: Option<String>,

    /// Name of the second player (default User 2).
    #[clap(long, value_parser)]
    pub player2: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

/// The actions available from the command line and inside the shell.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Creates a new championship.
    Create {
        /// The name of the championship.
        #[clap(value_parser)]
        name: String,
    },
    /// Selects the championship used by the other commands (shell only) and shows it.
    Select {
        #[clap(value_parser)]
        name: String,
    },
    /// Saves the result of a match.
    Log {
        /// The championship. Defaults to the selected championship in the shell.
        #[clap(long, value_parser)]
        championship: Option<String>,
        /// The winner of the match.
        #[clap(short, long, value_parser)]
        winner: String,
        /// ('white' or 'black', default white) The colour played by the winner.
        #[clap(long, value_parser)]
        colour: Option<String>,
        /// (YYYY-MM-DD, default today) The day the match was played.
        #[clap(long, value_parser)]
        date: Option<String>,
    },
    /// Shows the match results of a championship.
    Show {
        #[clap(value_parser)]
        name: Option<String>,
    },
    /// Shows the number of wins of each player.
    Stats {
        /// The championship. Defaults to the selected championship in the shell.
        #[clap(long, value_parser)]
        championship: Option<String>,
        /// Also show the statistics across all the championships.
        #[clap(long, takes_value = false)]
        all: bool,
        /// (file path or 'stdout') If specified, a summary of the statistics is written in JSON format to the
        /// given location.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
    /// Lists the championships.
    List,
    /// Adds all the rows of an Excel export (.xlsx) of a championship sheet.
    Import {
        #[clap(value_parser)]
        path: String,
        /// The worksheet to read. Defaults to the first worksheet.
        #[clap(long, value_parser)]
        worksheet: Option<String>,
    },
    /// Changes the two players eligible as winners (shell only).
    Players {
        #[clap(value_parser)]
        player1: String,
        #[clap(value_parser)]
        player2: String,
    },
    /// Starts an interactive session reading commands from the standard input.
    Shell,
}

/// One line typed in the shell.
#[derive(Parser, Debug, Clone)]
#[clap(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[clap(subcommand)]
    pub command: Command,
}
