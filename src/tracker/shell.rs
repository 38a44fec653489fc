// The interactive session: one command per line, run against the same tracker.

use std::io::{BufRead, Write};

use clap::Parser;

use crate::args::ShellLine;
use crate::tracker::*;

const PROMPT: &str = "champtrack> ";

/// Splits a line into words. Single or double quotes group words together.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(format!("unterminated quote {}", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn banner<S: RowStore>(tracker: &Tracker<S>) -> String {
    let coll = tracker.session().collection();
    match tracker.selected() {
        Some(name) => format!(
            "{} championships loaded. Selected: {}\nType 'help' for the list of commands, 'quit' to leave.",
            coll.len(),
            name
        ),
        None => {
            "No championships available. Please create a new championship to get started.\nType 'help' for the list of commands, 'quit' to leave."
                .to_string()
        }
    }
}

pub fn run_shell<S, R, W>(tracker: &mut Tracker<S>, input: R, mut output: W) -> TrackerResult<()>
where
    S: RowStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", banner(tracker)).context(TerminalSnafu {})?;
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT).context(TerminalSnafu {})?;
        output.flush().context(TerminalSnafu {})?;
        let line = match lines.next() {
            Some(l) => l.context(TerminalSnafu {})?,
            None => {
                // End of input.
                writeln!(output).context(TerminalSnafu {})?;
                break;
            }
        };
        let words = match split_line(&line) {
            Ok(w) => w,
            Err(msg) => {
                writeln!(output, "Error: {}", msg).context(TerminalSnafu {})?;
                continue;
            }
        };
        match words.first().map(|s| s.as_str()) {
            None => continue,
            Some("quit") | Some("exit") => break,
            _ => {}
        }
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(p) => p,
            Err(e) => {
                // Also covers 'help' and '--help'.
                write!(output, "{}", e).context(TerminalSnafu {})?;
                continue;
            }
        };
        match tracker.execute(&parsed.command) {
            Ok(text) => writeln!(output, "{}", text).context(TerminalSnafu {})?,
            Err(e) => {
                warn!("run_shell: {:?}", e);
                writeln!(output, "Error: {}", e).context(TerminalSnafu {})?
            }
        }
    }
    info!("run_shell: session closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(rows: Vec<SheetRow>, script: &str) -> (String, Vec<SheetRow>) {
        let mut tracker = Tracker::new(rows, Roster::default());
        tracker.start().unwrap();
        let mut out: Vec<u8> = Vec::new();
        run_shell(&mut tracker, Cursor::new(script.to_string()), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), tracker.dispose())
    }

    #[test]
    fn words() {
        assert_eq!(
            split_line(r#"create "Spring Open"  "#).unwrap(),
            vec!["create", "Spring Open"]
        );
        assert_eq!(
            split_line("log -w 'User 1' --colour black").unwrap(),
            vec!["log", "-w", "User 1", "--colour", "black"]
        );
        assert_eq!(split_line(r#"create """#).unwrap(), vec!["create", ""]);
        assert!(split_line("create \"Spring").is_err());
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn session() {
        let script = "create \"Spring Open\"\n\
            log -w 'User 2' --colour black --date 2024-04-01\n\
            log -w Magnus\n\
            stats\n\
            quit\n\
            list\n";
        let (out, rows) = run(vec![], script);
        assert!(out.starts_with("No championships available."));
        assert!(out.contains("Championship 'Spring Open' created!"));
        assert!(out.contains("Match result saved for championship 'Spring Open'!"));
        assert!(out.contains("Error: \"Magnus\" cannot win this match"));
        assert!(out.contains("User 2 Wins: 1"));
        // Nothing runs after quit.
        assert!(!out.contains("(1 matches)"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn errors_keep_the_session_alive() {
        let script = "select Nowhere\nfrobnicate\nshell\nshow\n";
        let (out, rows) = run(vec![SheetRow::marker("Blitz")], script);
        assert!(out.starts_with("1 championships loaded. Selected: Blitz"));
        assert!(out.contains("Error: championship 'Nowhere' not found"));
        assert!(out.contains("Error: The shell is already running"));
        assert!(out.contains("Championship: Blitz"));
        assert_eq!(rows, vec![SheetRow::marker("Blitz")]);
    }
}
