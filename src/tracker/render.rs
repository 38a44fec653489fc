// Text and JSON views of the collection.

use crate::tracker::*;

use serde::Serialize;
use serde_json::Map;

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
struct TallyEntry<'a> {
    player: &'a str,
    wins: u64,
}

pub fn championship_view(c: &Championship) -> String {
    let mut lines: Vec<String> = vec![format!("Championship: {}", c.name)];
    if c.matches.is_empty() {
        lines.push("No match results yet.".to_string());
        return lines.join("\n");
    }
    lines.push("Match Results:".to_string());

    let header = ["#", "Winner", "Colour", "Date"];
    let rows: Vec<[String; 4]> = c
        .matches
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            [
                (idx + 1).to_string(),
                m.winner.clone(),
                m.colour.to_string(),
                m.date.format(DATE_FORMAT).to_string(),
            ]
        })
        .collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let format_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<String>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    lines.push(format_line(header.to_vec()));
    for row in rows.iter() {
        lines.push(format_line(row.iter().map(|s| s.as_str()).collect()));
    }
    lines.join("\n")
}

/// One championship per line, the selected one marked with a star.
pub fn championship_list(coll: &Collection, selected: Option<&str>) -> String {
    coll.championships()
        .iter()
        .map(|c| {
            let mark = if Some(c.name.as_str()) == selected {
                "*"
            } else {
                " "
            };
            format!("{} {} ({} matches)", mark, c.name, c.matches.len())
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn wins_lines(counts: &[(String, u64)]) -> Vec<String> {
    if counts.is_empty() {
        return vec!["No match results yet.".to_string()];
    }
    counts
        .iter()
        .map(|(player, n)| format!("{} Wins: {}", player, n))
        .collect()
}

/// The statistics of a set of matches. The scope is null across all championships.
pub fn scope_summary<'a, I>(scope: Option<&str>, matches: I) -> JSValue
where
    I: IntoIterator<Item = &'a Match>,
{
    let matches: Vec<&Match> = matches.into_iter().collect();
    let counts = tally(matches.iter().cloned());
    let entries: Vec<TallyEntry> = counts
        .iter()
        .map(|(player, wins)| TallyEntry {
            player: player.as_str(),
            wins: *wins,
        })
        .collect();
    let mut colours: Map<String, JSValue> = Map::new();
    for (colour, n) in colour_tally(matches.iter().cloned()) {
        colours.insert(colour.to_string(), json!(n));
    }
    json!({
        "scope": scope,
        "matches": matches.len(),
        "tally": entries,
        "colours": colours,
    })
}
