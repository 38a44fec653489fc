use crate::tracker::*;

/// Who may be recorded as the winner of a match.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum WinnerPolicy {
    /// Only the two players and the placeholder.
    Roster,
    /// Any non-empty name.
    Open,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    pub player1: String,
    pub player2: String,
    pub placeholder: Option<String>,
    pub policy: WinnerPolicy,
}

impl Default for Roster {
    fn default() -> Self {
        Roster::from_settings(&PlayerSettings::default())
    }
}

impl Roster {
    pub fn from_settings(settings: &PlayerSettings) -> Roster {
        Roster {
            player1: settings.player1.trim().to_string(),
            player2: settings.player2.trim().to_string(),
            placeholder: settings
                .placeholder
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            policy: if settings.open {
                WinnerPolicy::Open
            } else {
                WinnerPolicy::Roster
            },
        }
    }

    /// The names offered as winners, without duplicates.
    pub fn eligible(&self) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        let candidates = [Some(&self.player1), Some(&self.player2), self.placeholder.as_ref()];
        for name in candidates.into_iter().flatten() {
            if !name.is_empty() && !res.contains(name) {
                res.push(name.clone());
            }
        }
        res
    }

    /// Returns the winner name to record.
    pub fn check(&self, winner: &str) -> TrackerResult<String> {
        let winner = winner.trim();
        let eligible = self.eligible();
        let accepted = match self.policy {
            WinnerPolicy::Open => !winner.is_empty(),
            WinnerPolicy::Roster => eligible.iter().any(|n| n == winner),
        };
        ensure!(
            accepted,
            IneligibleWinnerSnafu {
                winner,
                eligible: eligible.join(", "),
            }
        );
        Ok(winner.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster() {
        let r = Roster::default();
        assert_eq!(r.eligible(), vec!["User 1", "User 2", "User 3"]);
        assert_eq!(r.check(" User 3 ").unwrap(), "User 3");
        let err = r.check("Magnus").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"Magnus\" cannot win this match, choose one of: User 1, User 2, User 3"
        );
        assert!(r.check("").is_err());
    }

    #[test]
    fn settings() {
        let r = Roster::from_settings(&PlayerSettings {
            player1: "Alice".to_string(),
            player2: "Alice".to_string(),
            placeholder: Some("".to_string()),
            open: false,
        });
        assert_eq!(r.placeholder, None);
        assert_eq!(r.eligible(), vec!["Alice"]);
        assert!(r.check("User 3").is_err());
    }

    #[test]
    fn open_policy() {
        let r = Roster::from_settings(&PlayerSettings {
            open: true,
            ..PlayerSettings::default()
        });
        assert_eq!(r.policy, WinnerPolicy::Open);
        assert_eq!(r.check("Magnus").unwrap(), "Magnus");
        assert!(r.check("   ").is_err());
    }
}
