//! Per-player hole scores for a round, as entered on the scorecard grid.

use crate::error::CoreError;
use crate::model::{PlayerScores, ScorecardEntry};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Hole count used when no round is active.
pub const DEFAULT_HOLE_COUNT: usize = 18;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("static regex"));

/// Parse one scorecard cell by its leading integer ("4.5" -> 4, "7abc" -> 7).
/// Blank, non-numeric, negative and out-of-range input all count as unset (0).
#[must_use]
pub fn coerce_score(raw: &str) -> i32 {
    let Some(m) = LEADING_INT.find(raw.trim_start()) else {
        return 0;
    };
    match m.as_str().parse::<i32>() {
        Ok(v) if v > 0 => v,
        _ => 0,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlayerRow {
    pub name: String,
    /// Cell text as entered; empty means unset.
    pub scores: Vec<String>,
}

impl PlayerRow {
    fn blank(name: String, holes: usize) -> Self {
        Self {
            name,
            scores: vec![String::new(); holes],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScorecardLedger {
    hole_count: usize,
    players: Vec<PlayerRow>,
}

impl Default for ScorecardLedger {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ScorecardLedger {
    /// New ledger with a single "Player 1". `round_holes` is the active
    /// round's hole count; `None` or zero uses [`DEFAULT_HOLE_COUNT`].
    #[must_use]
    pub fn new(round_holes: Option<usize>) -> Self {
        let hole_count = match round_holes {
            Some(n) if n > 0 => n,
            _ => DEFAULT_HOLE_COUNT,
        };
        Self {
            hole_count,
            players: vec![PlayerRow::blank("Player 1".to_string(), hole_count)],
        }
    }

    /// Rebuild a ledger from a saved card so it can be edited again.
    #[must_use]
    pub fn from_entry(entry: &ScorecardEntry) -> Self {
        let hole_count = entry
            .players
            .iter()
            .map(|p| p.scores.len())
            .max()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_HOLE_COUNT);
        let players = entry
            .players
            .iter()
            .map(|p| {
                let mut scores: Vec<String> = p
                    .scores
                    .iter()
                    .map(|s| if *s > 0 { s.to_string() } else { String::new() })
                    .collect();
                scores.resize(hole_count, String::new());
                PlayerRow {
                    name: p.name.clone(),
                    scores,
                }
            })
            .collect();
        Self {
            hole_count,
            players,
        }
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.hole_count
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerRow] {
        &self.players
    }

    pub fn add_player(&mut self) {
        let name = format!("Player {}", self.players.len() + 1);
        self.players.push(PlayerRow::blank(name, self.hole_count));
    }

    /// # Errors
    /// `CoreError::InvalidIndex` if `index` is past the last player.
    pub fn remove_player(&mut self, index: usize) -> Result<PlayerRow, CoreError> {
        if index >= self.players.len() {
            return Err(CoreError::InvalidIndex {
                index,
                len: self.players.len(),
            });
        }
        Ok(self.players.remove(index))
    }

    /// # Errors
    /// `CoreError::InvalidIndex` if `index` is past the last player.
    pub fn rename_player(&mut self, index: usize, name: &str) -> Result<(), CoreError> {
        let len = self.players.len();
        let row = self
            .players
            .get_mut(index)
            .ok_or(CoreError::InvalidIndex { index, len })?;
        row.name = name.to_string();
        Ok(())
    }

    /// Store one cell. Unusable input is stored as unset rather than
    /// rejected; returns `false` when either index is out of range.
    pub fn set_score(&mut self, player_index: usize, hole_index: usize, value: &str) -> bool {
        let Some(cell) = self
            .players
            .get_mut(player_index)
            .and_then(|p| p.scores.get_mut(hole_index))
        else {
            return false;
        };
        let score = coerce_score(value);
        *cell = if score > 0 { score.to_string() } else { String::new() };
        true
    }

    pub fn clear_scores(&mut self) {
        for row in &mut self.players {
            row.scores = vec![String::new(); self.hole_count];
        }
    }

    /// Persistable rows: every cell integer-coerced, unset as 0.
    #[must_use]
    pub fn to_persistable_players(&self) -> Vec<PlayerScores> {
        self.players
            .iter()
            .map(|row| PlayerScores {
                name: row.name.clone(),
                scores: row.scores.iter().map(|s| coerce_score(s)).collect(),
            })
            .collect()
    }

    /// Package the ledger for saving.
    ///
    /// # Errors
    /// `CoreError::InvalidInput` when `course` is blank or there are no players.
    pub fn to_entry(&self, course: &str, date: chrono::NaiveDate) -> Result<ScorecardEntry, CoreError> {
        let course = course.trim();
        if course.is_empty() {
            return Err(CoreError::InvalidInput("Please enter a course name.".into()));
        }
        if self.players.is_empty() {
            return Err(CoreError::InvalidInput("scorecard has no players".into()));
        }
        Ok(ScorecardEntry {
            id: String::new(),
            course: course.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            players: self.to_persistable_players(),
        })
    }
}

/// Sum of a row's set scores, saturating at `i32::MAX`.
#[must_use]
pub fn total_for(player: &PlayerRow) -> i32 {
    player
        .scores
        .iter()
        .fold(0i32, |total, s| total.saturating_add(coerce_score(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(scores: &[&str]) -> PlayerRow {
        PlayerRow {
            name: "Player 1".into(),
            scores: scores.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_total_treats_unset_as_zero() {
        assert_eq!(total_for(&row(&["4", "5", "", "3"])), 12);
        assert_eq!(total_for(&row(&["x", "-2", " 6 "])), 6);
    }

    #[test]
    fn test_total_saturates_on_huge_cells() {
        assert_eq!(total_for(&row(&["2147483647", "5"])), i32::MAX);
        let mut ledger = ScorecardLedger::new(Some(2));
        ledger.set_score(0, 0, "2147483647");
        ledger.set_score(0, 1, "5");
        assert_eq!(total_for(&ledger.players()[0]), i32::MAX);
    }

    #[test]
    fn test_coerce_reads_leading_integer() {
        assert_eq!(coerce_score("4.5"), 4);
        assert_eq!(coerce_score("7abc"), 7);
        assert_eq!(coerce_score("  +3"), 3);
        assert_eq!(coerce_score("-2"), 0);
        assert_eq!(coerce_score("abc7"), 0);
        assert_eq!(coerce_score(""), 0);
        assert_eq!(coerce_score("99999999999"), 0);
    }

    #[test]
    fn test_add_player_uses_hole_count() {
        let mut ledger = ScorecardLedger::new(None);
        assert_eq!(ledger.hole_count(), DEFAULT_HOLE_COUNT);
        let mut nine = ScorecardLedger::new(Some(9));
        nine.add_player();
        assert_eq!(nine.players().len(), 2);
        assert_eq!(nine.players()[1].name, "Player 2");
        assert_eq!(nine.players()[1].scores.len(), 9);
        ledger.add_player();
        assert_eq!(ledger.players()[1].scores.len(), 18);
    }

    #[test]
    fn test_remove_player_bounds() {
        let mut ledger = ScorecardLedger::default();
        ledger.add_player();
        assert_eq!(ledger.remove_player(0).map(|p| p.name), Ok("Player 1".to_string()));
        assert_eq!(
            ledger.remove_player(3),
            Err(CoreError::InvalidIndex { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_set_score_coerces() {
        let mut ledger = ScorecardLedger::default();
        assert!(ledger.set_score(0, 0, "4"));
        assert!(ledger.set_score(0, 1, "abc"));
        assert!(ledger.set_score(0, 2, "-3"));
        assert!(!ledger.set_score(0, 18, "4"));
        assert!(!ledger.set_score(5, 0, "4"));
        let scores = &ledger.players()[0].scores;
        assert_eq!(scores[0], "4");
        assert_eq!(scores[1], "");
        assert_eq!(scores[2], "");
    }

    #[test]
    fn test_persistable_round_trip() {
        let mut ledger = ScorecardLedger::new(Some(3));
        ledger.set_score(0, 0, "7");
        ledger.set_score(0, 2, "");
        let players = ledger.to_persistable_players();
        assert_eq!(players[0].scores, vec![7, 0, 0]);

        let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        let entry = ledger.to_entry("Pebble Beach", date).unwrap();
        assert_eq!(entry.date, "2025-05-04");
        let reloaded = ScorecardLedger::from_entry(&entry);
        assert_eq!(reloaded.to_persistable_players(), players);
    }

    #[test]
    fn test_to_entry_requires_course() {
        let ledger = ScorecardLedger::default();
        let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        assert!(matches!(
            ledger.to_entry("   ", date),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_clear_scores() {
        let mut ledger = ScorecardLedger::default();
        ledger.set_score(0, 4, "5");
        ledger.clear_scores();
        assert_eq!(total_for(&ledger.players()[0]), 0);
    }
}
