use crate::model::TrackedShot;
use ahash::RandomState;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex"));

/// Learned average carry per club key, in whole yards.
pub type LearnedDistances = BTreeMap<String, f64>;

/// Bucket key for a club label: the first run of ASCII digits ("7I" -> "7"),
/// otherwise the first two characters upper-cased ("pw" -> "PW").
#[must_use]
pub fn club_key(label: &str) -> String {
    let label = label.trim();
    if let Some(m) = DIGIT_RUN.find(label) {
        return m.as_str().to_string();
    }
    label.chars().take(2).collect::<String>().to_uppercase()
}

/// Average tracked carry per club key, rounded to the nearest yard.
#[must_use]
pub fn aggregate(shots: &[TrackedShot]) -> LearnedDistances {
    let mut sums: HashMap<String, (f64, u32), RandomState> = HashMap::default();
    for shot in shots {
        if shot.club.trim().is_empty() || !shot.distance.is_finite() {
            continue;
        }
        let entry = sums.entry(club_key(&shot.club)).or_insert((0.0, 0));
        entry.0 += shot.distance;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (total, count))| (key, (total / f64::from(count)).round()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(club: &str, distance: f64) -> TrackedShot {
        TrackedShot {
            id: String::new(),
            club: club.to_string(),
            distance,
            timestamp: "2025-04-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_club_key_digits_then_letters() {
        assert_eq!(club_key("7I"), "7");
        assert_eq!(club_key("3W"), "3");
        assert_eq!(club_key("Iron 10"), "10");
        assert_eq!(club_key("PW"), "PW");
        assert_eq!(club_key("sw"), "SW");
        assert_eq!(club_key("Driver"), "DR");
        assert_eq!(club_key("X"), "X");
    }

    #[test]
    fn test_club_key_ignores_non_ascii_digits() {
        // Arabic-Indic seven is not a club number
        assert_eq!(club_key("\u{667}I"), "\u{667}I");
        assert_eq!(club_key("\u{667}I 9"), "9");
    }

    #[test]
    fn test_aggregate_averages_by_key() {
        let learned = aggregate(&[shot("7I", 160.0), shot("7I", 170.0)]);
        assert_eq!(learned.len(), 1);
        assert_eq!(learned.get("7"), Some(&165.0));
    }

    #[test]
    fn test_aggregate_merges_labels_with_same_key() {
        let learned = aggregate(&[
            shot("7I", 160.0),
            shot("7 iron", 163.0),
            shot("pw", 120.0),
            shot("PW", 125.0),
        ]);
        assert_eq!(learned.get("7"), Some(&162.0));
        assert_eq!(learned.get("PW"), Some(&123.0));
    }

    #[test]
    fn test_aggregate_empty_and_blank_labels() {
        assert!(aggregate(&[]).is_empty());
        assert!(aggregate(&[shot("  ", 100.0)]).is_empty());
    }
}
