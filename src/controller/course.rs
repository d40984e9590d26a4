use crate::error::CoreError;
use crate::model::{CourseSummary, Hole};
use crate::services::CourseSearch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeeChoice {
    pub category: String,
    pub tee_name: String,
}

/// Search courses by free text.
///
/// # Errors
/// `CoreError::InvalidInput` for a blank query (no request is made), or the
/// provider's error.
pub async fn search_courses(
    api: &dyn CourseSearch,
    query: &str,
) -> Result<Vec<CourseSummary>, CoreError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CoreError::InvalidInput("search query is empty".into()));
    }
    match api.search(query).await {
        Ok(courses) => {
            tracing::info!(query, count = courses.len(), "courses found");
            Ok(courses)
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "Failed to fetch courses");
            Err(e)
        }
    }
}

/// Every tee the course offers, grouped by category in category order.
#[must_use]
pub fn tee_options(course: &CourseSummary) -> Vec<TeeChoice> {
    course
        .tees
        .iter()
        .flat_map(|(category, sets)| {
            sets.iter().map(move |set| TeeChoice {
                category: category.clone(),
                tee_name: set.tee_name.clone(),
            })
        })
        .collect()
}

/// Holes for one tee, numbered 1..N by their position in the provider data.
///
/// # Errors
/// `CoreError::InvalidInput` when the course has no tees or the requested
/// tee does not exist.
pub fn holes_for_tee(course: &CourseSummary, choice: &TeeChoice) -> Result<Vec<Hole>, CoreError> {
    if course.tees.values().all(Vec::is_empty) {
        return Err(CoreError::InvalidInput(format!(
            "{} has no tee data",
            course.course_name
        )));
    }
    let set = course
        .tees
        .get(&choice.category)
        .and_then(|sets| sets.iter().find(|s| s.tee_name == choice.tee_name))
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "no {} tee named '{}'",
                choice.category, choice.tee_name
            ))
        })?;
    Ok(set
        .holes
        .iter()
        .zip(1u32..)
        .map(|(spec, number)| Hole {
            number,
            distance_yards: spec.yardage,
            par: spec.par,
            handicap_rank: spec.handicap,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HoleSpec, TeeSet};
    use std::collections::BTreeMap;

    fn course(tees: BTreeMap<String, Vec<TeeSet>>) -> CourseSummary {
        CourseSummary {
            id: 1,
            club_name: "Muni".into(),
            course_name: "Muni North".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            location: None,
            tees,
        }
    }

    fn nine_hole_tee(name: &str) -> TeeSet {
        TeeSet {
            tee_name: name.into(),
            holes: (0..9)
                .map(|i| HoleSpec {
                    par: 4,
                    yardage: 300.0 + f64::from(i),
                    handicap: i + 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_holes_numbered_by_position() {
        let mut tees = BTreeMap::new();
        tees.insert("male".to_string(), vec![nine_hole_tee("White")]);
        let c = course(tees);
        let choice = &tee_options(&c)[0];
        let holes = holes_for_tee(&c, choice).unwrap();
        assert_eq!(holes.len(), 9);
        assert_eq!(holes[0].number, 1);
        assert_eq!(holes[8].number, 9);
        assert_eq!(holes[8].distance_yards, 308.0);
    }

    #[test]
    fn test_missing_tees_rejected() {
        let c = course(BTreeMap::new());
        let choice = TeeChoice {
            category: "male".into(),
            tee_name: "White".into(),
        };
        assert!(matches!(holes_for_tee(&c, &choice), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_tee_options_order() {
        let mut tees = BTreeMap::new();
        tees.insert("male".to_string(), vec![nine_hole_tee("Blue"), nine_hole_tee("White")]);
        tees.insert("female".to_string(), vec![nine_hole_tee("Red")]);
        let names: Vec<String> = tee_options(&course(tees))
            .into_iter()
            .map(|t| format!("{}/{}", t.category, t.tee_name))
            .collect();
        assert_eq!(names, vec!["female/Red", "male/Blue", "male/White"]);
    }
}
