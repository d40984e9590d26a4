mod common;

use common::{StubCourses, sample_course};
use pinhigh::clubs::ClubBook;
use pinhigh::controller::course::{TeeChoice, holes_for_tee, search_courses, tee_options};
use pinhigh::error::CoreError;
use pinhigh::round::RoundSession;
use pinhigh::scorecard::ScorecardLedger;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

fn tee(category: &str, tee_name: &str) -> TeeChoice {
    TeeChoice {
        category: category.to_string(),
        tee_name: tee_name.to_string(),
    }
}

#[tokio::test]
async fn test_blank_query_never_hits_the_api() -> Result<(), Box<dyn std::error::Error>> {
    let api = StubCourses {
        courses: vec![sample_course()],
        calls: AtomicUsize::new(0),
    };
    assert!(matches!(
        search_courses(&api, "   ").await,
        Err(CoreError::InvalidInput(_))
    ));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);

    let found = search_courses(&api, "lakeside").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].to_string(), "Lakeside Golf Club - North, Monterey, CA");
    Ok(())
}

#[test]
fn test_tees_listed_by_category() {
    let course = sample_course();
    assert_eq!(
        tee_options(&course),
        vec![tee("female", "Red"), tee("male", "Blue")]
    );
}

#[test]
fn test_holes_numbered_from_one() -> Result<(), CoreError> {
    let course = sample_course();
    let holes = holes_for_tee(&course, &tee("male", "Blue"))?;
    let numbers: Vec<u32> = holes.iter().map(|h| h.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(holes[2].par, 5);
    assert_eq!(holes[2].distance_yards, 520.0);
    assert_eq!(holes[2].handicap_rank, 1);

    // the scorecard follows the round's hole count
    let session = RoundSession::new("Blue", holes, ClubBook::default(), 1.0);
    let ledger = ScorecardLedger::new(Some(session.holes().len()));
    assert_eq!(ledger.hole_count(), 3);
    assert_eq!(ledger.players()[0].scores.len(), 3);
    Ok(())
}

#[test]
fn test_missing_tees_rejected() {
    let course = sample_course();
    assert!(matches!(
        holes_for_tee(&course, &tee("male", "Gold")),
        Err(CoreError::InvalidInput(_))
    ));

    let mut bare = sample_course();
    bare.tees = BTreeMap::new();
    assert!(tee_options(&bare).is_empty());
    assert!(matches!(
        holes_for_tee(&bare, &tee("male", "Blue")),
        Err(CoreError::InvalidInput(_))
    ));
}
