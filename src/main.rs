use pinhigh::args::{self, Command, Config};
use pinhigh::clubs::ClubBook;
use pinhigh::controller::RoundHandle;
use pinhigh::controller::course::{TeeChoice, holes_for_tee, search_courses, tee_options};
use pinhigh::controller::profile::{
    delete_scorecard, delete_shot, load_club_book, require_user, save_scorecard, track_shot,
    update_club_distance,
};
use pinhigh::error::CoreError;
use pinhigh::geo;
use pinhigh::logging::init_logging;
use pinhigh::model::GeoPoint;
use pinhigh::mvu::{Msg, RoundModel};
use pinhigh::round::RoundSession;
use pinhigh::scorecard::{ScorecardLedger, total_for};
use pinhigh::services::{
    ChannelLocationSource, DisabledWeather, ElevationLookup, GolfCourseApiClient, LocationHint,
    OpenElevationClient, OpenWeatherClient, WeatherLookup,
};
use pinhigh::storage::{MemoryStore, PersistenceStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;

struct RoundArgs {
    query: Option<String>,
    course: usize,
    tee: Option<TeeChoice>,
    from: Option<GeoPoint>,
    to: Option<GeoPoint>,
    hole: usize,
    replay: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = args::args_checks();
    let config = Config::from_cli(&cli);
    init_logging(&config.log_level);

    let store: Arc<dyn PersistenceStore> = match &config.db {
        Some(path) => Arc::new(SqliteStore::open(path)?),
        None => {
            tracing::debug!("no database configured, profile data is kept in memory");
            Arc::new(MemoryStore::new())
        }
    };
    let store = store.as_ref();
    let user = config.user.as_ref();

    match cli.command {
        Command::Search { query } => {
            let api = course_client(&config)?;
            for (idx, course) in search_courses(&api, &query).await?.iter().enumerate() {
                println!("[{idx}] {course}");
                for choice in tee_options(course) {
                    println!("      {}/{}", choice.category, choice.tee_name);
                }
            }
        }
        Command::Round {
            query,
            course,
            tee,
            from,
            to,
            hole,
            replay,
        } => {
            let round = RoundArgs {
                query,
                course,
                tee,
                from,
                to,
                hole,
                replay,
            };
            play_round(&config, store, round).await?;
        }
        Command::Distance { from, to } => {
            println!("{:.2} yards", geo::distance_yards(from, to));
        }
        Command::Suggest { yards } => {
            let book = load_club_book(store, user).await;
            println!("{}", book.suggest(yards));
        }
        Command::Clubs => {
            print_clubs(&load_club_book(store, user).await);
        }
        Command::SetClub { name, yards } => {
            let book = load_club_book(store, user).await;
            let book = update_club_distance(store, user, &book, &name, yards).await?;
            print_clubs(&book);
        }
        Command::TrackShot { club, yards } => {
            let shot = track_shot(store, user, &club, yards).await?;
            println!("saved {} {} yards as {}", shot.club, shot.distance, shot.id);
        }
        Command::Shots => {
            let user = require_user(user)?;
            for shot in store.list_shots(user).await? {
                println!("{}\t{}\t{}\t{}", shot.id, shot.timestamp, shot.club, shot.distance);
            }
        }
        Command::DeleteShot { id } => {
            delete_shot(store, user, &id).await?;
            println!("deleted shot {id}");
        }
        Command::SaveScorecard {
            course,
            players,
            holes,
        } => {
            let ledger = build_ledger(holes, &players)?;
            let today = chrono::Local::now().date_naive();
            let entry = save_scorecard(store, user, &ledger, &course, today).await?;
            println!("saved scorecard {} for {}", entry.id, entry.course);
        }
        Command::Scorecards => {
            let user = require_user(user)?;
            for entry in store.list_scorecards(user).await? {
                println!("{}\t{}\t{}", entry.id, entry.date, entry.course);
                for row in ScorecardLedger::from_entry(&entry).players() {
                    println!("    {}: {}", row.name, total_for(row));
                }
            }
        }
        Command::DeleteScorecard { id } => {
            delete_scorecard(store, user, &id).await?;
            println!("deleted scorecard {id}");
        }
    }
    Ok(())
}

fn course_client(config: &Config) -> Result<GolfCourseApiClient, CoreError> {
    config
        .course_api_key
        .as_deref()
        .map(GolfCourseApiClient::new)
        .ok_or_else(|| CoreError::InvalidInput("set PINHIGH_COURSE_API_KEY to search courses".into()))
}

fn weather_client(config: &Config) -> Arc<dyn WeatherLookup> {
    match config.weather_api_key.as_deref() {
        Some(key) => Arc::new(OpenWeatherClient::new(key)),
        None => Arc::new(DisabledWeather),
    }
}

fn build_ledger(
    holes: Option<usize>,
    players: &[(String, Vec<String>)],
) -> Result<ScorecardLedger, CoreError> {
    let mut ledger = ScorecardLedger::new(holes);
    for (idx, (name, cells)) in players.iter().enumerate() {
        if idx > 0 {
            ledger.add_player();
        }
        ledger.rename_player(idx, name)?;
        for (hole, cell) in cells.iter().enumerate() {
            if !ledger.set_score(idx, hole, cell) {
                tracing::warn!(player = %name, hole = hole + 1, "score past the last hole ignored");
            }
        }
    }
    Ok(ledger)
}

fn print_clubs(book: &ClubBook) {
    for club in book.clubs() {
        println!("{:<8}{:>5} yards", club.name, club.distance);
    }
}

fn print_notices(notices: Vec<String>) {
    for notice in notices {
        println!("! {notice}");
    }
}

async fn play_round(
    config: &Config,
    store: &dyn PersistenceStore,
    args: RoundArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let clubs = load_club_book(store, config.user.as_ref()).await;

    let session = match &args.query {
        Some(query) => {
            let api = course_client(config)?;
            let courses = search_courses(&api, query).await?;
            let course = courses.get(args.course).ok_or(CoreError::InvalidIndex {
                index: args.course,
                len: courses.len(),
            })?;
            let choice = match args.tee {
                Some(choice) => choice,
                None => tee_options(course)
                    .into_iter()
                    .next()
                    .ok_or_else(|| CoreError::InvalidInput(format!("{course} lists no tees")))?,
            };
            let holes = holes_for_tee(course, &choice)?;
            println!("{course} ({}/{}, {} holes)", choice.category, choice.tee_name, holes.len());
            RoundSession::new(choice.tee_name, holes, clubs, config.elevation_factor)
        }
        None => RoundSession::free_roam(clubs, config.elevation_factor),
    };

    let elevation: Arc<dyn ElevationLookup> =
        Arc::new(OpenElevationClient::with_base_url(config.elevation_url.as_str()));
    let round = RoundHandle::start(
        RoundModel::with_weather_refresh(session, config.weather_refresh_yards),
        elevation,
        weather_client(config),
    );

    for _ in 1..args.hole {
        print_notices(round.dispatch(Msg::NextHole).await?);
    }
    if let Some(target) = args.to {
        print_notices(round.dispatch(Msg::TargetSelected(target)).await?);
    }

    if let Some(path) = &args.replay {
        let fixes: Vec<GeoPoint> = serde_json::from_str(&tokio::fs::read_to_string(path).await?)?;
        let source = ChannelLocationSource::new(fixes.len());
        round.start_tracking(&source, LocationHint::default()).await?;
        for fix in fixes {
            source.push(fix);
        }
        source.close();
        round.finish_tracking().await;
        print_notices(round.take_notices().await);
    } else if let Some(here) = args.from {
        print_notices(round.dispatch(Msg::LocationUpdated(here)).await?);
    }

    let session = round.session().await;
    if let Some(hole) = session.current_hole() {
        println!(
            "Hole {} of {}: par {}, {} yards, handicap {}",
            hole.number,
            session.holes().len(),
            hole.par,
            hole.distance_yards,
            hole.handicap_rank
        );
    }
    println!("{}", round.readout().await);
    round.end_round().await;
    Ok(())
}
