use crate::args::validation::{
    check_elevation_factor, check_geo_point, check_player_scores, check_positive_yards,
    check_readable_file, check_tee,
};
use crate::controller::course::TeeChoice;
use crate::model::{GeoPoint, UserId};
use crate::mvu::round::WEATHER_REFRESH_YARDS;
use crate::services::elevation::OPEN_ELEVATION_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Signed-in user. Profile commands need one.
    #[arg(long, env = "PINHIGH_USER", value_name = "USER")]
    pub user: Option<String>,
    /// Sqlite file for clubs, shots and scorecards. Without it data lives in memory for this run only.
    #[arg(long, env = "PINHIGH_DB", value_name = "DATABASE_FILE")]
    pub db: Option<PathBuf>,
    #[arg(long, env = "PINHIGH_COURSE_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub course_api_key: Option<String>,
    /// Without a key the wind readout stays empty.
    #[arg(long, env = "PINHIGH_WEATHER_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,
    #[arg(long, value_name = "URL", default_value = OPEN_ELEVATION_URL)]
    pub elevation_url: String,
    /// Yards added per 3 ft of climb to the target.
    #[arg(long, value_name = "FACTOR", default_value = "1.0", value_parser = check_elevation_factor)]
    pub elevation_factor: f64,
    /// How far the player moves before wind is fetched again.
    #[arg(long, value_name = "YARDS", default_value_t = WEATHER_REFRESH_YARDS, value_parser = check_positive_yards)]
    pub weather_refresh_yards: f64,
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the course directory.
    Search { query: String },
    /// Play a round: pick a course and tee, or leave both out for free roam.
    Round {
        /// Course search text.
        #[arg(long)]
        query: Option<String>,
        /// Which search result to use.
        #[arg(long, default_value_t = 0)]
        course: usize,
        /// Tee as category/name, e.g. male/Blue. Defaults to the first tee listed.
        #[arg(long, value_parser = check_tee)]
        tee: Option<TeeChoice>,
        /// Player position as lat,lon.
        #[arg(long, value_parser = check_geo_point)]
        from: Option<GeoPoint>,
        /// Target as lat,lon.
        #[arg(long, value_parser = check_geo_point)]
        to: Option<GeoPoint>,
        /// Hole to show, starting at 1.
        #[arg(long, default_value_t = 1)]
        hole: usize,
        /// JSON list of position fixes, each {"latitude":..,"longitude":..}, fed in order.
        #[arg(long, value_parser = check_readable_file)]
        replay: Option<PathBuf>,
    },
    /// Distance in yards between two lat,lon points.
    Distance {
        #[arg(value_parser = check_geo_point)]
        from: GeoPoint,
        #[arg(value_parser = check_geo_point)]
        to: GeoPoint,
    },
    /// Club suggestion for a distance.
    Suggest {
        #[arg(value_parser = check_positive_yards)]
        yards: f64,
    },
    /// List the club book.
    Clubs,
    SetClub {
        name: String,
        #[arg(value_parser = check_positive_yards)]
        yards: f64,
    },
    TrackShot {
        club: String,
        #[arg(value_parser = check_positive_yards)]
        yards: f64,
    },
    Shots,
    DeleteShot { id: String },
    /// Save a scorecard. Repeat --player for each row, e.g. --player "Sam:4,5,,3".
    SaveScorecard {
        course: String,
        #[arg(long = "player", value_parser = check_player_scores)]
        players: Vec<(String, Vec<String>)>,
        /// Hole count for the card; defaults to 18.
        #[arg(long)]
        holes: Option<usize>,
    },
    Scorecards,
    DeleteScorecard { id: String },
}

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub user: Option<UserId>,
    pub db: Option<PathBuf>,
    pub course_api_key: Option<String>,
    pub weather_api_key: Option<String>,
    pub elevation_url: String,
    pub elevation_factor: f64,
    pub weather_refresh_yards: f64,
    pub log_level: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            user: UserId::parse(cli.user.as_deref()).ok(),
            db: cli.db.clone(),
            course_api_key: non_blank(cli.course_api_key.clone()),
            weather_api_key: non_blank(cli.weather_api_key.clone()),
            elevation_url: cli.elevation_url.clone(),
            elevation_factor: cli.elevation_factor,
            weather_refresh_yards: cli.weather_refresh_yards,
            log_level: cli.log_level.clone(),
        }
    }
}
