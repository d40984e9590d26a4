pub mod args;
pub mod clubs;
pub mod controller;
pub mod error;
pub mod geo;
pub mod logging;
pub mod model;
pub mod mvu;
pub mod round;
pub mod scorecard;
pub mod services;
pub mod storage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::CoreError;
