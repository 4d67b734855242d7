pub mod activity;
pub mod cli;
pub mod duration;
pub mod error;
pub mod geo;
pub mod gpx;
pub mod pace;
pub mod session;
pub mod types;
pub mod utils;
