use crate::types::ActivityKind;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "zenith",
    about = "Log runs and rides, compute pace, replay GPS tracks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print the pace (run) or speed (ride) for a distance and duration.
    Pace {
        #[arg(long, value_enum, default_value_t = ActivityKind::Run)]
        kind: ActivityKind,

        /// Distance in km.
        #[arg(long)]
        distance: f64,

        /// MM:SS or HH:MM:SS
        #[arg(long)]
        duration: String,

        /// Use the live tracking display (`0:00 /km` instead of `N/A`).
        #[arg(long)]
        live: bool,
    },

    /// Validate a manual workout entry and print it as JSON.
    Log {
        #[arg(long, value_enum, default_value_t = ActivityKind::Run)]
        kind: ActivityKind,

        /// Distance in km, as typed.
        #[arg(long)]
        distance: String,

        /// MM:SS or HH:MM:SS
        #[arg(long)]
        duration: String,

        /// Optional map image URL.
        #[arg(long)]
        map_image: Option<String>,
    },

    /// Replay a GPX track through a live tracking session.
    Replay {
        #[arg(value_name = "GPX")]
        gpx: PathBuf,

        #[arg(long, value_enum, default_value_t = ActivityKind::Run)]
        kind: ActivityKind,

        /// Print the finished activity (with route) as JSON.
        #[arg(long)]
        json: bool,
    },
}
