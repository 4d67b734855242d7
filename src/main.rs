#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use zenith::activity::{ActivityFeed, ManualEntry};
use zenith::duration::parse_duration;
use zenith::pace::{PaceStyle, pace_display};
use zenith::session::run_session;
use zenith::{cli, dlog, gpx, utils};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    match cli.cmd {
        cli::Cmd::Pace {
            kind,
            distance,
            duration,
            live,
        } => {
            let secs = parse_duration(&duration)?;
            let style = if live { PaceStyle::Live } else { PaceStyle::Feed };
            dlog!("mode=pace kind={kind} distance={distance} secs={secs} style={style:?}");
            println!("{}", pace_display(kind, distance, secs, style));
            Ok(())
        }
        cli::Cmd::Log {
            kind,
            distance,
            duration,
            map_image,
        } => {
            let entry = ManualEntry::validate(kind, &distance, &duration, map_image.as_deref())?;
            let mut feed = ActivityFeed::new();
            let activity = feed.add(entry);
            println!(
                "{}",
                serde_json::to_string_pretty(activity).context("serializing activity")?
            );
            Ok(())
        }
        cli::Cmd::Replay { gpx, kind, json } => {
            let points = gpx::read_track(&gpx)?;
            if points.is_empty() {
                anyhow::bail!("No track points with position and time in {}", gpx.display());
            }
            dlog!("mode=replay gpx={} points={}", gpx.display(), points.len());

            let events = gpx::replay_events(&points);
            let finished = run_session(kind, events, |snap| {
                tracing::trace!(
                    duration = %snap.duration,
                    distance_km = snap.distance_km,
                    pace = %snap.pace,
                    "tick"
                );
            })?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&finished).context("serializing activity")?
                );
            } else {
                let pace = pace_display(
                    finished.kind,
                    finished.distance_km,
                    finished.elapsed_secs,
                    PaceStyle::Feed,
                );
                println!(
                    "{}\t{:.2} km\t{}\t{pace}\t{} points",
                    finished.kind,
                    finished.distance_km,
                    finished.duration,
                    finished.route.len()
                );
            }
            Ok(())
        }
    }
}
