//! Pace for runs, speed for rides.
//!
//! The activity feed shows `N/A` when the pace is undefined; the live
//! tracking screen shows a zero value instead.

use crate::types::ActivityKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pace {
    /// Time per km.
    PerKm { minutes: u64, seconds: u64 },
    /// km/h.
    Speed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceStyle {
    /// Activity list: `5:25/km`, `N/A`.
    Feed,
    /// Live tracking: `5:25 /km`, `0:00 /km`, `0.0 km/h`.
    Live,
}

/// `None` when the distance or the elapsed time is not strictly positive.
pub fn compute_pace(kind: ActivityKind, distance_km: f64, elapsed_secs: u64) -> Option<Pace> {
    if !distance_km.is_finite() || distance_km <= 0.0 || elapsed_secs == 0 {
        return None;
    }
    let elapsed = elapsed_secs as f64;

    match kind {
        ActivityKind::Run => {
            let secs_per_km = elapsed / distance_km;
            let mut minutes = (secs_per_km / 60.0).floor() as u64;
            let mut seconds = (secs_per_km % 60.0).round() as u64;
            // 59.5s and up rounds to 60; carry it.
            if seconds == 60 {
                minutes += 1;
                seconds = 0;
            }
            Some(Pace::PerKm { minutes, seconds })
        }
        ActivityKind::Ride => Some(Pace::Speed(distance_km / (elapsed / 3600.0))),
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerKm { minutes, seconds } => write!(f, "{minutes}:{seconds:02}"),
            // Ties round up (6.25 -> 6.3); `{:.1}` alone rounds them to even.
            Self::Speed(kph) => write!(f, "{:.1}", (kph * 10.0).round() / 10.0),
        }
    }
}

pub fn format_pace(kind: ActivityKind, pace: Option<Pace>, style: PaceStyle) -> String {
    match (pace, style) {
        (Some(p @ Pace::PerKm { .. }), PaceStyle::Feed) => format!("{p}/km"),
        (Some(p @ Pace::PerKm { .. }), PaceStyle::Live) => format!("{p} /km"),
        (Some(p @ Pace::Speed(_)), _) => format!("{p} km/h"),
        (None, PaceStyle::Feed) => "N/A".to_string(),
        (None, PaceStyle::Live) => match kind {
            ActivityKind::Run => "0:00 /km".to_string(),
            ActivityKind::Ride => "0.0 km/h".to_string(),
        },
    }
}

/// Compute and format in one step.
pub fn pace_display(
    kind: ActivityKind,
    distance_km: f64,
    elapsed_secs: u64,
    style: PaceStyle,
) -> String {
    format_pace(kind, compute_pace(kind, distance_km, elapsed_secs), style)
}
