//! Manual logging and the in-memory activity feed.

use crate::duration::parse_duration;
use crate::error::EntryError;
use crate::pace::{PaceStyle, pace_display};
use crate::types::{Activity, ActivityKind, FinishedActivity, Route};
use chrono::Utc;

/// Validated input from the manual logging form, or from a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub kind: ActivityKind,
    pub distance_km: f64,
    /// Trimmed duration text as entered.
    pub duration: String,
    pub elapsed_secs: u64,
    pub map_image: Option<String>,
    pub route: Option<Route>,
}

impl ManualEntry {
    /// Check raw form input: both fields present, distance a positive
    /// number, duration `MM:SS` or `HH:MM:SS`.
    pub fn validate(
        kind: ActivityKind,
        distance: &str,
        duration: &str,
        map_image: Option<&str>,
    ) -> Result<Self, EntryError> {
        let distance = distance.trim();
        let duration = duration.trim();
        if distance.is_empty() || duration.is_empty() {
            return Err(EntryError::MissingField);
        }

        let distance_km = distance
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(EntryError::InvalidDistance)?;

        let elapsed_secs = parse_duration(duration)?;

        Ok(Self {
            kind,
            distance_km,
            duration: duration.to_string(),
            elapsed_secs,
            map_image: map_image
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            route: None,
        })
    }

    pub fn into_activity(self) -> Activity {
        Activity {
            pace: pace_display(
                self.kind,
                self.distance_km,
                self.elapsed_secs,
                PaceStyle::Feed,
            ),
            kind: self.kind,
            distance_km: self.distance_km,
            duration: self.duration,
            map_image: self.map_image,
            route: self.route,
            logged_at: Utc::now(),
        }
    }
}

/// A finished session goes through the same gate as typed input, so a
/// session that ends at 0.00 km is rejected.
impl TryFrom<FinishedActivity> for ManualEntry {
    type Error = EntryError;

    fn try_from(f: FinishedActivity) -> Result<Self, Self::Error> {
        let mut entry = Self::validate(f.kind, &f.distance_km.to_string(), &f.duration, None)?;
        entry.route = Some(f.route);
        Ok(entry)
    }
}

/// Logged activities, newest first.
#[derive(Debug, Default)]
pub struct ActivityFeed {
    items: Vec<Activity>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ManualEntry) -> &Activity {
        let activity = entry.into_activity();
        tracing::info!(
            kind = %activity.kind,
            distance_km = activity.distance_km,
            duration = %activity.duration,
            pace = %activity.pace,
            "activity logged"
        );
        self.items.insert(0, activity);
        &self.items[0]
    }

    pub fn items(&self) -> &[Activity] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
