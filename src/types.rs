use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ActivityKind {
    Run,
    Ride,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => f.write_str("Run"),
            Self::Ride => f.write_str("Ride"),
        }
    }
}

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Points in the order they were recorded. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route(Vec<GeoPoint>);

impl Route {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, p: GeoPoint) {
        self.0.push(p);
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.0.last()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the segment distances in traversal order, in km.
    pub fn distance_km(&self) -> f64 {
        self.0
            .windows(2)
            .map(|w| crate::geo::haversine_km(&w[0], &w[1]))
            .sum()
    }
}

impl FromIterator<GeoPoint> for Route {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A GPX track point with its timestamp.
#[derive(Debug, Clone)]
pub struct TrackPoint {
    pub t: DateTime<Utc>,
    pub point: GeoPoint,
    pub ele: Option<f64>,
}

/// What a tracking session hands over when the user finishes it.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedActivity {
    pub kind: ActivityKind,
    /// Rounded to 2 decimals.
    pub distance_km: f64,
    pub duration: String,
    pub elapsed_secs: u64,
    pub route: Route,
}

/// Live values shown on every timer tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSnapshot {
    pub elapsed_secs: u64,
    pub duration: String,
    pub distance_km: f64,
    pub pace: String,
}

/// A logged activity as it appears in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub distance_km: f64,
    pub duration: String,
    pub pace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    pub logged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_keeps_duplicates_in_order() {
        let mut r = Route::new();
        r.push(GeoPoint::new(1.0, 2.0));
        r.push(GeoPoint::new(1.0, 2.0));
        r.push(GeoPoint::new(0.0, 0.0));
        assert_eq!(r.len(), 3);
        assert_eq!(r.points()[2], GeoPoint::new(0.0, 0.0));
        assert_eq!(r.last(), Some(&GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn empty_and_single_point_routes_have_no_distance() {
        assert!(Route::new().distance_km().abs() < f64::EPSILON);
        let r: Route = std::iter::once(GeoPoint::new(45.0, 7.0)).collect();
        assert!(r.distance_km().abs() < f64::EPSILON);
    }

    #[test]
    fn kind_serializes_as_title_case() {
        let json = serde_json::to_string(&ActivityKind::Ride).unwrap();
        assert_eq!(json, "\"Ride\"");
        assert_eq!(ActivityKind::Run.to_string(), "Run");
    }
}
