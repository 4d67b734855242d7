//! Live tracking session.
//!
//! A session owns the recorded [`Route`], the running distance and the
//! elapsed-seconds counter from `start` until `finish` or `cancel`. Position
//! samples and timer ticks arrive as [`SessionEvent`]s in delivery order.

use crate::dlog;
use crate::duration::format_clock;
use crate::error::{SensorError, SessionError};
use crate::geo::accumulate;
use crate::pace::{PaceStyle, pace_display};
use crate::types::{ActivityKind, FinishedActivity, GeoPoint, LiveSnapshot, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Timer running, waiting for the first position fix.
    Requesting,
    Tracking,
    Error(SensorError),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Position(GeoPoint),
    Tick,
    SensorError(SensorError),
    Finish,
}

#[derive(Debug)]
pub struct TrackingSession {
    kind: ActivityKind,
    state: SessionState,
    route: Route,
    distance_km: f64,
    elapsed_secs: u64,
}

impl TrackingSession {
    pub const fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            state: SessionState::Idle,
            route: Route::new(),
            distance_km: 0.0,
            elapsed_secs: 0,
        }
    }

    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub const fn route(&self) -> &Route {
        &self.route
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    const fn is_active(&self) -> bool {
        matches!(
            self.state,
            SessionState::Requesting | SessionState::Tracking
        )
    }

    const fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.state,
            action,
        }
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("start"));
        }
        self.state = SessionState::Requesting;
        tracing::info!(kind = %self.kind, "tracking session started");
        Ok(())
    }

    /// Record a position sample and return the distance it added, in km.
    pub fn record_position(&mut self, point: GeoPoint) -> Result<f64, SessionError> {
        if !self.is_active() {
            return Err(self.invalid("record a position in"));
        }
        if self.state == SessionState::Requesting {
            dlog!("first fix lat={} lng={}", point.lat, point.lng);
            self.state = SessionState::Tracking;
        }

        let step = accumulate(self.route.last(), &point);
        self.distance_km += step;
        self.route.push(point);
        Ok(step)
    }

    /// Advance the elapsed counter by one second.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(self.invalid("tick"));
        }
        self.elapsed_secs += 1;
        Ok(())
    }

    /// Move to the error state. No more samples or ticks are accepted.
    pub fn fail(&mut self, err: SensorError) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(self.invalid("fail"));
        }
        tracing::warn!(error = %err, elapsed_secs = self.elapsed_secs, "tracking stopped");
        self.state = SessionState::Error(err);
        Ok(())
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        LiveSnapshot {
            elapsed_secs: self.elapsed_secs,
            duration: format_clock(self.elapsed_secs),
            distance_km: self.distance_km,
            pace: pace_display(
                self.kind,
                self.distance_km,
                self.elapsed_secs,
                PaceStyle::Live,
            ),
        }
    }

    /// Close the session and hand over the recorded activity.
    pub fn finish(&mut self) -> Result<FinishedActivity, SessionError> {
        if !self.is_active() {
            return Err(self.invalid("finish"));
        }
        self.state = SessionState::Finished;

        let activity = FinishedActivity {
            kind: self.kind,
            distance_km: round2(self.distance_km),
            duration: format_clock(self.elapsed_secs),
            elapsed_secs: self.elapsed_secs,
            route: std::mem::take(&mut self.route),
        };
        tracing::info!(
            kind = %activity.kind,
            distance_km = activity.distance_km,
            duration = %activity.duration,
            points = activity.route.len(),
            "tracking session finished"
        );
        Ok(activity)
    }

    /// Drop the session without producing an activity.
    pub fn cancel(self) {
        tracing::info!(
            kind = %self.kind,
            state = ?self.state,
            points = self.route.len(),
            "tracking session cancelled"
        );
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Drive a session from an ordered event feed.
///
/// `on_tick` receives a snapshot after every tick. The session finishes on
/// [`SessionEvent::Finish`] or when the feed ends; a sensor error ends it
/// with [`SessionError::Sensor`].
pub fn run_session<I, F>(
    kind: ActivityKind,
    events: I,
    mut on_tick: F,
) -> Result<FinishedActivity, SessionError>
where
    I: IntoIterator<Item = SessionEvent>,
    F: FnMut(&LiveSnapshot),
{
    let mut session = TrackingSession::new(kind);
    session.start()?;

    for ev in events {
        match ev {
            SessionEvent::Position(p) => {
                session.record_position(p)?;
            }
            SessionEvent::Tick => {
                session.tick()?;
                on_tick(&session.snapshot());
            }
            SessionEvent::SensorError(err) => {
                session.fail(err)?;
                return Err(err.into());
            }
            SessionEvent::Finish => break,
        }
    }

    session.finish()
}
