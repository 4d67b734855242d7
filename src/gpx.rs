use crate::dlog;
use crate::session::SessionEvent;
use crate::types::{GeoPoint, TrackPoint};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use std::fs;
use std::iter;
use std::path::Path;

pub fn read_track(path: &Path) -> Result<Vec<TrackPoint>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_track(&text).with_context(|| format!("parsing GPX: {}", path.display()))
}

/// Track points with a position and a timestamp, in document order.
///
/// Points missing `lat`, `lon` or `<time>` are skipped.
pub fn parse_track(xml_text: &str) -> Result<Vec<TrackPoint>> {
    let mut xml = Reader::from_str(xml_text);
    xml.config_mut().trim_text(true);

    let mut st = TrkptState::default();
    let mut out = Vec::new();

    loop {
        match xml.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => on_start(&mut st, &e),
            Ok(Event::End(e)) => on_end(&mut st, &e, &mut out),
            Ok(Event::Text(e)) => on_text(&mut st, &e),
            Err(e) => anyhow::bail!("GPX XML parse error at {}: {e}", xml.buffer_position()),
            _ => {}
        }
    }

    if st.skipped > 0 {
        tracing::warn!(skipped = st.skipped, kept = out.len(), "incomplete GPX track points");
    }
    Ok(out)
}

#[derive(Default)]
struct TrkptState {
    in_trkpt: bool,
    in_time: bool,
    in_ele: bool,

    lat: Option<f64>,
    lon: Option<f64>,
    time: Option<DateTime<Utc>>,
    ele: Option<f64>,

    skipped: usize,
}

fn on_start(st: &mut TrkptState, e: &BytesStart<'_>) {
    match e.name().as_ref() {
        b"trkpt" => {
            st.in_trkpt = true;
            st.time = None;
            st.ele = None;
            (st.lat, st.lon) = lat_lon_attrs(e);
        }
        b"time" if st.in_trkpt => st.in_time = true,
        b"ele" if st.in_trkpt => st.in_ele = true,
        _ => {}
    }
}

fn on_end(st: &mut TrkptState, e: &BytesEnd<'_>, out: &mut Vec<TrackPoint>) {
    match e.name().as_ref() {
        b"time" => st.in_time = false,
        b"ele" => st.in_ele = false,
        b"trkpt" => {
            st.in_trkpt = false;
            let (Some(lat), Some(lng), Some(t)) = (st.lat, st.lon, st.time) else {
                st.skipped += 1;
                return;
            };
            out.push(TrackPoint {
                t,
                point: GeoPoint::new(lat, lng),
                ele: st.ele,
            });
        }
        _ => {}
    }
}

fn on_text(st: &mut TrkptState, e: &BytesText<'_>) {
    if st.in_time
        && let Ok(s) = e.decode()
        && let Ok(dt) = DateTime::parse_from_rfc3339(s.as_ref())
    {
        st.time = Some(dt.with_timezone(&Utc));
    } else if st.in_ele
        && let Ok(s) = e.decode()
        && let Ok(v) = s.parse::<f64>()
    {
        st.ele = Some(v);
    }
}

fn lat_lon_attrs(e: &BytesStart<'_>) -> (Option<f64>, Option<f64>) {
    let mut lat = None;
    let mut lon = None;

    for a in e.attributes().with_checks(false).flatten() {
        let Ok(v) = a.unescape_value() else {
            continue;
        };
        match a.key.as_ref() {
            b"lat" => lat = v.parse::<f64>().ok(),
            b"lon" => lon = v.parse::<f64>().ok(),
            _ => {}
        }
    }

    (lat, lon)
}

/// Gaps longer than this are logged; they are still replayed second by second.
const LONG_GAP_SECS: i64 = 3600;

/// Turn a recorded track into the events a live session would have seen:
/// one `Position` per point, preceded by one `Tick` per whole second since
/// the latest timestamp seen so far. Timestamps going backwards add no ticks.
///
/// Events are produced lazily, so a long pause costs time, not memory.
pub fn replay_events(points: &[TrackPoint]) -> impl Iterator<Item = SessionEvent> + '_ {
    let mut latest: Option<DateTime<Utc>> = None;

    points.iter().flat_map(move |tp| {
        let gap = latest.map_or(0, |prev| (tp.t - prev).num_seconds());
        if gap < 0 {
            dlog!("gpx_time_backwards latest={:?} t={}", latest, tp.t);
        } else if gap > LONG_GAP_SECS {
            tracing::warn!(gap_secs = gap, at = %tp.t, "long pause in GPX track");
        }
        latest = Some(latest.map_or(tp.t, |prev| prev.max(tp.t)));

        let ticks = usize::try_from(gap.max(0)).unwrap_or(usize::MAX);
        iter::repeat_n(SessionEvent::Tick, ticks)
            .chain(iter::once(SessionEvent::Position(tp.point)))
    })
}
