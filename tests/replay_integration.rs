use std::fs;
use std::io::Write;

use zenith::activity::{ActivityFeed, ManualEntry};
use zenith::geo::haversine_km;
use zenith::gpx::{read_track, replay_events};
use zenith::pace::{PaceStyle, pace_display};
use zenith::session::{SessionEvent, run_session};
use zenith::types::{ActivityKind, GeoPoint};

fn write_gpx(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = fs::File::create(&path).unwrap();
    write!(
        f,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="zenith-tests"><trk><trkseg>{body}</trkseg></trk></gpx>"#
    )
    .unwrap();
    path
}

#[test]
fn replayed_track_matches_pairwise_distance() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gpx(
        &dir,
        "run.gpx",
        r#"
        <trkpt lat="0.0" lon="0.0"><time>2026-05-01T07:00:00Z</time></trkpt>
        <trkpt lat="0.0" lon="0.001"><time>2026-05-01T07:00:01Z</time></trkpt>
        <trkpt lat="0.0" lon="0.002"><time>2026-05-01T07:00:02Z</time></trkpt>
        <trkpt lat="0.0" lon="0.002"><time>2026-05-01T07:00:03Z</time></trkpt>
        "#,
    );

    let points = read_track(&path).unwrap();
    assert_eq!(points.len(), 4);

    let mut snapshots = Vec::new();
    let done = run_session(ActivityKind::Run, replay_events(&points), |s| {
        snapshots.push(s.clone());
    })
    .unwrap();

    let step = haversine_km(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 0.001));
    assert_eq!(done.elapsed_secs, 3);
    assert_eq!(done.duration, "00:03");
    assert_eq!(done.route.len(), 4);
    assert!((done.route.distance_km() - 2.0 * step).abs() < 1e-9);
    assert!((done.distance_km - 0.22).abs() < 1e-9);

    assert_eq!(snapshots.len(), 3);
    let last = snapshots.last().unwrap();
    assert!((last.distance_km - 2.0 * step).abs() < 1e-9);
    assert_eq!(
        last.pace,
        pace_display(ActivityKind::Run, last.distance_km, 3, PaceStyle::Live)
    );
}

#[test]
fn finished_replay_goes_into_the_feed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gpx(
        &dir,
        "ride.gpx",
        r#"
        <trkpt lat="45.0" lon="7.0"><time>2026-05-01T07:00:00Z</time></trkpt>
        <trkpt lat="45.0" lon="7.1"><time>2026-05-01T07:15:00Z</time></trkpt>
        "#,
    );

    let points = read_track(&path).unwrap();
    let done = run_session(ActivityKind::Ride, replay_events(&points), |_| {}).unwrap();
    assert_eq!(done.elapsed_secs, 900);
    assert_eq!(done.duration, "15:00");

    let mut feed = ActivityFeed::new();
    let kph = done.distance_km / 0.25;
    let a = feed.add(ManualEntry::try_from(done).unwrap());
    assert_eq!(a.pace, format!("{kph:.1} km/h"));
    assert!(a.route.is_some());
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_track(&dir.path().join("nope.gpx")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.gpx"));
}

#[test]
fn channel_feed_drives_a_session() {
    let (tx, rx) = std::sync::mpsc::channel();
    let producer = std::thread::spawn(move || {
        for i in 0..5 {
            tx.send(SessionEvent::Position(GeoPoint::new(0.0, f64::from(i) * 0.001)))
                .unwrap();
            tx.send(SessionEvent::Tick).unwrap();
        }
        tx.send(SessionEvent::Finish).unwrap();
    });

    let done = run_session(ActivityKind::Run, rx, |_| {}).unwrap();
    producer.join().unwrap();
    assert_eq!(done.elapsed_secs, 5);
    assert_eq!(done.route.len(), 5);
}
