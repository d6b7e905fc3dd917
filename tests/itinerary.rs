use tabella::{label, parse_label, round5, ElevationProfile, Itinerary, Params, Point, Route,
              TabellaError, Track, MAX_WAYPOINTS};

// 100 points, 50 m apart, climbing steadily from 0 to 500 m
fn climb() -> Track {
    Track::from_points(
        (0..100).map(|i| Point::new(2600000.0 + i as f64*50.0, 1200000.0,
                                    i as f64*500.0/99.0))
            .collect())
}

fn waypoints(track: &Track, at: &[usize]) -> Vec<Point> {
    at.iter().map(|i| track[*i]).collect()
}

#[test]
fn labels() {
    for i in 0..MAX_WAYPOINTS {
        let l = label(i).unwrap();
        assert_eq!(parse_label(&l).unwrap(), i);
    }

    assert_eq!(label(0).unwrap(), "A");
    assert_eq!(label(25).unwrap(), "Z");
    assert_eq!(label(26).unwrap(), "A1");
    assert_eq!(label(259).unwrap(), "Z9");
    assert!(matches!(label(260), Err(TabellaError::LabelOverflow(260))));
    assert!(parse_label("A0").is_err());
    assert!(parse_label("a").is_err());
}

#[test]
fn three_waypoints() {
    let track = climb();
    let itinerary = Itinerary::compute(&waypoints(&track, &[0, 50, 99]), &track,
                                       &Params::default()).unwrap();

    assert_eq!(itinerary.legs.len(), 2);
    assert_eq!(itinerary.rows.len(), 3);

    let labels: Vec<&str> = itinerary.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);

    // 2.5 km and 252.5 m up: 5.03 kms, 60 min at 5 kms/h
    let leg = &itinerary.legs[0];
    assert!((leg.dst_km - 2.5).abs() < 1e-9);
    assert!((leg.dh_m - 50.0*500.0/99.0).abs() < 1e-9);
    assert_eq!(leg.walk_min, 60);
    assert_eq!(leg.rest_min, 0);

    // Rest at B is a quarter of the unrounded walking time, to 5 min
    let walked = 60.0*itinerary.legs[0].kms/5.0;
    assert_eq!(itinerary.legs[1].rest_min, round5(walked*15.0/60.0) as u64);
    assert_eq!(itinerary.legs[1].rest_min, 15);
    assert_eq!(itinerary.legs[1].walk_min, 59);

    assert_eq!(itinerary.rows[0].clock, "08:00");
    assert_eq!(itinerary.rows[1].clock, "09:00");
    assert_eq!(itinerary.rows[2].clock, "10:14");
    assert_eq!(itinerary.rows[1].rest_min, Some(15));
    assert_eq!(itinerary.rows[0].rest_min, None);
    assert_eq!(itinerary.rows[2].leg_km, None);

    assert_eq!(itinerary.summary.arrival_min, 614);
    assert_eq!(itinerary.summary.rest_min, 15);
    assert!((itinerary.summary.ascent_m - 500.0).abs() < 1e-9);
    assert_eq!(itinerary.summary.descent_m, 0.0);
}

#[test]
fn lunch_break() {
    let track = climb();
    let mut params = Params::default();
    params.set("lunch", "B:60").unwrap();

    let itinerary = Itinerary::compute(&waypoints(&track, &[0, 50, 99]), &track,
                                       &params).unwrap();

    assert_eq!(itinerary.legs[1].rest_min, 60);
    assert_eq!(itinerary.rows[2].clock_min, 480 + 60 + 60 + 59);
}

#[test]
fn lunch_must_be_between_start_and_end() {
    let track = climb();
    let mut params = Params::default();
    params.set("lunch", "C:60").unwrap();

    let res = Itinerary::compute(&waypoints(&track, &[0, 50, 99]), &track, &params);
    assert!(matches!(res, Err(TabellaError::InvalidParameter(_))));
}

#[test]
fn legs_cover_the_track() {
    let track = climb();
    let itinerary = Itinerary::compute(&waypoints(&track, &[0, 10, 33, 34, 80, 99]),
                                       &track, &Params::default()).unwrap();
    let dst: f64 = itinerary.legs.iter().map(|l| l.dst_km).sum();
    let kms: f64 = itinerary.legs.iter().map(|l| l.kms).sum();

    assert_eq!(itinerary.legs.len(), 5);
    assert!((dst - track.len()).abs() < 1e-9);
    assert!((kms - track.kms()).abs() < 1e-9);
    assert!((itinerary.summary.km - track.len()).abs() < 1e-9);

    for w in itinerary.legs.windows(2) {
        assert_eq!(w[0].end_index, w[1].start_index);
    }
}

#[test]
fn clock_never_goes_back() {
    let track = climb();
    let mut params = Params::default();
    params.set("start", "23:30").unwrap();

    let itinerary = Itinerary::compute(&waypoints(&track, &[0, 20, 40, 60, 80, 99]),
                                       &track, &params).unwrap();

    for w in itinerary.rows.windows(2) {
        assert!(w[1].clock_min >= w[0].clock_min);
    }

    // Displayed modulo 24 h
    let last = itinerary.rows.last().unwrap();
    assert!(last.clock_min >= 24*60);
    assert_eq!(last.clock, tabella::format_clock(last.clock_min - 24*60));
}

#[test]
fn start_and_end_when_waypoints_are_missing() {
    let track = climb();
    let itinerary = Itinerary::compute(&[], &track, &Params::default()).unwrap();

    assert_eq!(itinerary.rows.len(), 2);
    assert_eq!(itinerary.legs.len(), 1);
    assert!((itinerary.legs[0].kms - track.kms()).abs() < 1e-9);
}

#[test]
fn waypoint_off_the_track() {
    let track = climb();
    let mut wps = waypoints(&track, &[0, 50, 99]);
    wps[1].n += 50.0;

    match Itinerary::compute(&wps, &track, &Params::default()) {
        Err(TabellaError::UnmatchedWaypoint { label, nearest_m, .. }) => {
            assert_eq!(label, "B");
            assert!((nearest_m - 50.0).abs() < 1e-6);
        },
        other => panic!("unexpected {:?}", other.map(|i| i.rows.len())),
    }
}

#[test]
fn track_after_last_waypoint() {
    let track = climb();
    let res = Itinerary::compute(&waypoints(&track, &[0, 50, 90]), &track,
                                 &Params::default());

    assert!(matches!(res, Err(TabellaError::UnconsumedTrack { points: 9, .. })));
}

#[test]
fn too_short_track() {
    let track = Track::from_points(vec![Point::new(2600000.0, 1200000.0, 0.0)]);
    let res = Itinerary::compute(&[], &track, &Params::default());

    assert!(matches!(res, Err(TabellaError::EmptyTrack(1))));
}

#[test]
fn profile_is_thinned_out() {
    let track = Track::from_points(
        (0..2500).map(|i| Point::new(2600000.0 + i as f64*10.0, 1200000.0,
                                     (i%100) as f64))
            .collect());
    let itinerary = Itinerary::compute(&[], &track, &Params::default()).unwrap();
    let profile = ElevationProfile::from_track(&track, &itinerary);

    // Every second point, and the last one
    assert_eq!(profile.samples.len(), 1251);
    assert!((profile.km - 24.99).abs() < 1e-9);
    assert_eq!(profile.samples.last().map(|s| s.ele), Some(99.0));
    assert_eq!(profile.markers.len(), 2);
    assert_eq!(profile.max_ele, 99.0);
    // The end of the line meets the last marker
    let end = profile.markers.last().map(|m| m.km).unwrap();
    assert!((profile.km - end).abs() < 1e-12);

    let plot = profile.plot(500.0, 100.0, 200.0);
    assert_eq!(plot[0], (0.0, 0.0));
    assert!((plot[plot.len() - 1].0 - 500.0).abs() < 1e-9);
}

#[test]
fn from_gpx() {
    let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata><name>Gurten</name></metadata>
  <wpt lat="46.9400" lon="7.4400"><ele>540</ele></wpt>
  <wpt lat="46.9300" lon="7.4400"><ele>700</ele></wpt>
  <wpt lat="46.9200" lon="7.4400"><ele>850</ele></wpt>
  <trk>
    <trkseg>
      <trkpt lat="46.9400" lon="7.4400"><ele>540</ele></trkpt>
      <trkpt lat="46.9350" lon="7.4400"><ele>620</ele></trkpt>
      <trkpt lat="46.9300" lon="7.4400"><ele>700</ele></trkpt>
      <trkpt lat="46.9250" lon="7.4400"><ele>780</ele></trkpt>
      <trkpt lat="46.9200" lon="7.4400"><ele>850</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    let route = Route::read_gpx(gpx.as_bytes()).unwrap();
    assert_eq!(route.name, "Gurten");

    let (waypoints, track) = route.project();
    let itinerary = Itinerary::compute(&waypoints, &track, &Params::default()).unwrap();

    assert_eq!(itinerary.rows.len(), 3);
    assert!((itinerary.summary.ascent_m - 310.0).abs() < 1e-6);
    // About 1.1 km per leg, towards the south
    assert!(itinerary.legs.iter().all(|l| l.dst_km > 1.0 && l.dst_km < 1.2));
    assert!(itinerary.rows[1].n < itinerary.rows[0].n);
}

#[test]
fn extreme_params_are_rejected() {
    let track = climb();
    let wps = waypoints(&track, &[0, 50, 99]);

    let mut params = Params::default();
    params.speed_kmh = 1e-300;
    assert!(matches!(Itinerary::compute(&wps, &track, &params),
                     Err(TabellaError::InvalidParameter(_))));

    let mut params = Params::default();
    params.set("rest", "1e300").unwrap();
    assert!(matches!(Itinerary::compute(&wps, &track, &params),
                     Err(TabellaError::InvalidParameter(_))));

    let mut params = Params::default();
    params.set("lunch", &format!("B:{}", u64::MAX)).unwrap();
    assert!(matches!(Itinerary::compute(&wps, &track, &params),
                     Err(TabellaError::InvalidParameter(_))));
}

#[test]
fn lunch_waypoint_far_out_of_range() {
    let track = climb();
    let params = Params::from_json(&format!(r#"{{
        "rest": {{
            "policy": "fixed_lunch",
            "minutes_per_hour": 15.0,
            "lunch": {{ "waypoint": {}, "minutes": 60 }}
        }}
    }}"#, usize::MAX)).unwrap();

    let res = Itinerary::compute(&waypoints(&track, &[0, 50, 99]), &track, &params);
    assert!(matches!(res, Err(TabellaError::InvalidParameter(_))));
}

#[test]
fn first_waypoint_off_the_track() {
    let track = climb();
    let mut wps = waypoints(&track, &[0, 50, 99]);
    wps[0] = Point::new(2700000.0, 1100000.0, 0.0);

    match Itinerary::compute(&wps, &track, &Params::default()) {
        Err(TabellaError::UnmatchedWaypoint { label, index, .. }) => {
            assert_eq!(label, "A");
            assert_eq!(index, 0);
        },
        other => panic!("unexpected {:?}", other.map(|i| i.rows.len())),
    }
}
