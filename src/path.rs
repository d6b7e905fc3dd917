use crate::accumulator::Accumulator;
use crate::coord::{distance, Point};
use crate::error::{Result, TabellaError};

use core::slice::Iter;
use std::fmt;
use std::ops::Index;

// Ratio of elevation change (m) to distance (km) below which a descent
// counts as steep
pub const STEEP_DESCENT: f64 = -0.2;
// Metres of ascent equivalent to one flat kilometre
pub const CLIMB_M_PER_KM: f64 = 100.0;
// Metres of steep descent equivalent to one flat kilometre
pub const DESCENT_M_PER_KM: f64 = 150.0;

#[derive(Copy, Clone, Debug)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            a: a,
            b: b,
        }
    }

    // Horizontal length in km
    pub fn len(&self) -> f64 {
        return distance(&self.a, &self.b);
    }

    // Signed elevation change in m, positive when climbing
    pub fn climb(&self) -> f64 {
        return self.b.ele - self.a.ele;
    }

    /// Equivalent flat distance (kms) of walking `dst` km while changing
    /// altitude by `dh` m. `dst` must be positive.
    pub fn effort(dst: f64, dh: f64) -> f64 {
        let slope = dh/dst;

        if slope > 0.0 {
            return dst + dh/CLIMB_M_PER_KM;
        }
        else if slope < STEEP_DESCENT {
            return dst - dh/DESCENT_M_PER_KM;
        }
        else {
            return dst;
        }
    }

    // Effort of walking this segment, None if it has no horizontal extent
    pub fn kms(&self) -> Option<f64> {
        let dst = self.len();

        if dst > 0.0 {
            return Some(Segment::effort(dst, self.climb()));
        }
        else {
            return None;
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_fmt(format_args!("{} -> {}", self.a, self.b))
    }
}

/// The dense recorded trajectory, in recording order.
#[derive(Clone, Debug)]
pub struct Track {
    points: Vec<Point>,
}

impl Track {
    pub fn new() -> Self {
        Self {
            points: vec!(),
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points: points,
        }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn get(&self, i: usize) -> Option<&Point> {
        self.points.get(i)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    // Check that the track can be swept: it needs at least two points and
    // must not exceed an optional configured size.
    pub fn validate(&self, limit: Option<usize>) -> Result<()> {
        let len = self.points.len();

        if len < 2 {
            return Err(TabellaError::EmptyTrack(len));
        }

        if let Some(limit) = limit {
            if len > limit {
                return Err(TabellaError::TrackTooLong {
                    points: len,
                    limit: limit,
                });
            }
        }

        Ok(())
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    // Horizontal length in km
    pub fn len(&self) -> f64 {
        let acc: Accumulator = self.segments().map(|s| s.len()).collect();
        return acc.total();
    }

    pub fn kms(&self) -> f64 {
        let acc: Accumulator = self.segments().filter_map(|s| s.kms()).collect();
        return acc.total();
    }

    // Accumulated ascent along the track in m. Downhill parts are not
    // counted.
    pub fn elevation(&self) -> f64 {
        let acc: Accumulator = self.segments()
            .map(|s| s.climb())
            .filter(|dh| *dh > 0.0)
            .collect();
        return acc.total();
    }

    // Accumulated descent in m, as a positive number
    pub fn descent(&self) -> f64 {
        let acc: Accumulator = self.segments()
            .map(|s| -s.climb())
            .filter(|dh| *dh > 0.0)
            .collect();
        return acc.total();
    }

    pub fn min_elevation(&self) -> Option<f64> {
        self.points.iter().map(|p| p.ele).reduce(f64::min)
    }

    pub fn max_elevation(&self) -> Option<f64> {
        self.points.iter().map(|p| p.ele).reduce(f64::max)
    }
}

impl Index<usize> for Track {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Point;

    type IntoIter = Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => {
                formatter.write_fmt(format_args!("{} -> {} ({} pts)",
                                                 a, b, self.points.len()))
            },
            _ => {
                formatter.write_str("empty track")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effort_by_slope() {
        // 10% climb: 100m over 1km
        assert!((Segment::effort(1.0, 100.0) - 2.0).abs() < 1e-12);
        // Mild descent is free
        assert_eq!(Segment::effort(1.0, -0.1), 1.0);
        assert_eq!(Segment::effort(2.0, -0.4), 2.0);
        // Steep descent: 300m over 1km
        assert!((Segment::effort(1.0, -300.0) - 3.0).abs() < 1e-12);
        // Flat
        assert_eq!(Segment::effort(2.5, 0.0), 2.5);
    }

    #[test]
    fn effort_is_monotonic_in_climb() {
        let mut last = 0.0;
        for i in 0..200 {
            let kms = Segment::effort(0.5, i as f64*2.5);
            assert!(kms >= last);
            last = kms;
        }
    }

    #[test]
    fn effort_grows_with_steep_descent() {
        let dst = 0.4;
        let threshold = STEEP_DESCENT*dst;
        let mut last = Segment::effort(dst, threshold - 0.5);
        for i in 2..200 {
            let kms = Segment::effort(dst, threshold - i as f64*0.5);
            assert!(kms > last);
            last = kms;
        }
    }

    #[test]
    fn track_statistics() {
        let track = Track::from_points(vec![
            Point::new(0.0, 0.0, 100.0),
            Point::new(300.0, 400.0, 150.0),
            Point::new(300.0, 1400.0, 120.0),
            Point::new(300.0, 1400.0, 130.0),
        ]);

        assert!((track.len() - 1.5).abs() < 1e-12);
        assert_eq!(track.elevation(), 60.0);
        assert_eq!(track.descent(), 30.0);
        assert_eq!(track.min_elevation(), Some(100.0));
        assert_eq!(track.max_elevation(), Some(150.0));
        // 0.5 km + 50m climb, 1 km + 30m descent, vertical step skipped
        assert!((track.kms() - 2.2).abs() < 1e-12);
    }

    #[test]
    fn validation() {
        let mut track = Track::new();
        assert!(matches!(track.validate(None), Err(TabellaError::EmptyTrack(0))));
        track.push(Point::new(0.0, 0.0, 0.0));
        track.push(Point::new(1.0, 0.0, 0.0));
        track.push(Point::new(2.0, 0.0, 0.0));
        assert!(track.validate(None).is_ok());
        assert!(matches!(track.validate(Some(2)),
                         Err(TabellaError::TrackTooLong { points: 3, limit: 2 })));
    }
}
