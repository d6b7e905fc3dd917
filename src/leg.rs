//! Attribution of the dense track to the legs between waypoints.
//!
//! The waypoints are expected to be points of the recorded track (as placed
//! by tools that snap waypoints onto the track). The sweep walks the track
//! once, adds every increment to the open leg, and closes the leg when the
//! track reaches the next waypoint.

use crate::accumulator::Accumulator;
use crate::coord::{distance, Point};
use crate::error::{Result, TabellaError};
use crate::path::{Segment, Track};
use crate::waypoint::Waypoint;

use log::debug;
use serde::Serialize;

// 10 cm
pub const DEFAULT_TOLERANCE_KM: f64 = 0.0001;

/// Totals of one leg, from waypoint `index` to waypoint `index + 1`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClosedLeg {
    pub index: usize,
    // km
    pub dst: f64,
    // m, signed
    pub dh: f64,
    pub kms: f64,
    // Track indices matched to the start and end waypoint
    pub start_index: usize,
    pub end_index: usize,
}

pub struct LegSweep<'a> {
    waypoints: &'a [Waypoint],
    tolerance: f64,
    // Waypoint the open leg leads to
    next: usize,
    prev: Option<Point>,
    seen: usize,
    start_index: usize,
    dst: Accumulator,
    dh: Accumulator,
    kms: Accumulator,
    // Nearest approach (km) to the next waypoint within the open leg
    nearest: f64,
    // Distance (km) of the first track point from the first waypoint, when
    // out of tolerance
    missed_start: Option<f64>,
    trailing: usize,
    degenerate: usize,
}

impl<'a> LegSweep<'a> {
    pub fn new(waypoints: &'a [Waypoint], tolerance: f64) -> Self {
        Self {
            waypoints: waypoints,
            tolerance: tolerance,
            next: 1,
            prev: None,
            seen: 0,
            start_index: 0,
            dst: Accumulator::new(),
            dh: Accumulator::new(),
            kms: Accumulator::new(),
            nearest: f64::INFINITY,
            missed_start: None,
            trailing: 0,
            degenerate: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    // Index of the open leg, if any
    pub fn current_leg(&self) -> Option<usize> {
        if self.is_done() {
            None
        }
        else {
            Some(self.next - 1)
        }
    }

    // Feed the next track point. Returns the leg that this point closes.
    pub fn advance(&mut self, p: &Point) -> Option<ClosedLeg> {
        let i = self.seen;
        self.seen += 1;

        let prev = match self.prev.replace(*p) {
            Some(prev) => prev,
            None => {
                if let Some(wp) = self.waypoints.first() {
                    let d = distance(&wp.point, p);
                    if d > self.tolerance {
                        self.missed_start = Some(d);
                    }
                }
                return None;
            },
        };

        if self.is_done() {
            self.trailing += 1;
            return None;
        }

        let s = Segment::new(prev, *p);
        self.dh.add(s.climb());

        if let Some(kms) = s.kms() {
            self.dst.add(s.len());
            self.kms.add(kms);
        }
        else {
            self.degenerate += 1;
        }

        let wp = &self.waypoints[self.next];
        let d = distance(&wp.point, p);
        self.nearest = self.nearest.min(d);

        if d > self.tolerance {
            return None;
        }

        let leg = ClosedLeg {
            index: self.next - 1,
            dst: self.dst.total(),
            dh: self.dh.total(),
            kms: self.kms.total(),
            start_index: self.start_index,
            end_index: i,
        };

        debug!("Leg {} closed at track point {}: {:.3}km, {:.0}m, {:.3}kms",
               leg.index, i, leg.dst, leg.dh, leg.kms);

        self.dst.clear();
        self.dh.clear();
        self.kms.clear();
        self.nearest = f64::INFINITY;
        self.start_index = i;
        self.next += 1;

        Some(leg)
    }

    // End of track. The track must start at the first waypoint, all legs
    // must have been closed, and nothing may follow the final waypoint.
    pub fn finish(self) -> Result<()> {
        if self.degenerate > 0 {
            debug!("{} track increments without horizontal extent",
                   self.degenerate);
        }

        if let (Some(d), Some(wp)) = (self.missed_start, self.waypoints.first()) {
            return Err(TabellaError::UnmatchedWaypoint {
                label: wp.label.clone(),
                index: wp.index,
                nearest_m: d*1000.0,
            });
        }

        if let Some(wp) = self.waypoints.get(self.next) {
            return Err(TabellaError::UnmatchedWaypoint {
                label: wp.label.clone(),
                index: wp.index,
                nearest_m: self.nearest*1000.0,
            });
        }

        if self.trailing > 0 {
            let label = self.waypoints.last()
                .map(|wp| wp.label.clone())
                .unwrap_or_default();

            return Err(TabellaError::UnconsumedTrack {
                label: label,
                points: self.trailing,
            });
        }

        Ok(())
    }
}

/// Sweep the whole track, returning one closed leg per consecutive pair of
/// waypoints.
pub fn sweep(waypoints: &[Waypoint], track: &Track, tolerance: f64)
             -> Result<Vec<ClosedLeg>> {
    let mut legs = LegSweep::new(waypoints, tolerance);
    let closed = track.into_iter()
        .filter_map(|p| legs.advance(p))
        .collect::<Vec<ClosedLeg>>();

    legs.finish()?;

    Ok(closed)
}
