//! Walking times, rests and the running clock of a marching table.

use crate::accumulator::Accumulator;
use crate::coord::Point;
use crate::direction::{anchor_direction, Compass};
use crate::error::{Result, TabellaError};
use crate::leg::{sweep, ClosedLeg};
use crate::params::Params;
use crate::path::Track;
use crate::waypoint::Waypoint;

use log::info;
use serde::{Deserialize, Serialize};

/// Round to the nearest multiple of 5.
pub fn round5(x: f64) -> f64 {
    (x/5.0).round()*5.0
}

// Upper bound of a single walk or rest, in minutes
pub const MAX_MINUTES: f64 = 1e9;

fn whole_minutes(x: f64) -> Result<u64> {
    let m = x.round();

    if !(m >= 0.0 && m <= MAX_MINUTES) {
        return Err(TabellaError::InvalidParameter(
            format!("duration of {} min is out of range", x)));
    }

    Ok(m as u64)
}

fn add_minutes(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(|| TabellaError::InvalidParameter(
        format!("schedule overflows after {} + {} min", a, b)))
}

pub fn format_clock(min: u64) -> String {
    format!("{:02}:{:02}", (min/60)%24, min%60)
}

pub fn format_duration(min: u64) -> String {
    format!("{:02}:{:02}", min/60, min%60)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LunchBreak {
    pub waypoint: usize,
    pub minutes: u64,
}

/// How long to rest at a waypoint before walking on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RestPolicy {
    // Rest proportional to the time walked since the previous waypoint
    Proportional { minutes_per_hour: f64 },
    // As above, except for one waypoint with a fixed lunch break
    FixedLunch { minutes_per_hour: f64, lunch: LunchBreak },
}

impl RestPolicy {
    pub fn minutes_per_hour(&self) -> f64 {
        match self {
            RestPolicy::Proportional { minutes_per_hour } => *minutes_per_hour,
            RestPolicy::FixedLunch { minutes_per_hour, .. } => *minutes_per_hour,
        }
    }

    pub fn lunch(&self) -> Option<&LunchBreak> {
        match self {
            RestPolicy::Proportional { .. } => None,
            RestPolicy::FixedLunch { lunch, .. } => Some(lunch),
        }
    }

    /// Rest in minutes at waypoint `waypoint`, reached after walking
    /// `walked` minutes (unrounded).
    pub fn rest_at(&self, waypoint: usize, walked: f64) -> Result<u64> {
        if let Some(lunch) = self.lunch() {
            if lunch.waypoint == waypoint {
                return Ok(lunch.minutes);
            }
        }

        whole_minutes(round5(walked*self.minutes_per_hour()/60.0).max(0.0))
    }
}

/// A closed leg with its timing.
#[derive(Clone, Debug, Serialize)]
pub struct LegAggregate {
    pub index: usize,
    pub dst_km: f64,
    pub dh_m: f64,
    pub kms: f64,
    pub walk_min: u64,
    // Rest at the start waypoint of this leg, before walking it
    pub rest_min: u64,
    pub start_index: usize,
    pub end_index: usize,
}

/// One line of the marching table.
#[derive(Clone, Debug, Serialize)]
pub struct ScheduleRow {
    pub label: String,
    pub e: u64,
    pub n: u64,
    pub ele: f64,
    // Totals on arrival
    pub km: f64,
    pub kms: f64,
    // Leg towards the next waypoint, empty for the last waypoint
    pub leg_km: Option<f64>,
    pub leg_dh_m: Option<f64>,
    pub leg_kms: Option<f64>,
    pub leg_walk_min: Option<u64>,
    // Rest before leaving this waypoint, empty at start and end
    pub rest_min: Option<u64>,
    // Arrival, minutes after midnight
    pub clock_min: u64,
    pub clock: String,
    pub track_index: usize,
    pub anchor: Compass,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub min_ele: f64,
    pub max_ele: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
    pub km: f64,
    pub kms: f64,
    // Walking time without rests
    pub walk_min: u64,
    pub rest_min: u64,
    pub start_min: u64,
    pub arrival_min: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Itinerary {
    pub title: String,
    pub speed_kmh: f64,
    pub rest_minutes_per_hour: f64,
    pub adjustment_factor: f64,
    pub waypoints: Vec<Waypoint>,
    pub legs: Vec<LegAggregate>,
    pub rows: Vec<ScheduleRow>,
    pub summary: Summary,
}

impl Itinerary {
    /// Compute the marching table of a track. `waypoints` must lie on the
    /// track, in order; with less than two, start and end of the track are
    /// used.
    pub fn compute(waypoints: &[Point], track: &Track, params: &Params)
                   -> Result<Itinerary> {
        params.validate()?;
        track.validate(params.max_track_points)?;

        let wps = Waypoint::from_points(waypoints, track)?;

        if let Some(lunch) = params.rest.lunch() {
            if lunch.waypoint == 0 || lunch.waypoint >= wps.len() - 1 {
                return Err(TabellaError::InvalidParameter(
                    format!("lunch waypoint {} must be an intermediate waypoint \
                             (1..{})", lunch.waypoint, wps.len() - 1)));
            }
        }

        info!("Sweeping {} track points over {} waypoints",
              track.num_points(), wps.len());

        let closed = sweep(&wps, track, params.tolerance_km())?;
        let legs = Itinerary::schedule_legs(&closed, params)?;
        let start = params.start_minutes()?;
        let rows = Itinerary::rows(&wps, &legs, track, start)?;
        let summary = Itinerary::summarize(&legs, &rows, track, params, start)?;

        info!("{:.2} km, {:.2} kms, {} min walking, arrival {}",
              summary.km, summary.kms, summary.walk_min,
              format_clock(summary.arrival_min));

        Ok(Itinerary {
            title: params.title.clone(),
            speed_kmh: params.speed_kmh,
            rest_minutes_per_hour: params.rest.minutes_per_hour(),
            adjustment_factor: params.adjustment_factor,
            waypoints: wps,
            legs: legs,
            rows: rows,
            summary: summary,
        })
    }

    fn walk_minutes(kms: f64, params: &Params) -> f64 {
        60.0*kms/(params.speed_kmh*params.adjustment_factor)
    }

    // Walking time per leg, and the rest taken where each leg ends, which
    // belongs to the following leg.
    pub fn schedule_legs(closed: &[ClosedLeg], params: &Params)
                         -> Result<Vec<LegAggregate>> {
        let mut legs = vec!();
        let mut rest = 0;

        for leg in closed {
            let walked = Itinerary::walk_minutes(leg.kms, params);

            legs.push(LegAggregate {
                index: leg.index,
                dst_km: leg.dst,
                dh_m: leg.dh,
                kms: leg.kms,
                walk_min: whole_minutes(walked)?,
                rest_min: rest,
                start_index: leg.start_index,
                end_index: leg.end_index,
            });

            rest = params.rest.rest_at(leg.index + 1, walked)?;
        }

        Ok(legs)
    }

    fn rows(wps: &[Waypoint], legs: &[LegAggregate], track: &Track, start: u64)
            -> Result<Vec<ScheduleRow>> {
        let mut rows = vec!();
        let mut km = Accumulator::new();
        let mut kms = Accumulator::new();
        let mut clock = start;

        for (i, wp) in wps.iter().enumerate() {
            let leg = legs.get(i);
            let track_index = if i == 0 {
                legs.first().map(|l| l.start_index).unwrap_or(0)
            }
            else {
                legs[i - 1].end_index
            };
            let (e, n) = wp.point.rounded();

            rows.push(ScheduleRow {
                label: wp.label.clone(),
                e: e,
                n: n,
                ele: wp.point.ele,
                km: km.total(),
                kms: kms.total(),
                leg_km: leg.map(|l| l.dst_km),
                leg_dh_m: leg.map(|l| l.dh_m),
                leg_kms: leg.map(|l| l.kms),
                leg_walk_min: leg.map(|l| l.walk_min),
                rest_min: leg.map(|l| l.rest_min).filter(|r| i > 0 && *r > 0),
                clock_min: clock,
                clock: format_clock(clock),
                track_index: track_index,
                anchor: anchor_direction(track, track_index),
            });

            if let Some(leg) = leg {
                km.add(leg.dst_km);
                kms.add(leg.kms);
                clock = add_minutes(add_minutes(clock, leg.rest_min)?, leg.walk_min)?;
            }
        }

        Ok(rows)
    }

    fn summarize(legs: &[LegAggregate], rows: &[ScheduleRow], track: &Track,
                 params: &Params, start: u64) -> Result<Summary> {
        let km: Accumulator = legs.iter().map(|l| l.dst_km).collect();
        let kms: Accumulator = legs.iter().map(|l| l.kms).collect();
        let walked = Itinerary::walk_minutes(kms.total(), params);

        let rest = legs.iter().try_fold(0, |sum, l| add_minutes(sum, l.rest_min))?;

        Ok(Summary {
            min_ele: track.min_elevation().unwrap_or(0.0),
            max_ele: track.max_elevation().unwrap_or(0.0),
            ascent_m: track.elevation(),
            descent_m: track.descent(),
            km: km.total(),
            kms: kms.total(),
            walk_min: whole_minutes(walked)?,
            rest_min: rest,
            start_min: start,
            arrival_min: rows.last().map(|r| r.clock_min).unwrap_or(start),
        })
    }
}
