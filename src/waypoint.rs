use crate::coord::Point;
use crate::error::{Result, TabellaError};
use crate::path::Track;

use log::warn;
use serde::Serialize;
use std::fmt;

// 26 letters times the digits 0 (omitted) to 9
pub const MAX_WAYPOINTS: usize = 260;

/// Display code of the waypoint at position `idx`: A..Z, then A1..Z1, up to
/// Z9.
pub fn label(idx: usize) -> Result<String> {
    if idx >= MAX_WAYPOINTS {
        return Err(TabellaError::LabelOverflow(idx));
    }

    let mut s = String::with_capacity(2);
    s.push((b'A' + (idx%26) as u8) as char);

    let round = idx/26;
    if round > 0 {
        s.push((b'0' + round as u8) as char);
    }

    Ok(s)
}

pub fn parse_label(s: &str) -> Result<usize> {
    let invalid = || TabellaError::InvalidLabel(s.to_string());
    let mut chars = s.chars();

    let letter = chars.next().ok_or_else(invalid)?;
    if !letter.is_ascii_uppercase() {
        return Err(invalid());
    }
    let mut idx = (letter as u8 - b'A') as usize;

    match chars.next() {
        Some(d) if ('1'..='9').contains(&d) => {
            idx += 26*(d as u8 - b'0') as usize;
        },
        Some(_) => {
            return Err(invalid());
        },
        None => { },
    }

    if chars.next().is_some() {
        return Err(invalid());
    }

    Ok(idx)
}

#[derive(Clone, Debug, Serialize)]
pub struct Waypoint {
    pub index: usize,
    pub label: String,
    pub point: Point,
}

impl Waypoint {
    pub fn new(index: usize, point: Point) -> Result<Self> {
        Ok(Self {
            index: index,
            label: label(index)?,
            point: point,
        })
    }

    // Number and label the given points. With less than two points, start
    // and end of the track are used instead.
    pub fn from_points(points: &[Point], track: &Track) -> Result<Vec<Waypoint>> {
        let points = if points.len() < 2 {
            match (track.first(), track.last()) {
                (Some(a), Some(b)) if track.num_points() >= 2 => {
                    warn!("{} waypoint(s) given, using start and end of track",
                          points.len());
                    vec![*a, *b]
                },
                _ => {
                    return Err(TabellaError::EmptyTrack(track.num_points()));
                },
            }
        }
        else {
            points.to_vec()
        };

        points.into_iter()
            .enumerate()
            .map(|(i, p)| Waypoint::new(i, p))
            .collect()
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_fmt(format_args!("{} {}", self.label, self.point))
    }
}
