use crate::coord::Offset;
use crate::path::Track;

use serde::Serialize;
use std::fmt;

// Number of track points looked at on each side of a waypoint
pub const WINDOW: usize = 8;

/// Side of a waypoint on which its label is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Compass {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

// Counter clockwise from east, 45 degrees apart
const SECTORS: [Compass; 8] = [
    Compass::East,
    Compass::NorthEast,
    Compass::North,
    Compass::NorthWest,
    Compass::West,
    Compass::SouthWest,
    Compass::South,
    Compass::SouthEast,
];

impl Compass {
    pub fn from_offset(o: &Offset) -> Option<Compass> {
        if o.abs_sq() == 0.0 || !o.abs_sq().is_finite() {
            return None;
        }

        let sector = (o.angle_deg()/45.0).round() as i64;
        Some(SECTORS[sector.rem_euclid(8) as usize])
    }

    pub fn opposite(&self) -> Compass {
        let i = SECTORS.iter().position(|c| c == self).unwrap_or(0);
        SECTORS[(i + 4)%8]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Compass::East => "east",
            Compass::NorthEast => "north east",
            Compass::North => "north",
            Compass::NorthWest => "north west",
            Compass::West => "west",
            Compass::SouthWest => "south west",
            Compass::South => "south",
            Compass::SouthEast => "south east",
        }
    }

    // Anchor of a text node placed in this direction from its point: a label
    // to the north is anchored at its south side.
    pub fn anchor(&self) -> &'static str {
        self.opposite().name()
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Direction of travel at track point `i`, estimated from up to `WINDOW`
/// points before and after it. Nearer points weigh more.
pub fn tangent(track: &Track, i: usize) -> Offset {
    let mut t = Offset::zero();

    let p = match track.get(i) {
        Some(p) => *p,
        None => {
            return t;
        },
    };

    for k in 1..=WINDOW {
        let w = (WINDOW + 1 - k) as f64;

        if let Some(next) = track.get(i + k) {
            t = t + (*next - p)*w;
        }
        if k <= i {
            t = t + (p - track[i - k])*w;
        }
    }

    t
}

/// Where to put the label of the waypoint at track point `i`: on the left
/// hand side of the direction of travel, so that it does not cover the
/// track. Defaults to north east when the track gives no direction.
pub fn anchor_direction(track: &Track, i: usize) -> Compass {
    Compass::from_offset(&tangent(track, i).left_normal())
        .unwrap_or(Compass::NorthEast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Point;

    fn straight(de: f64, dn: f64) -> Track {
        Track::from_points(
            (0..30).map(|i| Point::new(i as f64*de, i as f64*dn, 0.0)).collect())
    }

    #[test]
    fn sectors() {
        assert_eq!(Compass::from_offset(&Offset::new(1.0, 0.0)), Some(Compass::East));
        assert_eq!(Compass::from_offset(&Offset::new(1.0, 1.0)), Some(Compass::NorthEast));
        assert_eq!(Compass::from_offset(&Offset::new(0.0, -2.0)), Some(Compass::South));
        assert_eq!(Compass::from_offset(&Offset::new(-1.0, -0.1)), Some(Compass::West));
        assert_eq!(Compass::from_offset(&Offset::new(1.0, -0.9)), Some(Compass::SouthEast));
        assert_eq!(Compass::from_offset(&Offset::zero()), None);
    }

    #[test]
    fn anchors_are_opposite() {
        assert_eq!(Compass::North.anchor(), "south");
        assert_eq!(Compass::SouthWest.anchor(), "north east");
        assert_eq!(Compass::East.opposite().opposite(), Compass::East);
    }

    #[test]
    fn label_left_of_travel() {
        // Walking east, the left hand side is north
        let track = straight(10.0, 0.0);
        assert_eq!(anchor_direction(&track, 15), Compass::North);
        // Also at both ends of the track
        assert_eq!(anchor_direction(&track, 0), Compass::North);
        assert_eq!(anchor_direction(&track, 29), Compass::North);

        // Walking north east, the left hand side is north west
        let track = straight(5.0, 5.0);
        assert_eq!(anchor_direction(&track, 10), Compass::NorthWest);
    }

    #[test]
    fn corner_uses_both_sides() {
        // East, then north: the tangent at the corner points north east
        let mut points = vec![];
        for i in 0..10 {
            points.push(Point::new(i as f64*10.0, 0.0, 0.0));
        }
        for i in 1..10 {
            points.push(Point::new(90.0, i as f64*10.0, 0.0));
        }
        let track = Track::from_points(points);

        assert_eq!(anchor_direction(&track, 9), Compass::NorthWest);
    }

    #[test]
    fn degenerate_track() {
        let track = Track::from_points(vec![Point::new(1.0, 1.0, 0.0); 5]);
        assert_eq!(anchor_direction(&track, 2), Compass::NorthEast);
        assert_eq!(anchor_direction(&track, 99), Compass::NorthEast);
    }
}
