mod accumulator;
mod config;
mod coord;
mod direction;
mod error;
mod leg;
mod params;
mod path;
mod profile;
mod report;
mod route;
mod schedule;
mod sheets;
mod waypoint;

pub use crate::accumulator::Accumulator;
pub use crate::config::{Config, CONFIG};
pub use crate::coord::{distance, ellipsoidal_distance, wgs84_to_lv95, GeoPoint, Offset, Point};
pub use crate::direction::{anchor_direction, tangent, Compass};
pub use crate::error::{Result, TabellaError};
pub use crate::leg::{sweep, ClosedLeg, LegSweep, DEFAULT_TOLERANCE_KM};
pub use crate::params::{parse_time, Params};
pub use crate::path::{Segment, Track};
pub use crate::profile::{ElevationProfile, ProfileMarker, ProfileSample};
pub use crate::report::{write_itinerary, write_profile, write_sheets, Format};
pub use crate::route::Route;
pub use crate::schedule::{format_clock, format_duration, round5, Itinerary, LegAggregate,
                          LunchBreak, RestPolicy, ScheduleRow, Summary};
pub use crate::sheets::{sheet_id, sheet_origin, MapExtent, SheetYears};
pub use crate::waypoint::{label, parse_label, Waypoint, MAX_WAYPOINTS};
