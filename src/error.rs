use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TabellaError {
    #[error("track has {0} points, at least 2 are needed")]
    EmptyTrack(usize),

    #[error("track has {points} points, limit is {limit}")]
    TrackTooLong { points: usize, limit: usize },

    #[error("waypoint {0} has no label, at most 260 waypoints are supported")]
    LabelOverflow(usize),

    #[error("invalid waypoint label '{0}'")]
    InvalidLabel(String),

    #[error("track never reaches waypoint {label} (#{index}), nearest approach {nearest_m:.1}m")]
    UnmatchedWaypoint {
        label: String,
        index: usize,
        nearest_m: f64,
    },

    #[error("{points} track points follow the final waypoint {label}")]
    UnconsumedTrack { label: String, points: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("coordinate ({e:.0}, {n:.0}) is outside the map sheet grid")]
    OutsideSheetGrid { e: f64, n: f64 },

    #[error("no edition year known for map sheet {0}")]
    UnknownSheet(u64),

    #[error("failed to parse GPX: {0}")]
    Gpx(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TabellaError>;
