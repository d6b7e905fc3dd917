use crate::coord::{GeoPoint, Point};
use crate::error::{Result, TabellaError};
use crate::path::Track;

use gpx::Gpx;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};

/// Waypoints and track of a planned hike, as read from a GPX file.
#[derive(Clone, Debug, Default)]
pub struct Route {
    pub name: String,
    pub waypoints: Vec<GeoPoint>,
    pub trackpoints: Vec<GeoPoint>,
}

fn geo_point(p: geo_types::Point<f64>, ele: Option<f64>) -> GeoPoint {
    GeoPoint::new(p.y(), p.x(), ele.unwrap_or(0.0))
}

impl Route {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            waypoints: vec!(),
            trackpoints: vec!(),
        }
    }

    pub fn add_waypoint(&mut self, p: geo_types::Point<f64>, ele: f64) {
        self.waypoints.push(geo_point(p, Some(ele)));
    }

    pub fn add_trackpoint(&mut self, p: geo_types::Point<f64>, ele: f64) {
        self.trackpoints.push(geo_point(p, Some(ele)));
    }

    // All segments of all tracks are joined into one track. Points without
    // elevation are put at 0 m.
    pub fn from_gpx(gpx: &Gpx) -> Self {
        let name = gpx.metadata.as_ref()
            .and_then(|m| m.name.clone())
            .or_else(|| gpx.tracks.iter().find_map(|t| t.name.clone()))
            .unwrap_or("[unnamed]".to_string());

        let waypoints = gpx.waypoints.iter()
            .map(|wp| geo_point(wp.point(), wp.elevation))
            .collect();

        let mut trackpoints = vec!();

        for track in &gpx.tracks {
            for segment in &track.segments {
                for wp in &segment.points {
                    trackpoints.push(geo_point(wp.point(), wp.elevation));
                }
            }
        }

        Self {
            name: name,
            waypoints: waypoints,
            trackpoints: trackpoints,
        }
    }

    pub fn read_gpx<R: Read>(reader: R) -> Result<Self> {
        let gpx: Gpx = gpx::read(reader)
            .map_err(|e| TabellaError::Gpx(e.to_string()))?;
        let route = Route::from_gpx(&gpx);

        debug!("Route '{}': {} waypoints, {} track points",
               route.name, route.waypoints.len(), route.trackpoints.len());

        Ok(route)
    }

    pub fn from_file(fname: &str) -> Result<Self> {
        let file = File::open(fname)?;
        let route = Route::read_gpx(BufReader::new(file))?;

        info!("Read {} from {}", route.name, fname);

        Ok(route)
    }

    /// Waypoints and track in the LV95 grid.
    pub fn project(&self) -> (Vec<Point>, Track) {
        let waypoints = self.waypoints.iter().map(|p| p.project()).collect();
        let track = Track::from_points(
            self.trackpoints.iter().map(|p| p.project()).collect());

        (waypoints, track)
    }
}
