use crate::accumulator::Accumulator;
use crate::coord::distance;
use crate::path::Track;
use crate::schedule::Itinerary;

use serde::Serialize;

// Upper bound of samples drawn for the profile line
pub const MAX_SAMPLES: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ProfileSample {
    pub km: f64,
    pub ele: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileMarker {
    pub label: String,
    pub km: f64,
    pub ele: f64,
}

/// Elevation over distance along the track, thinned out for plotting, with
/// the waypoints marked on it.
#[derive(Clone, Debug, Serialize)]
pub struct ElevationProfile {
    pub samples: Vec<ProfileSample>,
    pub markers: Vec<ProfileMarker>,
    pub km: f64,
    pub min_ele: f64,
    pub max_ele: f64,
}

// Linear map of n from [nmin, nmax] onto [min, max]
pub fn scale(n: f64, nmin: f64, nmax: f64, min: f64, max: f64) -> f64 {
    if nmax == nmin {
        return min;
    }

    (n - nmin)*(max - min)/(nmax - nmin) + min
}

impl ElevationProfile {
    pub fn from_track(track: &Track, itinerary: &Itinerary) -> Self {
        let len = track.num_points();
        let step = (len/MAX_SAMPLES).max(1);
        let mut samples = vec!();
        let mut km = Accumulator::new();

        for (i, p) in track.into_iter().enumerate() {
            if i > 0 {
                km.add(distance(&track[i - 1], p));
            }

            if i%step == 0 || i + 1 == len {
                samples.push(ProfileSample {
                    km: km.total(),
                    ele: p.ele,
                });
            }
        }

        let markers = itinerary.rows.iter()
            .map(|r| ProfileMarker {
                label: r.label.clone(),
                km: r.km,
                ele: r.ele,
            })
            .collect();

        Self {
            samples: samples,
            markers: markers,
            km: km.total(),
            min_ele: track.min_elevation().unwrap_or(0.0),
            max_ele: track.max_elevation().unwrap_or(0.0),
        }
    }

    // Samples mapped into a plot area of the given size, with the altitude
    // axis running from 0 to `ele_top`.
    pub fn plot(&self, width: f64, height: f64, ele_top: f64) -> Vec<(f64, f64)> {
        self.samples.iter()
            .map(|s| (scale(s.km, 0.0, self.km, 0.0, width),
                      scale(s.ele, 0.0, ele_top, 0.0, height)))
            .collect()
    }
}
