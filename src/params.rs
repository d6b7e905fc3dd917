use crate::error::{Result, TabellaError};
use crate::schedule::{LunchBreak, RestPolicy};
use crate::waypoint::parse_label;

use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_speed_kmh() -> f64 { 5.0 }
fn default_rest() -> RestPolicy { RestPolicy::Proportional { minutes_per_hour: 15.0 } }
fn default_start_time() -> String { "08:00".to_string() }
fn default_adjustment_factor() -> f64 { 1.0 }
fn default_tolerance_m() -> f64 { 0.1 }

/// Parameters of a marching table, read from a JSON file. Every field has a
/// default, so `{}` is a valid params file.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Params {
    // Walking speed on flat ground, kms per hour
    #[serde(default = "default_speed_kmh")]
    pub speed_kmh: f64,
    #[serde(default = "default_rest")]
    pub rest: RestPolicy,
    #[serde(default = "default_start_time")]
    pub start_time: String,
    // Correction for systematic overestimation of the track length
    #[serde(default = "default_adjustment_factor")]
    pub adjustment_factor: f64,
    // Maximum distance between a waypoint and the track point it marks
    #[serde(default = "default_tolerance_m")]
    pub tolerance_m: f64,
    #[serde(default)]
    pub max_track_points: Option<usize>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub params_fname: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed_kmh: default_speed_kmh(),
            rest: default_rest(),
            start_time: default_start_time(),
            adjustment_factor: default_adjustment_factor(),
            tolerance_m: default_tolerance_m(),
            max_track_points: None,
            title: "".to_string(),
            params_fname: "".to_string(),
        }
    }
}

impl Params {
    pub fn from_json(data: &str) -> Result<Params> {
        Ok(serde_json::from_str::<Params>(data)?)
    }

    pub fn from_file(fname: &str) -> Result<Params> {
        let data = fs::read_to_string(fname)?;
        let mut params = Params::from_json(&data)?;
        params.params_fname = fname.to_string();

        Ok(params)
    }

    pub fn print_params(&self) {
        println!("speed_kmh:          {}", self.speed_kmh);
        match &self.rest {
            RestPolicy::Proportional { minutes_per_hour } => {
                println!("rest:               {} min/h", minutes_per_hour);
            },
            RestPolicy::FixedLunch { minutes_per_hour, lunch } => {
                println!("rest:               {} min/h", minutes_per_hour);
                println!("lunch:              {} min at waypoint {}",
                         lunch.minutes, lunch.waypoint);
            },
        }
        println!("start_time:         {}", self.start_time);
        println!("adjustment_factor:  {}", self.adjustment_factor);
        println!("tolerance_m:        {}", self.tolerance_m);
        match self.max_track_points {
            Some(m) => println!("max_track_points:   {}", m),
            None => println!("max_track_points:   unlimited"),
        }
        println!("title:              {}", &self.title);
        println!("params_fname:       {}", &self.params_fname);
    }

    // Start time as minutes after midnight
    pub fn start_minutes(&self) -> Result<u64> {
        parse_time(&self.start_time)
    }

    pub fn tolerance_km(&self) -> f64 {
        self.tolerance_m/1000.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.speed_kmh > 0.0) || !self.speed_kmh.is_finite() {
            return Err(TabellaError::InvalidParameter(
                format!("speed must be positive, got {}", self.speed_kmh)));
        }

        if !(self.adjustment_factor > 0.0) || !self.adjustment_factor.is_finite() {
            return Err(TabellaError::InvalidParameter(
                format!("adjustment factor must be positive, got {}",
                        self.adjustment_factor)));
        }

        if !(self.tolerance_m > 0.0) {
            return Err(TabellaError::InvalidParameter(
                format!("tolerance must be positive, got {}", self.tolerance_m)));
        }

        if !(self.rest.minutes_per_hour() >= 0.0) {
            return Err(TabellaError::InvalidParameter(
                format!("rest must not be negative, got {}",
                        self.rest.minutes_per_hour())));
        }

        self.start_minutes()?;

        Ok(())
    }

    fn parse_float(value: &str) -> Result<f64> {
        if let Ok(f) = value.parse() {
            Ok(f)
        }
        else {
            Err(TabellaError::InvalidParameter(
                format!("invalid value '{}'", value)))
        }
    }

    // Waypoint given either by label (C, A1) or by position
    fn parse_waypoint(value: &str) -> Result<usize> {
        if let Ok(i) = value.parse() {
            Ok(i)
        }
        else {
            parse_label(value)
        }
    }

    pub fn set(&mut self, param: &str, value: &str) -> Result<()> {
        match param {
            "speed" | "speed_kmh" => {
                self.speed_kmh = Params::parse_float(value)?;
            },
            "rest" | "minutes_per_hour" => {
                let mph = Params::parse_float(value)?;
                self.rest = match &self.rest {
                    RestPolicy::Proportional { .. } => {
                        RestPolicy::Proportional { minutes_per_hour: mph }
                    },
                    RestPolicy::FixedLunch { lunch, .. } => {
                        RestPolicy::FixedLunch {
                            minutes_per_hour: mph,
                            lunch: lunch.clone(),
                        }
                    },
                };
            },
            "lunch" => {
                let mph = self.rest.minutes_per_hour();

                if value == "none" {
                    self.rest = RestPolicy::Proportional { minutes_per_hour: mph };
                }
                else if let Some((_, wp, min)) = regex_captures!(
                    r"^([A-Z][1-9]?|\d+):(\d+)$", value) {
                    self.rest = RestPolicy::FixedLunch {
                        minutes_per_hour: mph,
                        lunch: LunchBreak {
                            waypoint: Params::parse_waypoint(wp)?,
                            minutes: min.parse().map_err(|_| {
                                TabellaError::InvalidParameter(
                                    format!("invalid value '{}'", value))
                            })?,
                        },
                    };
                }
                else {
                    return Err(TabellaError::InvalidParameter(
                        format!("expected <waypoint>:<minutes>, got '{}'", value)));
                }
            },
            "start" | "start_time" => {
                parse_time(value)?;
                self.start_time = value.to_string();
            },
            "adjustment" | "adjustment_factor" => {
                self.adjustment_factor = Params::parse_float(value)?;
            },
            "tolerance" | "tolerance_m" => {
                self.tolerance_m = Params::parse_float(value)?;
            },
            "title" => {
                self.title = value.to_string();
            },
            s => {
                return Err(TabellaError::InvalidParameter(
                    format!("unknown parameter '{}'", s)));
            }
        }

        Ok(())
    }
}

/// Parse `HH:MM` into minutes after midnight.
pub fn parse_time(s: &str) -> Result<u64> {
    if let Some((_, h, m)) = regex_captures!(r"^(\d{1,2}):(\d{2})$", s.trim()) {
        let h: u64 = h.parse().map_err(|_| TabellaError::InvalidTime(s.to_string()))?;
        let m: u64 = m.parse().map_err(|_| TabellaError::InvalidTime(s.to_string()))?;

        if h < 24 && m < 60 {
            return Ok(h*60 + m);
        }
    }

    Err(TabellaError::InvalidTime(s.to_string()))
}
