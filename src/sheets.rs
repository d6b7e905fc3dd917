//! Sheets of the Swiss 1:25 000 national map covering a track.
//!
//! Sheets form a grid of 18 x 12 km, numbered row by row from the north
//! west corner starting with 1000, 20 sheets per row.

use crate::error::{Result, TabellaError};
use crate::path::Track;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

pub const SHEET_WIDTH: f64 = 18000.0;
pub const SHEET_HEIGHT: f64 = 12000.0;
// North west corner of the grid
pub const GRID_E: f64 = 2480000.0;
pub const GRID_N: f64 = 1302000.0;
pub const SHEETS_PER_ROW: u64 = 20;
pub const FIRST_SHEET: u64 = 1000;

pub fn sheet_id(e: f64, n: f64) -> Result<u64> {
    let x = ((e - GRID_E)/SHEET_WIDTH).floor();
    let y = ((GRID_N - n)/SHEET_HEIGHT).floor();

    if !(x >= 0.0 && y >= 0.0 && x < SHEETS_PER_ROW as f64) {
        return Err(TabellaError::OutsideSheetGrid { e: e, n: n });
    }

    Ok(FIRST_SHEET + (y as u64)*SHEETS_PER_ROW + x as u64)
}

// South west corner of a sheet
pub fn sheet_origin(id: u64) -> Result<(f64, f64)> {
    if id < FIRST_SHEET {
        return Err(TabellaError::UnknownSheet(id));
    }

    let x = ((id - FIRST_SHEET)%SHEETS_PER_ROW) as f64;
    let y = ((id - FIRST_SHEET)/SHEETS_PER_ROW) as f64;

    Ok((GRID_E + x*SHEET_WIDTH, GRID_N - y*SHEET_HEIGHT - SHEET_HEIGHT))
}

/// Area shown on the map: the bounding box of the track with a margin of a
/// fifth of its size on each side.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MapExtent {
    pub min_e: f64,
    pub min_n: f64,
    pub max_e: f64,
    pub max_n: f64,
}

impl MapExtent {
    pub fn around(track: &Track) -> Option<Self> {
        let first = track.first()?;
        let (mut min_e, mut max_e) = (first.e, first.e);
        let (mut min_n, mut max_n) = (first.n, first.n);

        for p in track {
            min_e = min_e.min(p.e);
            max_e = max_e.max(p.e);
            min_n = min_n.min(p.n);
            max_n = max_n.max(p.n);
        }

        let width = (max_e - min_e)*7.0/5.0;
        let height = (max_n - min_n)*7.0/5.0;

        Some(Self {
            min_e: min_e - width/7.0,
            min_n: min_n - height/7.0,
            max_e: max_e + width/7.0,
            max_n: max_n + height/7.0,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_e - self.min_e
    }

    pub fn height(&self) -> f64 {
        self.max_n - self.min_n
    }

    // Enlargement of a sheet needed to fill the page with this extent,
    // never below 1.
    pub fn scale(&self) -> f64 {
        let s = (SHEET_WIDTH/self.width()).min(SHEET_HEIGHT/self.height());

        if s.is_finite() { s.max(1.0) } else { 1.0 }
    }

    // Sheets under the four corners, without duplicates
    pub fn sheets(&self) -> Result<Vec<u64>> {
        let corners = [
            (self.min_e, self.min_n),
            (self.max_e, self.min_n),
            (self.min_e, self.max_n),
            (self.max_e, self.max_n),
        ];
        let mut ids = vec!();

        for (e, n) in corners {
            let id = sheet_id(e, n)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(ids)
    }
}

#[derive(Deserialize)]
struct SheetYear {
    sheet: u64,
    year: u16,
}

/// Edition year of each sheet, needed to address the published raster.
#[derive(Clone, Debug, Default)]
pub struct SheetYears {
    years: HashMap<u64, u16>,
}

impl SheetYears {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut years = HashMap::new();
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for record in rdr.deserialize() {
            let record: SheetYear = record?;
            years.insert(record.sheet, record.year);
        }

        Ok(Self {
            years: years,
        })
    }

    pub fn from_file(fname: &str) -> Result<Self> {
        SheetYears::from_reader(File::open(fname)?)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn year(&self, id: u64) -> Result<u16> {
        self.years.get(&id).copied().ok_or(TabellaError::UnknownSheet(id))
    }
}
