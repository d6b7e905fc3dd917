//! Output of marching tables, profiles and sheet lists.

use crate::error::Result;
use crate::profile::ElevationProfile;
use crate::schedule::{format_clock, format_duration, Itinerary};
use crate::sheets::{MapExtent, SheetYears};

use serde::Serialize;
use std::io::Write;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Format {
    Table,
    Csv,
    Json,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Format> {
        match name {
            "table" => Some(Format::Table),
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

fn opt_f64(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(v) => format!("{:.*}", precision, v),
        None => "".to_string(),
    }
}

fn opt_min(v: Option<u64>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => "".to_string(),
    }
}

pub fn write_table<W: Write>(out: &mut W, itinerary: &Itinerary) -> Result<()> {
    let s = &itinerary.summary;

    if itinerary.title != "" {
        writeln!(out, "{}", itinerary.title)?;
        writeln!(out)?;
    }

    writeln!(out, "{:<3} {:>7} {:>7} {:>5} {:>7} {:>6} {:>6} {:>6} {:>5} {:>4} {:>5}",
             "", "E", "N", "m", "km", "leg", "dh", "kms", "walk", "rest", "time")?;

    for r in &itinerary.rows {
        writeln!(out, "{:<3} {:>7} {:>7} {:>5.0} {:>7.2} {:>6} {:>6} {:>6} {:>5} {:>4} {:>5}",
                 r.label, r.e, r.n, r.ele, r.km,
                 opt_f64(r.leg_km, 2), opt_f64(r.leg_dh_m, 0), opt_f64(r.leg_kms, 2),
                 opt_min(r.leg_walk_min), opt_min(r.rest_min), r.clock)?;
    }

    writeln!(out)?;
    writeln!(out, "Distance     {:.2} km ({:.2} kms)", s.km, s.kms)?;
    writeln!(out, "Ascent       {:.0} m, descent {:.0} m", s.ascent_m, s.descent_m)?;
    writeln!(out, "Altitude     {:.0} to {:.0} m", s.min_ele, s.max_ele)?;
    writeln!(out, "Walking      {} at {} kms/h, rests {}",
             format_duration(s.walk_min), itinerary.speed_kmh,
             format_duration(s.rest_min))?;
    writeln!(out, "Start        {}, arrival {}",
             format_clock(s.start_min), format_clock(s.arrival_min))?;

    Ok(())
}

fn write_csv_rows<W: Write, T: Serialize>(out: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;

    Ok(())
}

pub fn write_itinerary<W: Write>(out: &mut W, itinerary: &Itinerary, format: Format)
                                 -> Result<()> {
    match format {
        Format::Table => write_table(out, itinerary),
        Format::Csv => write_csv_rows(out, &itinerary.rows),
        Format::Json => write_json(out, itinerary),
    }
}

pub fn write_profile<W: Write>(out: &mut W, profile: &ElevationProfile, format: Format)
                               -> Result<()> {
    match format {
        Format::Json => write_json(out, profile),
        Format::Csv => write_csv_rows(out, &profile.samples),
        Format::Table => {
            for s in &profile.samples {
                writeln!(out, "{:>8.3} {:>6.0}", s.km, s.ele)?;
            }
            for m in &profile.markers {
                writeln!(out, "{:<3} {:>8.3} {:>6.0}", m.label, m.km, m.ele)?;
            }

            Ok(())
        },
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SheetLine {
    pub sheet: u64,
    pub year: Option<u16>,
}

pub fn sheet_lines(extent: &MapExtent, years: Option<&SheetYears>)
                   -> Result<Vec<SheetLine>> {
    let mut lines = vec!();

    for id in extent.sheets()? {
        let year = match years {
            Some(y) => Some(y.year(id)?),
            None => None,
        };

        lines.push(SheetLine {
            sheet: id,
            year: year,
        });
    }

    Ok(lines)
}

pub fn write_sheets<W: Write>(out: &mut W, extent: &MapExtent, years: Option<&SheetYears>,
                              format: Format) -> Result<()> {
    let lines = sheet_lines(extent, years)?;

    match format {
        Format::Json => write_json(out, &lines),
        Format::Csv => write_csv_rows(out, &lines),
        Format::Table => {
            writeln!(out, "scale {:.2}", extent.scale())?;
            for l in &lines {
                match l.year {
                    Some(y) => writeln!(out, "{} ({})", l.sheet, y)?,
                    None => writeln!(out, "{}", l.sheet)?,
                }
            }

            Ok(())
        },
    }
}
