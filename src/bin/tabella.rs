use tabella::{CONFIG, ElevationProfile, Format, Itinerary, MapExtent, Params, Route,
              SheetYears, write_itinerary, write_profile, write_sheets};

use log::{info, LevelFilter};
use std::io;

fn load_params() -> Result<Params, String> {
    let mut params = if CONFIG.params_fname != "" {
        Params::from_file(&CONFIG.params_fname).map_err(|e| e.to_string())?
    }
    else {
        Params::default()
    };

    for (name, value) in CONFIG.param_overrides() {
        params.set(name, value).map_err(|e| e.to_string())?;
    }

    Ok(params)
}

fn run() -> Result<(), String> {
    let format = match Format::from_name(&CONFIG.format) {
        Some(f) => f,
        None => {
            return Err(format!("Invalid format '{}'", CONFIG.format));
        },
    };

    let mut params = load_params()?;

    if CONFIG.command == "params" {
        params.print_params();
        return Ok(());
    }

    let route = Route::from_file(&CONFIG.gpx_fname).map_err(|e| e.to_string())?;
    if params.title == "" {
        params.title = route.name.clone();
    }

    let (waypoints, track) = route.project();
    let mut out = io::stdout().lock();

    match CONFIG.command.as_str() {
        "schedule" => {
            let itinerary = Itinerary::compute(&waypoints, &track, &params)
                .map_err(|e| e.to_string())?;
            write_itinerary(&mut out, &itinerary, format).map_err(|e| e.to_string())?;
        },
        "profile" => {
            let itinerary = Itinerary::compute(&waypoints, &track, &params)
                .map_err(|e| e.to_string())?;
            let profile = ElevationProfile::from_track(&track, &itinerary);
            write_profile(&mut out, &profile, format).map_err(|e| e.to_string())?;
        },
        "sheets" => {
            let extent = MapExtent::around(&track)
                .ok_or("Track has no points".to_string())?;
            let years = if CONFIG.years_fname != "" {
                Some(SheetYears::from_file(&CONFIG.years_fname).map_err(|e| e.to_string())?)
            }
            else {
                None
            };

            info!("Map extent {:.0} x {:.0} m", extent.width(), extent.height());
            write_sheets(&mut out, &extent, years.as_ref(), format)
                .map_err(|e| e.to_string())?;
        },
        cmd => {
            return Err(format!("Invalid command '{}'", cmd));
        },
    }

    Ok(())
}

fn main() -> Result<(), String> {
    let level = if CONFIG.verbose { LevelFilter::Info } else { LevelFilter::Warn };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run()
}
