use chrono::Utc;
use clap::Parser;
use igrfsyn::utils::time::decimal_year;
use igrfsyn::{CoordinateSystem, GeomagneticElements, Igrf, SpatialPoint};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Latitude in degrees north
    #[arg(required_unless_present = "batch")]
    lat: Option<f64>,

    /// Longitude in degrees east
    #[arg(required_unless_present = "batch")]
    lon: Option<f64>,

    /// Altitude above sea level in km [default: 0], or distance from the Earth's centre in km
    /// with --geocentric, where it must be given
    #[arg(short, long)]
    alt: Option<f64>,

    /// Decimal year, defaults to now
    #[arg(short, long)]
    year: Option<f64>,

    /// Read latitude and altitude as geocentric instead of geodetic
    #[arg(long)]
    geocentric: bool,

    /// Report the annual variation instead of the field
    #[arg(long)]
    variation: bool,

    /// IGRF coefficient file, e.g. igrf13coeffs.txt
    #[arg(long, env = "IGRF_COEFFS")]
    coeffs: PathBuf,

    /// File of whitespace separated `year lat lon alt` lines, evaluated in parallel
    #[arg(long, conflicts_with_all = ["lat", "lon", "variation"])]
    batch: Option<PathBuf>,
}

fn bin_main() -> BinResult<()> {
    let args = Args::parse();
    let model = Igrf::from_path(&args.coeffs)?;
    info!(path = ?args.coeffs, values = model.table().len(), "loaded coefficients");

    let system = if args.geocentric {
        CoordinateSystem::Geocentric
    } else {
        CoordinateSystem::Geodetic
    };

    if let Some(batch) = args.batch {
        let points = read_points(&batch, system)?;
        for (point, res) in points.iter().zip(model.par_synthesize_batch(&points)) {
            match res {
                Ok(f) => println!(
                    "{:.4} {:.4} {:.4} {:.3} {:.3} {:.3} {:.3} {:.3}",
                    point.year, point.latitude, point.longitude, point.altitude, f.x, f.y, f.z, f.f
                ),
                Err(e) => println!(
                    "{:.4} {:.4} {:.4} {:.3} error: {e}",
                    point.year, point.latitude, point.longitude, point.altitude
                ),
            }
        }
        return Ok(());
    }

    let (Some(lat), Some(lon)) = (args.lat, args.lon) else {
        return Err("latitude and longitude are required".into());
    };
    let alt = altitude(args.alt, system)?;
    let year = match args.year {
        Some(year) => year,
        None => decimal_year(Utc::now().naive_utc()).ok_or("current date out of range")?,
    };

    if args.variation {
        let sv = model.secular_variation(year, system, alt, lat, lon)?;
        println!("dX {:.3} nT/yr", sv.x);
        println!("dY {:.3} nT/yr", sv.y);
        println!("dZ {:.3} nT/yr", sv.z);
        println!("dF {:.3} nT/yr", sv.f);
    } else {
        let field = model.synthesize(year, system, alt, lat, lon)?;
        let elements = GeomagneticElements::from_field(&field);
        println!("D {:.4} deg", elements.declination);
        println!("I {:.4} deg", elements.inclination);
        println!("H {:.3} nT", elements.horizontal);
        println!("X {:.3} nT", elements.x);
        println!("Y {:.3} nT", elements.y);
        println!("Z {:.3} nT", elements.z);
        println!("F {:.3} nT", elements.total);
    }
    Ok(())
}

/// Geodetic altitude defaults to sea level; a geocentric radius has no sensible default.
fn altitude(alt: Option<f64>, system: CoordinateSystem) -> BinResult<f64> {
    match (alt, system) {
        (Some(alt), _) => Ok(alt),
        (None, CoordinateSystem::Geodetic) => Ok(0.0),
        (None, CoordinateSystem::Geocentric) => {
            Err("--alt (radius in km) is required with --geocentric".into())
        }
    }
}

/// Reads `year lat lon alt` lines; blank lines and lines starting with `#` are skipped.
fn read_points(path: &PathBuf, system: CoordinateSystem) -> BinResult<Vec<SpatialPoint>> {
    let reader = BufReader::new(File::open(path)?);
    let mut points = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| format!("line {}: {e}", i + 1))?;
        let Some((year, lat, lon, alt)) = values.into_iter().collect_tuple() else {
            return Err(format!("line {}: expected `year lat lon alt`", i + 1).into());
        };
        points.push(SpatialPoint::new(year, system, alt, lat, lon));
    }
    Ok(points)
}
