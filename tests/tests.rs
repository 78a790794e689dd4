use igrfsyn::error::IgrfError;
use igrfsyn::synthesis::geodetic::GeocentricPosition;
use igrfsyn::{CoefficientTable, CoordinateSystem, Igrf, MagneticField, SpatialPoint};
use is_close::is_close;
use std::fs;

const KNOWN_TABLE: &str = "tests/test_files/igrf13coeffs.txt";

/// Main-field epochs 1900 - 2020 plus the secular variation column.
const NUM_COLUMNS: usize = 26;

/// Builds coefficient text laid out like `igrf13coeffs.txt`, with a smooth, made up field
/// dominated by an axial dipole. As in the published file, epochs before 2000 carry zeros
/// above degree 10.
fn synthetic_coeffs_text() -> String {
    let mut text = String::from(
        "# synthetic coefficients\nc/s DGRF ... IGRF SV\ng/h n m 1900.0 ... 2020.0 2020-25\n",
    );
    for n in 1..=13usize {
        for m in 0..=n {
            let kinds: &[(char, f64)] = if m == 0 {
                &[('g', 0.0)]
            } else {
                &[('g', 0.0), ('h', 1.0)]
            };
            for &(kind, phase) in kinds {
                text.push_str(&format!("{kind} {n} {m}"));
                for column in 0..NUM_COLUMNS {
                    text.push_str(&format!(" {}", synthetic_value(n, m, phase, column)));
                }
                text.push('\n');
            }
        }
    }
    text
}

fn synthetic_value(n: usize, m: usize, phase: f64, column: usize) -> f64 {
    if n > 10 && column < 20 {
        return 0.0;
    }
    let amplitude = if n == 1 {
        5000.0
    } else {
        30000.0 / 8f64.powi(n as i32 - 1)
    };
    let shape = (1.3 * n as f64 + 0.7 * m as f64 + phase).sin();
    let value = if column == NUM_COLUMNS - 1 {
        // secular variation, per year
        0.002 * amplitude * (n as f64 + m as f64).cos()
    } else {
        amplitude * (shape + 0.01 * column as f64 * (n as f64 + m as f64).cos())
    };
    if n == 1 && m == 0 {
        -value.abs() - 25000.0
    } else {
        (value * 100.0).round() / 100.0
    }
}

fn synthetic_model() -> Igrf {
    Igrf::new(CoefficientTable::parse_str(&synthetic_coeffs_text()).unwrap())
}

fn sample_points() -> Vec<SpatialPoint> {
    let mut points = vec![];
    let years = [1900.0, 1937.3, 1994.999, 1995.0, 2003.7, 2019.99, 2020.0, 2027.25];
    for (i, &year) in years.iter().enumerate() {
        for j in 0..6 {
            let lat = -85.0 + 33.0 * j as f64 + i as f64;
            let lon = (47.0 * (i * 6 + j) as f64) % 360.0;
            points.push(SpatialPoint::new(
                year,
                CoordinateSystem::Geodetic,
                -50.0 + 80.0 * j as f64,
                lat,
                lon,
            ));
            points.push(SpatialPoint::new(
                year,
                CoordinateSystem::Geocentric,
                6371.2 + 100.0 * j as f64,
                lat,
                lon,
            ));
        }
    }
    points
}

fn assert_within(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "{actual} differs from {expected} by more than {tol}"
    );
}

#[test]
fn synthetic_table_layout() {
    let table = CoefficientTable::parse_str(&synthetic_coeffs_text()).unwrap();
    // 19 degree-10 epochs, 6 degree-13 epochs, secular variation, sentinel
    assert_eq!(table.len(), 19 * 120 + 7 * 195 + 1);
    assert_eq!(table.values()[table.len() - 1], 0.0);
}

#[test]
fn loading_is_idempotent() {
    let text = synthetic_coeffs_text();
    let a = CoefficientTable::parse_str(&text).unwrap();
    let b = CoefficientTable::parse_str(&text).unwrap();
    assert_eq!(a, b);

    let path = std::env::temp_dir().join(format!("igrfsyn-{}.txt", std::process::id()));
    fs::write(&path, &text).unwrap();
    let c = CoefficientTable::from_path(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(a, c);
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        Igrf::from_path("tests/test_files/does-not-exist.txt"),
        Err(IgrfError::Io(_))
    ));
}

#[test]
fn total_intensity_is_vector_norm() {
    let model = synthetic_model();
    for point in sample_points() {
        let field = model.synthesize_point(&point).unwrap();
        let norm = (field.x * field.x + field.y * field.y + field.z * field.z).sqrt();
        assert!(is_close!(field.f, norm), "{point:?}: {field:?}");
        assert!(field.f > 1000.0);
    }
}

#[test]
fn batch_matches_scalar_calls() {
    let model = synthetic_model();
    let points = sample_points();
    let sequential = model.synthesize_batch(&points);
    let parallel = model.par_synthesize_batch(&points);
    assert_eq!(sequential.len(), points.len());
    assert_eq!(parallel.len(), points.len());

    for ((point, seq), par) in points.iter().zip(sequential).zip(parallel) {
        let scalar = model
            .synthesize(
                point.year,
                point.system,
                point.altitude,
                point.latitude,
                point.longitude,
            )
            .unwrap();
        let (seq, par) = (seq.unwrap(), par.unwrap());
        for (a, b) in [
            (scalar.x, par.x),
            (scalar.y, par.y),
            (scalar.z, par.z),
            (scalar.f, par.f),
        ] {
            assert!(is_close!(a, b), "{point:?}: {a} != {b}");
        }
        assert_eq!(seq, scalar);
    }
}

#[test]
fn batch_keeps_going_past_bad_points() {
    let model = synthetic_model();
    let points = [
        SpatialPoint::new(1899.0, CoordinateSystem::Geodetic, 0.0, 0.0, 0.0),
        SpatialPoint::new(2000.0, CoordinateSystem::Geodetic, 0.0, 0.0, 0.0),
        SpatialPoint::new(2031.0, CoordinateSystem::Geodetic, 0.0, 0.0, 0.0),
    ];
    let results = model.par_synthesize_batch(&points);
    assert!(matches!(results[0], Err(IgrfError::YearOutOfRange(_))));
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(IgrfError::YearOutOfRange(_))));
}

#[test]
fn out_of_range_years_give_sentinel() {
    let model = synthetic_model();
    for year in [1899.0, 2031.0, -5.0, f64::NAN] {
        let (x, y, z, f) = model.synthesize_legacy(year, 1, 0.0, 45.0, 45.0).unwrap();
        assert_eq!((x, y, z, f), (0.0, 0.0, 0.0, 1.0));
    }
    assert!(MagneticField::OUT_OF_RANGE.is_out_of_range());
}

#[test]
fn geodetic_and_geocentric_paths_agree() {
    let model = synthetic_model();
    for (lat, alt) in [(40.0, 0.0), (-62.5, 300.0), (12.0, 35786.0), (0.0, 0.0)] {
        let lon = 116.0;
        let year = 2012.4;
        let colatitude = (90.0_f64 - lat).to_radians();
        let position = GeocentricPosition::geodetic(colatitude, alt);
        let geocentric_lat = 90.0 - position.colatitude().to_degrees();

        let geodetic = model
            .synthesize(year, CoordinateSystem::Geodetic, alt, lat, lon)
            .unwrap();
        let geocentric = model
            .synthesize(year, CoordinateSystem::Geocentric, position.radius, geocentric_lat, lon)
            .unwrap();

        // same physical point: same vector, expressed in frames rotated by the correction
        let (cd, sd) = (position.cos_rotation, position.sin_rotation);
        assert_within(geodetic.f, geocentric.f, 1e-6);
        assert_within(geodetic.y, geocentric.y, 1e-6);
        assert_within(geodetic.x, geocentric.x * cd + geocentric.z * sd, 1e-6);
        assert_within(geodetic.z, geocentric.z * cd - geocentric.x * sd, 1e-6);
    }
}

#[test]
fn continuous_across_era_boundaries() {
    let model = synthetic_model();
    for boundary in [1995.0, 2020.0] {
        for (lat, lon) in [(40.0, 116.0), (-30.0, 300.0), (75.0, 10.0)] {
            let sv = model
                .secular_variation(boundary, CoordinateSystem::Geodetic, 0.0, lat, lon)
                .unwrap();
            let before = model
                .synthesize(boundary - 0.001, CoordinateSystem::Geodetic, 0.0, lat, lon)
                .unwrap();
            let at = model
                .synthesize(boundary, CoordinateSystem::Geodetic, 0.0, lat, lon)
                .unwrap();
            // a thousandth of a year should move the field by about a thousandth of the
            // annual rate; allow generous slack for the kink at the epoch itself
            let allowed = 0.01 * (sv.x.abs() + sv.y.abs() + sv.z.abs()) + 0.5;
            assert_within(before.x, at.x, allowed);
            assert_within(before.y, at.y, allowed);
            assert_within(before.z, at.z, allowed);
        }
    }
}

#[test]
fn geographic_poles_are_finite() {
    let model = synthetic_model();
    for lat in [90.0, -90.0] {
        for system in [CoordinateSystem::Geodetic, CoordinateSystem::Geocentric] {
            let alt = if system == CoordinateSystem::Geodetic { 0.0 } else { 6371.2 };
            let field = model.synthesize(2005.0, system, alt, lat, 30.0).unwrap();
            assert!(field.x.is_finite() && field.y.is_finite() && field.z.is_finite());
            assert!(field.f > 1000.0);
        }
    }
}

#[test]
fn secular_variation_is_symmetric_difference() {
    let model = synthetic_model();
    let system = CoordinateSystem::Geocentric;
    let sv = model.secular_variation(2010.0, system, 7000.0, 20.0, 80.0).unwrap();
    let a = model.synthesize(2009.0, system, 7000.0, 20.0, 80.0).unwrap();
    let b = model.synthesize(2011.0, system, 7000.0, 20.0, 80.0).unwrap();
    assert_eq!(sv.x, (b.x - a.x) / 2.0);
    assert_eq!(sv.z, (b.z - a.z) / 2.0);
    assert_eq!(sv.f, (b.f - a.f) / 2.0);
}

#[test]
fn elements_agree_with_field() {
    let model = synthetic_model();
    let elements = model.value(40.0, 116.0, 300.0, 1999.0).unwrap();
    let field = model
        .synthesize(1999.0, CoordinateSystem::Geodetic, 300.0, 40.0, 116.0)
        .unwrap();
    assert_eq!((elements.x, elements.y, elements.z, elements.total), field.as_tuple());
    assert!(is_close!(
        elements.horizontal,
        (field.x * field.x + field.y * field.y).sqrt()
    ));
    let variation = model.variation(40.0, 116.0, 300.0, 1999.0).unwrap();
    let sv = model
        .secular_variation(1999.0, CoordinateSystem::Geodetic, 300.0, 40.0, 116.0)
        .unwrap();
    assert_eq!((variation.x, variation.y, variation.z), (sv.x, sv.y, sv.z));
}

#[test]
fn published_reference_values() {
    let model = Igrf::from_path(KNOWN_TABLE).unwrap();

    let field = model
        .synthesize(1999.0, CoordinateSystem::Geodetic, 300.0, 40.0, 116.0)
        .unwrap();
    let tol = |v: f64| 1e-6 * v.abs();
    assert_within(field.x, 24653.65386814849, tol(24653.65));
    assert_within(field.y, -2191.674582146139, tol(2191.67));
    assert_within(field.z, 39388.39340198416, tol(39388.39));
    assert_within(field.f, 46519.368238551644, tol(46519.37));

    let (d, i, h, _, _, _, _) = model.value(40.0, 116.0, 300.0, 1999.0).unwrap().as_tuple();
    assert_within(d, -5.080158216428891, 1e-6);
    assert_within(i, 57.85556540804097, 1e-6);
    assert_within(h, 24750.880520185507, tol(24750.88));

    let (dd, di, dh, dx, dy, dz, df) = model
        .variation(40.0, 116.0, 300.0, 1999.0)
        .unwrap()
        .as_tuple();
    assert_within(dd, -0.022800119085463918, 1e-6);
    assert_within(di, 0.04087715389679826, 1e-6);
    assert_within(dh, -19.857404366020084, 1e-4);
    assert_within(dx, -20.65154904740848, 1e-4);
    assert_within(dy, -8.05224429543091, 1e-4);
    assert_within(dz, 30.777595502899203, 1e-4);
    assert_within(df, 15.49444079804009, 1e-4);
}

#[test]
fn published_table_across_eras() {
    let model = Igrf::from_path(KNOWN_TABLE).unwrap();
    assert_eq!(model.table().len(), 3646);

    let cases = [
        // (year, itype, alt, lat, elong) -> (x, y, z, f)
        (
            (1925.3, 1, 10.0, 60.0, 300.0),
            (6788.526137933301, -6927.520148002384, 56453.88113894129, 57281.02057554573),
        ),
        (
            (1990.0, 1, 0.0, -30.0, 20.0),
            (10554.808774204746, -3885.206145493135, -25672.83189941835, 28028.434005288265),
        ),
        (
            (2007.7, 1, 0.0, 0.0, 0.0),
            (27508.12160603585, -3076.0949955361107, -15267.737499741475, 31611.12024391149),
        ),
        (
            (2022.5, 2, 6500.0, 89.5, -70.0),
            (761.168153788272, -1422.6621466488295, 53441.323832915674, 53465.67532124148),
        ),
    ];
    for ((year, itype, alt, lat, elong), (x, y, z, f)) in cases {
        let (ax, ay, az, af) = model
            .synthesize_legacy(year, itype, alt, lat, elong)
            .unwrap();
        assert_within(ax, x, 1e-6);
        assert_within(ay, y, 1e-6);
        assert_within(az, z, 1e-6);
        assert_within(af, f, 1e-6);
    }
}
