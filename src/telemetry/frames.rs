use std::f64::consts::PI;

use chrono::{Datelike, Timelike};
use serde::Deserialize;

use super::epoch::{parse_epoch, Timestamp};
use super::error::TelemetryError;
use super::types::GeodeticPosition;

// WGS-84 ellipsoid
pub const WGS84_SEMI_MAJOR_KM: f64 = 6378.137;
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);
const GEODETIC_TOLERANCE_RAD: f64 = 1e-12;
const GEODETIC_MAX_ITERATIONS: usize = 20;
// Below this cos(latitude) the height is taken from the polar axis instead.
const NEAR_POLE_COS_LAT: f64 = 0.1;

type Matrix3 = [[f64; 3]; 3];

/// Which instant the inertial to Earth-fixed rotation is evaluated at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ObservationClock {
    /// The sample's own epoch.
    #[default]
    Epoch,
    /// `HH:<month>:SS` of the epoch's date, whole seconds only. This is the
    /// instant the first public version of the service rotated at, kept so
    /// its published coordinates can be reproduced.
    LegacyMonthMinutes,
}

impl ObservationClock {
    pub fn observation_instant(&self, epoch: Timestamp) -> Result<Timestamp, TelemetryError> {
        match self {
            ObservationClock::Epoch => Ok(epoch),
            ObservationClock::LegacyMonthMinutes => epoch
                .date_naive()
                .and_hms_opt(epoch.hour(), epoch.month(), epoch.second())
                .map(|t| t.and_utc())
                .ok_or_else(|| {
                    TelemetryError::Conversion(format!("no legacy observation time for {epoch}"))
                }),
        }
    }
}

/// Geodetic position of an inertial (EME2000) position vector, in km, at `at`.
pub fn to_geodetic(position_km: [f64; 3], at: Timestamp) -> Result<GeodeticPosition, TelemetryError> {
    if position_km.iter().any(|c| !c.is_finite()) {
        return Err(TelemetryError::Conversion(format!(
            "non-finite position {position_km:?}"
        )));
    }
    let fixed = inertial_to_earth_fixed(position_km, at);
    ecef_to_geodetic(fixed)
}

/// Parses `epoch` and converts the position at the instant selected by `clock`.
pub fn geodetic_at_epoch(
    x_km: f64,
    y_km: f64,
    z_km: f64,
    epoch: &str,
    clock: ObservationClock,
) -> Result<GeodeticPosition, TelemetryError> {
    let epoch = parse_epoch(epoch)?;
    to_geodetic([x_km, y_km, z_km], clock.observation_instant(epoch)?)
}

/// Rotates a mean-of-J2000 position into the Earth-fixed frame: precession,
/// then nutation, then Greenwich apparent sidereal time. Polar motion and
/// UT1-UTC are neglected.
pub fn inertial_to_earth_fixed(position_km: [f64; 3], at: Timestamp) -> [f64; 3] {
    let years = sgp4::julian_years_since_j2000(&at.naive_utc());
    let centuries = years / 100.0;

    let nutation = Nutation::at(centuries);
    let gast = sgp4::iau_epoch_to_sidereal_time(years) + nutation.equation_of_equinoxes();

    let rotation = mat_mul(
        r3(gast),
        mat_mul(nutation.matrix(), precession_matrix(centuries)),
    );
    mat_vec(rotation, position_km)
}

/// IAU 1976 precession from J2000 to the mean equator and equinox of date.
fn precession_matrix(t: f64) -> Matrix3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta = (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * ARCSEC_TO_RAD;
    let z = (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * ARCSEC_TO_RAD;
    let theta = (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * ARCSEC_TO_RAD;
    mat_mul(r3(-z), mat_mul(r2(theta), r3(-zeta)))
}

struct NutationTerm {
    // l, l', F, D, Omega
    multipliers: [f64; 5],
    // units of 0.1 mas: (constant, per century)
    longitude: (f64, f64),
    obliquity: (f64, f64),
}

const fn term(multipliers: [f64; 5], longitude: (f64, f64), obliquity: (f64, f64)) -> NutationTerm {
    NutationTerm {
        multipliers,
        longitude,
        obliquity,
    }
}

/// IAU 1980 nutation series, terms of 5 mas and larger.
const NUTATION_SERIES: [NutationTerm; 18] = [
    term([0.0, 0.0, 0.0, 0.0, 1.0], (-171996.0, -174.2), (92025.0, 8.9)),
    term([0.0, 0.0, 2.0, -2.0, 2.0], (-13187.0, -1.6), (5736.0, -3.1)),
    term([0.0, 0.0, 2.0, 0.0, 2.0], (-2274.0, -0.2), (977.0, -0.5)),
    term([0.0, 0.0, 0.0, 0.0, 2.0], (2062.0, 0.2), (-895.0, 0.5)),
    term([0.0, 1.0, 0.0, 0.0, 0.0], (1426.0, -3.4), (54.0, -0.1)),
    term([1.0, 0.0, 0.0, 0.0, 0.0], (712.0, 0.1), (-7.0, 0.0)),
    term([0.0, 1.0, 2.0, -2.0, 2.0], (-517.0, 1.2), (224.0, -0.6)),
    term([0.0, 0.0, 2.0, 0.0, 1.0], (-386.0, -0.4), (200.0, 0.0)),
    term([1.0, 0.0, 2.0, 0.0, 2.0], (-301.0, 0.0), (129.0, -0.1)),
    term([0.0, -1.0, 2.0, -2.0, 2.0], (217.0, -0.5), (-95.0, 0.3)),
    term([1.0, 0.0, 0.0, -2.0, 0.0], (-158.0, 0.0), (-1.0, 0.0)),
    term([0.0, 0.0, 2.0, -2.0, 1.0], (129.0, 0.1), (-70.0, 0.0)),
    term([-1.0, 0.0, 2.0, 0.0, 2.0], (123.0, 0.0), (-53.0, 0.0)),
    term([1.0, 0.0, 0.0, 0.0, 1.0], (63.0, 0.1), (-33.0, 0.0)),
    term([0.0, 0.0, 0.0, 2.0, 0.0], (63.0, 0.0), (-2.0, 0.0)),
    term([-1.0, 0.0, 2.0, 2.0, 2.0], (-59.0, 0.0), (26.0, 0.0)),
    term([-1.0, 0.0, 0.0, 0.0, 1.0], (-58.0, -0.1), (32.0, 0.0)),
    term([1.0, 0.0, 2.0, 0.0, 1.0], (-51.0, 0.0), (27.0, 0.0)),
];

/// Delaunay arguments l, l', F, D, Omega: (degrees at J2000, arcsec per century).
const FUNDAMENTAL_ARGUMENTS: [(f64, f64); 5] = [
    (134.963_402_51, 1_717_915_923.2178),
    (357.529_109_18, 129_596_581.0481),
    (93.272_090_62, 1_739_527_262.8478),
    (297.850_195_47, 1_602_961_601.2090),
    (125.044_555_01, -6_962_890.5431),
];

struct Nutation {
    mean_obliquity: f64,
    delta_psi: f64,
    delta_epsilon: f64,
}

impl Nutation {
    fn at(t: f64) -> Self {
        let arguments = FUNDAMENTAL_ARGUMENTS
            .map(|(deg, rate)| (deg + rate * t / 3600.0).rem_euclid(360.0).to_radians());

        let (mut delta_psi, mut delta_epsilon) = (0.0, 0.0);
        for term in &NUTATION_SERIES {
            let angle: f64 = term
                .multipliers
                .iter()
                .zip(arguments.iter())
                .map(|(m, a)| m * a)
                .sum();
            delta_psi += (term.longitude.0 + term.longitude.1 * t) * angle.sin();
            delta_epsilon += (term.obliquity.0 + term.obliquity.1 * t) * angle.cos();
        }

        let t2 = t * t;
        Self {
            mean_obliquity: (84381.448 - 46.8150 * t - 0.00059 * t2 + 0.001813 * t2 * t)
                * ARCSEC_TO_RAD,
            delta_psi: delta_psi * 1e-4 * ARCSEC_TO_RAD,
            delta_epsilon: delta_epsilon * 1e-4 * ARCSEC_TO_RAD,
        }
    }

    fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.delta_epsilon
    }

    fn equation_of_equinoxes(&self) -> f64 {
        self.delta_psi * self.true_obliquity().cos()
    }

    fn matrix(&self) -> Matrix3 {
        mat_mul(
            r1(-self.true_obliquity()),
            mat_mul(r3(-self.delta_psi), r1(self.mean_obliquity)),
        )
    }
}

/// Earth-fixed Cartesian (km) to WGS-84 latitude, longitude and height.
///
/// Latitude is iterated from the geocentric value until it moves by less than
/// 1e-12 rad (Vallado, algorithm 12).
pub fn ecef_to_geodetic(ecef_km: [f64; 3]) -> Result<GeodeticPosition, TelemetryError> {
    let [x, y, z] = ecef_km;
    let r_delta = x.hypot(y);
    let r = (x * x + y * y + z * z).sqrt();
    if !(r > 0.0) || !r.is_finite() {
        return Err(TelemetryError::Conversion(format!(
            "position {ecef_km:?} has no geodetic equivalent"
        )));
    }

    let e2 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
    let radius_of_curvature =
        |lat: f64| WGS84_SEMI_MAJOR_KM / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    let mut latitude = (z / r).asin();
    let mut converged = false;
    for _ in 0..GEODETIC_MAX_ITERATIONS {
        let next = (z + radius_of_curvature(latitude) * e2 * latitude.sin()).atan2(r_delta);
        let step = (next - latitude).abs();
        latitude = next;
        if step < GEODETIC_TOLERANCE_RAD {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(TelemetryError::Conversion(format!(
            "latitude did not converge for {ecef_km:?}"
        )));
    }

    let c_earth = radius_of_curvature(latitude);
    let altitude_km = if latitude.cos() > NEAR_POLE_COS_LAT {
        r_delta / latitude.cos() - c_earth
    } else {
        z / latitude.sin() - c_earth * (1.0 - e2)
    };

    Ok(GeodeticPosition {
        latitude_deg: latitude.to_degrees(),
        longitude_deg: y.atan2(x).to_degrees(),
        altitude_km,
    })
}

fn r1(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]]
}

fn r2(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]]
}

fn r3(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]]
}

fn mat_mul(a: Matrix3, b: Matrix3) -> Matrix3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn mat_vec(m: Matrix3, v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}
