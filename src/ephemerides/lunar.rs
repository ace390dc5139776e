/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Geocentric lunar ephemeris from the abridged ELP-2000/82 periodic series
//! (the 60-term longitude/distance and latitude tables with the planetary
//! additives), good to a few kilometers in distance and a few arcseconds in
//! longitude over several millennia around J2000.
//!
//! Rates are analytic derivatives of the same series, so velocity is exactly
//! the time derivative of the position model. The output is rotated from the
//! mean equinox of date to J2000 by the accumulated general precession in
//! longitude; the slow drift of the ecliptic plane itself is neglected.

use crate::math::cartesian::StateVector;
use crate::math::{between_0_360, Vector3};

/// Mean Earth-Moon distance subtracted out of the distance series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Seconds per Julian century.
const CENTURY_S: f64 = 36_525.0 * 86_400.0;

/// Accumulated general precession in longitude, degrees for T centuries.
const PRECESSION_DEG: [f64; 2] = [1.396_887_83, 0.000_307_065];

// Fundamental arguments, degrees, as polynomials in Julian centuries.
const LP_POLY: [f64; 5] = [
    218.316_447_7,
    481_267.881_234_21,
    -0.001_578_6,
    1.0 / 538_841.0,
    -1.0 / 65_194_000.0,
];
const D_POLY: [f64; 5] = [
    297.850_192_1,
    445_267.111_403_4,
    -0.001_881_9,
    1.0 / 545_868.0,
    -1.0 / 113_065_000.0,
];
const M_POLY: [f64; 5] = [
    357.529_109_2,
    35_999.050_290_9,
    -0.000_153_6,
    1.0 / 24_490_000.0,
    0.0,
];
const MP_POLY: [f64; 5] = [
    134.963_396_4,
    477_198.867_505_5,
    0.008_741_4,
    1.0 / 69_699.0,
    -1.0 / 14_712_000.0,
];
const F_POLY: [f64; 5] = [
    93.272_095_0,
    483_202.017_523_3,
    -0.003_653_9,
    -1.0 / 3_526_000.0,
    1.0 / 863_310_000.0,
];

fn poly(coeffs: &[f64; 5], t: f64) -> f64 {
    coeffs[0] + t * (coeffs[1] + t * (coeffs[2] + t * (coeffs[3] + t * coeffs[4])))
}

fn poly_rate(coeffs: &[f64; 5], t: f64) -> f64 {
    coeffs[1] + t * (2.0 * coeffs[2] + t * (3.0 * coeffs[3] + t * 4.0 * coeffs[4]))
}

/// One term of the longitude/distance series: integer multipliers of
/// (D, M, M', F), a sine coefficient for longitude (1e-6 deg) and a cosine
/// coefficient for distance (1e-3 km).
struct MainTerm(i8, i8, i8, i8, f64, f64);

/// One term of the latitude series: multipliers and a sine coefficient
/// (1e-6 deg).
struct LatTerm(i8, i8, i8, i8, f64);

#[rustfmt::skip]
const MAIN_TERMS: [MainTerm; 60] = [
    MainTerm(0, 0, 1, 0,  6_288_774.0, -20_905_355.0),
    MainTerm(2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    MainTerm(2, 0, 0, 0,  658_314.0,   -2_955_968.0),
    MainTerm(0, 0, 2, 0,  213_618.0,   -569_925.0),
    MainTerm(0, 1, 0, 0,  -185_116.0,  48_888.0),
    MainTerm(0, 0, 0, 2,  -114_332.0,  -3_149.0),
    MainTerm(2, 0, -2, 0, 58_793.0,    246_158.0),
    MainTerm(2, -1, -1, 0, 57_066.0,   -152_138.0),
    MainTerm(2, 0, 1, 0,  53_322.0,    -170_733.0),
    MainTerm(2, -1, 0, 0, 45_758.0,    -204_586.0),
    MainTerm(0, 1, -1, 0, -40_923.0,   -129_620.0),
    MainTerm(1, 0, 0, 0,  -34_720.0,   108_743.0),
    MainTerm(0, 1, 1, 0,  -30_383.0,   104_755.0),
    MainTerm(2, 0, 0, -2, 15_327.0,    10_321.0),
    MainTerm(0, 0, 1, 2,  -12_528.0,   0.0),
    MainTerm(0, 0, 1, -2, 10_980.0,    79_661.0),
    MainTerm(4, 0, -1, 0, 10_675.0,    -34_782.0),
    MainTerm(0, 0, 3, 0,  10_034.0,    -23_210.0),
    MainTerm(4, 0, -2, 0, 8_548.0,     -21_636.0),
    MainTerm(2, 1, -1, 0, -7_888.0,    24_208.0),
    MainTerm(2, 1, 0, 0,  -6_766.0,    30_824.0),
    MainTerm(1, 0, -1, 0, -5_163.0,    -8_379.0),
    MainTerm(1, 1, 0, 0,  4_987.0,     -16_675.0),
    MainTerm(2, -1, 1, 0, 4_036.0,     -12_831.0),
    MainTerm(2, 0, 2, 0,  3_994.0,     -10_445.0),
    MainTerm(4, 0, 0, 0,  3_861.0,     -11_650.0),
    MainTerm(2, 0, -3, 0, 3_665.0,     14_403.0),
    MainTerm(0, 1, -2, 0, -2_689.0,    -7_003.0),
    MainTerm(2, 0, -1, 2, -2_602.0,    0.0),
    MainTerm(2, -1, -2, 0, 2_390.0,    10_056.0),
    MainTerm(1, 0, 1, 0,  -2_348.0,    6_322.0),
    MainTerm(2, -2, 0, 0, 2_236.0,     -9_884.0),
    MainTerm(0, 1, 2, 0,  -2_120.0,    5_751.0),
    MainTerm(0, 2, 0, 0,  -2_069.0,    0.0),
    MainTerm(2, -2, -1, 0, 2_048.0,    -4_950.0),
    MainTerm(2, 0, 1, -2, -1_773.0,    4_130.0),
    MainTerm(2, 0, 0, 2,  -1_595.0,    0.0),
    MainTerm(4, -1, -1, 0, 1_215.0,    -3_958.0),
    MainTerm(0, 0, 2, 2,  -1_110.0,    0.0),
    MainTerm(3, 0, -1, 0, -892.0,      3_258.0),
    MainTerm(2, 1, 1, 0,  -810.0,      2_616.0),
    MainTerm(4, -1, -2, 0, 759.0,      -1_897.0),
    MainTerm(0, 2, -1, 0, -713.0,      -2_117.0),
    MainTerm(2, 2, -1, 0, -700.0,      2_354.0),
    MainTerm(2, 1, -2, 0, 691.0,       0.0),
    MainTerm(2, -1, 0, -2, 596.0,      0.0),
    MainTerm(4, 0, 1, 0,  549.0,       -1_423.0),
    MainTerm(0, 0, 4, 0,  537.0,       -1_117.0),
    MainTerm(4, -1, 0, 0, 520.0,       -1_571.0),
    MainTerm(1, 0, -2, 0, -487.0,      -1_739.0),
    MainTerm(2, 1, 0, -2, -399.0,      0.0),
    MainTerm(0, 0, 2, -2, -381.0,      -4_421.0),
    MainTerm(1, 1, 1, 0,  351.0,       0.0),
    MainTerm(3, 0, -2, 0, -340.0,      0.0),
    MainTerm(4, 0, -3, 0, 330.0,       0.0),
    MainTerm(2, -1, 2, 0, 327.0,       0.0),
    MainTerm(0, 2, 1, 0,  -323.0,      1_165.0),
    MainTerm(1, 1, -1, 0, 299.0,       0.0),
    MainTerm(2, 0, 3, 0,  294.0,       0.0),
    MainTerm(2, 0, -1, -2, 0.0,        8_752.0),
];

#[rustfmt::skip]
const LAT_TERMS: [LatTerm; 60] = [
    LatTerm(0, 0, 0, 1,  5_128_122.0),
    LatTerm(0, 0, 1, 1,  280_602.0),
    LatTerm(0, 0, 1, -1, 277_693.0),
    LatTerm(2, 0, 0, -1, 173_237.0),
    LatTerm(2, 0, -1, 1, 55_413.0),
    LatTerm(2, 0, -1, -1, 46_271.0),
    LatTerm(2, 0, 0, 1,  32_573.0),
    LatTerm(0, 0, 2, 1,  17_198.0),
    LatTerm(2, 0, 1, -1, 9_266.0),
    LatTerm(0, 0, 2, -1, 8_822.0),
    LatTerm(2, -1, 0, -1, 8_216.0),
    LatTerm(2, 0, -2, -1, 4_324.0),
    LatTerm(2, 0, 1, 1,  4_200.0),
    LatTerm(2, 1, 0, -1, -3_359.0),
    LatTerm(2, -1, -1, 1, 2_463.0),
    LatTerm(2, -1, 0, 1, 2_211.0),
    LatTerm(2, -1, -1, -1, 2_065.0),
    LatTerm(0, 1, -1, -1, -1_870.0),
    LatTerm(4, 0, -1, -1, 1_828.0),
    LatTerm(0, 1, 0, 1,  -1_794.0),
    LatTerm(0, 0, 0, 3,  -1_749.0),
    LatTerm(0, 1, -1, 1, -1_565.0),
    LatTerm(1, 0, 0, 1,  -1_491.0),
    LatTerm(0, 1, 1, 1,  -1_475.0),
    LatTerm(0, 1, 1, -1, -1_410.0),
    LatTerm(0, 1, 0, -1, -1_344.0),
    LatTerm(1, 0, 0, -1, -1_335.0),
    LatTerm(0, 0, 3, 1,  1_107.0),
    LatTerm(4, 0, 0, -1, 1_021.0),
    LatTerm(4, 0, -1, 1, 833.0),
    LatTerm(0, 0, 1, -3, 777.0),
    LatTerm(4, 0, -2, 1, 671.0),
    LatTerm(2, 0, 0, -3, 607.0),
    LatTerm(2, 0, 2, -1, 596.0),
    LatTerm(2, -1, 1, -1, 491.0),
    LatTerm(2, 0, -2, 1, -451.0),
    LatTerm(0, 0, 3, -1, 439.0),
    LatTerm(2, 0, 2, 1,  422.0),
    LatTerm(2, 0, -3, -1, 421.0),
    LatTerm(2, 1, -1, 1, -366.0),
    LatTerm(2, 1, 0, 1,  -351.0),
    LatTerm(4, 0, 0, 1,  331.0),
    LatTerm(2, -1, 1, 1, 315.0),
    LatTerm(2, -2, 0, -1, 302.0),
    LatTerm(0, 0, 1, 3,  -283.0),
    LatTerm(2, 1, 1, -1, -229.0),
    LatTerm(1, 1, 0, -1, 223.0),
    LatTerm(1, 1, 0, 1,  223.0),
    LatTerm(0, 1, -2, -1, -220.0),
    LatTerm(2, 1, -1, -1, -220.0),
    LatTerm(1, 0, 1, -1, -185.0),
    LatTerm(2, -1, -2, -1, 181.0),
    LatTerm(0, 1, 2, 1,  -177.0),
    LatTerm(4, 0, -2, -1, 176.0),
    LatTerm(4, -1, -1, -1, 166.0),
    LatTerm(1, 0, 1, 1,  -164.0),
    LatTerm(4, 0, 1, -1, 132.0),
    LatTerm(1, 0, -1, -1, -119.0),
    LatTerm(4, -1, 0, -1, 115.0),
    LatTerm(2, -2, 0, 1, 107.0),
];

/// Ecliptic-of-date longitude (deg), latitude (deg) and distance (km) plus
/// their rates per Julian century, at T Julian centuries past J2000.
fn spherical_with_rates(t: f64) -> ([f64; 3], [f64; 3]) {
    let lp = poly(&LP_POLY, t);
    let d = poly(&D_POLY, t);
    let m = poly(&M_POLY, t);
    let mp = poly(&MP_POLY, t);
    let f = poly(&F_POLY, t);
    let lp_rate = poly_rate(&LP_POLY, t);
    let d_rate = poly_rate(&D_POLY, t);
    let m_rate = poly_rate(&M_POLY, t);
    let mp_rate = poly_rate(&MP_POLY, t);
    let f_rate = poly_rate(&F_POLY, t);

    // Eccentricity-of-Earth damping of terms involving the solar anomaly.
    let e = 1.0 - t * (0.002_516 + t * 0.000_007_4);

    let mut lon_e6 = 0.0;
    let mut lon_rate_e6 = 0.0;
    let mut dist_e3 = 0.0;
    let mut dist_rate_e3 = 0.0;
    for MainTerm(cd, cm, cmp, cf, sin_coeff, cos_coeff) in &MAIN_TERMS {
        let (cd, cm, cmp, cf) = (*cd as f64, *cm as f64, *cmp as f64, *cf as f64);
        let arg_deg = cd * d + cm * m + cmp * mp + cf * f;
        let arg_rate_deg = cd * d_rate + cm * m_rate + cmp * mp_rate + cf * f_rate;
        let damp = match cm.abs() as u32 {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        let (sin_arg, cos_arg) = arg_deg.to_radians().sin_cos();
        lon_e6 += sin_coeff * damp * sin_arg;
        lon_rate_e6 += sin_coeff * damp * cos_arg * arg_rate_deg.to_radians();
        dist_e3 += cos_coeff * damp * cos_arg;
        dist_rate_e3 -= cos_coeff * damp * sin_arg * arg_rate_deg.to_radians();
    }

    let mut lat_e6 = 0.0;
    let mut lat_rate_e6 = 0.0;
    for LatTerm(cd, cm, cmp, cf, sin_coeff) in &LAT_TERMS {
        let (cd, cm, cmp, cf) = (*cd as f64, *cm as f64, *cmp as f64, *cf as f64);
        let arg_deg = cd * d + cm * m + cmp * mp + cf * f;
        let arg_rate_deg = cd * d_rate + cm * m_rate + cmp * mp_rate + cf * f_rate;
        let damp = match cm.abs() as u32 {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        let (sin_arg, cos_arg) = arg_deg.to_radians().sin_cos();
        lat_e6 += sin_coeff * damp * sin_arg;
        lat_rate_e6 += sin_coeff * damp * cos_arg * arg_rate_deg.to_radians();
    }

    // Planetary additives (Venus, Jupiter, flattening).
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    let (sin_a1, cos_a1) = a1.to_radians().sin_cos();
    let (sin_a2, cos_a2) = a2.to_radians().sin_cos();
    let (sin_lpf, cos_lpf) = (lp - f).to_radians().sin_cos();
    lon_e6 += 3_958.0 * sin_a1 + 1_962.0 * sin_lpf + 318.0 * sin_a2;
    lon_rate_e6 += 3_958.0 * cos_a1 * 131.849_f64.to_radians()
        + 1_962.0 * cos_lpf * (lp_rate - f_rate).to_radians()
        + 318.0 * cos_a2 * 479_264.290_f64.to_radians();

    let (sin_lp, cos_lp) = lp.to_radians().sin_cos();
    let (sin_a3, cos_a3) = a3.to_radians().sin_cos();
    let (sin_a1mf, cos_a1mf) = (a1 - f).to_radians().sin_cos();
    let (sin_a1pf, cos_a1pf) = (a1 + f).to_radians().sin_cos();
    let (sin_lpmmp, cos_lpmmp) = (lp - mp).to_radians().sin_cos();
    let (sin_lppmp, cos_lppmp) = (lp + mp).to_radians().sin_cos();
    lat_e6 += -2_235.0 * sin_lp
        + 382.0 * sin_a3
        + 175.0 * sin_a1mf
        + 175.0 * sin_a1pf
        + 127.0 * sin_lpmmp
        - 115.0 * sin_lppmp;
    lat_rate_e6 += -2_235.0 * cos_lp * lp_rate.to_radians()
        + 382.0 * cos_a3 * 481_266.484_f64.to_radians()
        + 175.0 * cos_a1mf * (131.849 - f_rate).to_radians()
        + 175.0 * cos_a1pf * (131.849 + f_rate).to_radians()
        + 127.0 * cos_lpmmp * (lp_rate - mp_rate).to_radians()
        - 115.0 * cos_lppmp * (lp_rate + mp_rate).to_radians();

    let lon_deg = lp + lon_e6 / 1.0e6;
    let lon_rate_deg = lp_rate + lon_rate_e6 / 1.0e6;
    let lat_deg = lat_e6 / 1.0e6;
    let lat_rate_deg = lat_rate_e6 / 1.0e6;
    let dist_km = MEAN_DISTANCE_KM + dist_e3 / 1.0e3;
    let dist_rate_km = dist_rate_e3 / 1.0e3;
    (
        [lon_deg, lat_deg, dist_km],
        [lon_rate_deg, lat_rate_deg, dist_rate_km],
    )
}

/// Ecliptic-of-date spherical coordinates of the Moon: longitude and latitude
/// in degrees, distance in km. Matches the published worked examples of the
/// abridged series directly.
pub fn mean_of_date_spherical(t_centuries: f64) -> (f64, f64, f64) {
    let ([lon, lat, dist], _) = spherical_with_rates(t_centuries);
    (between_0_360(lon), lat, dist)
}

/// Geocentric Cartesian state of the Moon in the J2000 ecliptic frame, SI
/// units, at T Julian centuries past J2000.
pub fn geocentric_state(t_centuries: f64) -> StateVector {
    let ([lon_deg, lat_deg, dist_km], [lon_rate, lat_rate, dist_rate_km]) =
        spherical_with_rates(t_centuries);

    // Refer the longitude to the J2000 equinox.
    let precession_deg = t_centuries * (PRECESSION_DEG[0] + t_centuries * PRECESSION_DEG[1]);
    let precession_rate_deg = PRECESSION_DEG[0] + 2.0 * t_centuries * PRECESSION_DEG[1];
    let lon_j2000_rad = (lon_deg - precession_deg).to_radians();
    let lon_rate_rad = (lon_rate - precession_rate_deg).to_radians() / CENTURY_S;
    let lat_rad = lat_deg.to_radians();
    let lat_rate_rad = lat_rate.to_radians() / CENTURY_S;
    let dist_m = dist_km * 1.0e3;
    let dist_rate_m = dist_rate_km * 1.0e3 / CENTURY_S;

    let (sin_lon, cos_lon) = lon_j2000_rad.sin_cos();
    let (sin_lat, cos_lat) = lat_rad.sin_cos();

    let position_m = Vector3::new(
        dist_m * cos_lat * cos_lon,
        dist_m * cos_lat * sin_lon,
        dist_m * sin_lat,
    );
    let velocity_m_s = Vector3::new(
        dist_rate_m * cos_lat * cos_lon
            - dist_m * sin_lat * lat_rate_rad * cos_lon
            - dist_m * cos_lat * sin_lon * lon_rate_rad,
        dist_rate_m * cos_lat * sin_lon - dist_m * sin_lat * lat_rate_rad * sin_lon
            + dist_m * cos_lat * cos_lon * lon_rate_rad,
        dist_rate_m * sin_lat + dist_m * cos_lat * lat_rate_rad,
    );
    StateVector::new(position_m, velocity_m_s)
}
