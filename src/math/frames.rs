/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The two inertial frames HELION speaks: the J2000 mean equator frame (the
//! root frame of NAIF kernels) and the J2000 ecliptic frame (the working
//! frame of every ephemeris source and of the propagator). They differ by a
//! single rotation about the +X (vernal equinox) axis by the J2000 obliquity.

use crate::constants::OBLIQUITY_J2000_DEG;
use crate::math::{Matrix3, Vector3};

/// Rotation matrix taking J2000 equatorial coordinates into J2000 ecliptic coordinates (R1 by +obliquity).
pub fn equatorial_to_ecliptic_dcm() -> Matrix3 {
    let (sin_e, cos_e) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, cos_e, sin_e, //
        0.0, -sin_e, cos_e,
    )
}

/// Rotation matrix taking J2000 ecliptic coordinates into J2000 equatorial coordinates.
pub fn ecliptic_to_equatorial_dcm() -> Matrix3 {
    equatorial_to_ecliptic_dcm().transpose()
}

/// Rotates the provided vector from the J2000 equatorial frame into the J2000 ecliptic frame.
pub fn equatorial_to_ecliptic(v: &Vector3) -> Vector3 {
    equatorial_to_ecliptic_dcm() * v
}

/// Rotates the provided vector from the J2000 ecliptic frame into the J2000 equatorial frame.
pub fn ecliptic_to_equatorial(v: &Vector3) -> Vector3 {
    ecliptic_to_equatorial_dcm() * v
}

/// Unit vector in the J2000 ecliptic frame of the pole whose J2000 equatorial
/// orientation is (right ascension, declination), both in degrees. Used for
/// the spin axes of the oblate planets.
pub fn pole_unit_vector(ra_deg: f64, dec_deg: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    let equatorial = Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec);
    equatorial_to_ecliptic(&equatorial)
}
