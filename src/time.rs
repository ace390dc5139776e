/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The simulation timescale.
//!
//! Calendar handling is hifitime's job; HELION only fixes the convention used
//! for all internal arithmetic: *simulation seconds*, a signed f64 counting
//! UTC seconds past the J2000.0 reference epoch (JD 2451545.0, 2000-01-01
//! 12:00 UTC). Julian dates and Julian centuries derive from the same
//! quantity, so `centuries_past_j2000` is exactly 0 at the reference epoch
//! and exactly 1 one Julian century of UTC days later.

use hifitime::Epoch;

use crate::constants::{DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY};

/// The J2000.0 reference epoch, 2000-01-01 12:00:00 UTC.
pub fn j2000_reference_epoch() -> Epoch {
    Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0)
}

/// Seconds of the simulation timescale elapsed at `epoch` (negative before J2000).
pub fn seconds_past_j2000(epoch: Epoch) -> f64 {
    epoch.to_utc_seconds() - j2000_reference_epoch().to_utc_seconds()
}

/// Inverse of [seconds_past_j2000].
pub fn epoch_from_seconds_past_j2000(seconds: f64) -> Epoch {
    Epoch::from_utc_seconds(j2000_reference_epoch().to_utc_seconds() + seconds)
}

/// Julian centuries of the simulation timescale elapsed at `epoch`.
/// This is the argument of the long-form planetary element tables.
pub fn centuries_past_j2000(epoch: Epoch) -> f64 {
    seconds_past_j2000(epoch) / (DAYS_PER_CENTURY * SECONDS_PER_DAY)
}

/// UTC Julian date of the provided epoch.
pub fn julian_date_utc(epoch: Epoch) -> f64 {
    J2000_JD + seconds_past_j2000(epoch) / SECONDS_PER_DAY
}

/// Epoch of the provided UTC Julian date.
pub fn epoch_from_julian_date(jd_utc: f64) -> Epoch {
    epoch_from_seconds_past_j2000((jd_utc - J2000_JD) * SECONDS_PER_DAY)
}

#[cfg(test)]
mod time_ut {
    use super::*;

    #[test]
    fn centuries_zero_and_one() {
        let t0 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        assert!(centuries_past_j2000(t0).abs() < 1e-14);
        let t1 = Epoch::from_gregorian_utc_hms(2100, 1, 1, 12, 0, 0);
        assert!((centuries_past_j2000(t1) - 1.0).abs() < 1e-14);
    }

    #[test]
    fn julian_date_of_known_instants() {
        // 2003-11-04 19:53 UTC
        let e = Epoch::from_gregorian_utc_hms(2003, 11, 4, 19, 53, 0);
        assert!((julian_date_utc(e) - 2_452_948.328_472_222).abs() < 1e-6);
        // J2000 itself
        assert!((julian_date_utc(j2000_reference_epoch()) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn seconds_round_trip() {
        for s in [-3.2e10, -86_400.5, 0.0, 1.0, 123_456_789.25, 2.9e10] {
            let e = epoch_from_seconds_past_j2000(s);
            assert!((seconds_past_j2000(e) - s).abs() < 1e-5);
        }
    }

    #[test]
    fn calendar_round_trips_across_domain() {
        // Day, hour and minute must survive the round-trip over the full
        // supported range, including proleptic pre-1582 dates.
        for (y, m, d, h, mi) in [
            (-2999, 3, 15, 6, 30),
            (-44, 3, 15, 12, 0),
            (1066, 10, 14, 9, 45),
            (1582, 10, 4, 23, 59),
            (1620, 1, 1, 0, 0),
            (1969, 7, 20, 20, 17),
            (2200, 1, 1, 0, 0),
            (2999, 12, 31, 12, 1),
        ] {
            let e = Epoch::from_gregorian_utc_hms(y, m, d, h, mi, 0);
            let back = epoch_from_seconds_past_j2000(seconds_past_j2000(e));
            let (yy, mm, dd, hh, min, _, _) = back.to_gregorian_utc();
            assert_eq!((yy, mm, dd, hh, min), (y, m, d, h, mi), "date {y}-{m}-{d}");
        }
    }

    #[test]
    fn jd_round_trip() {
        let jd = 2_452_948.328_472_222;
        assert!((julian_date_utc(epoch_from_julian_date(jd)) - jd).abs() < 1e-9);
    }
}
