/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Ephemeris source backed by a precomputed kernel reader.
//!
//! The reader answers in kilometers and kilometers per day in the J2000
//! equatorial frame, relative to the segment's observer. This wrapper owns
//! the unit conversion, the obliquity rotation into the ecliptic frame, and
//! the translation of planetocentric observers to heliocentric coordinates
//! through the long-form planetary source.

use hifitime::Epoch;

use crate::bodies::Registry;
use crate::constants::celestial_objects::{
    JUPITER, MARS, MERCURY, NEPTUNE, PLUTO, SATURN, SOLAR_SYSTEM_BARYCENTER, SUN, URANUS, VENUS,
};
use crate::constants::SECONDS_PER_DAY;
use crate::ephemerides::keplerian::PlanetaryKeplerianSource;
use crate::ephemerides::{EphemerisError, EphemerisSource};
use crate::math::cartesian::StateVector;
use crate::math::frames::equatorial_to_ecliptic;
use crate::naif::EphemerisKernel;
use crate::time::{epoch_from_seconds_past_j2000, seconds_past_j2000};
use crate::NaifId;

/// A [EphemerisSource] over one opened kernel.
pub struct KernelSource {
    kernel: Box<dyn EphemerisKernel>,
    planetary: PlanetaryKeplerianSource,
    targets: Vec<NaifId>,
    first: Epoch,
    last: Epoch,
}

impl KernelSource {
    pub fn new(kernel: Box<dyn EphemerisKernel>, registry: Registry) -> Self {
        let mut targets: Vec<NaifId> = Vec::new();
        let mut first_s = f64::INFINITY;
        let mut last_s = f64::NEG_INFINITY;
        for summary in kernel.segments() {
            if !targets.contains(&summary.target_id) {
                targets.push(summary.target_id);
            }
            first_s = first_s.min(summary.start_seconds_past_j2000());
            last_s = last_s.max(summary.end_seconds_past_j2000());
        }
        if !first_s.is_finite() {
            // An empty kernel covers nothing; collapse the window.
            first_s = 0.0;
            last_s = 0.0;
        }
        Self {
            kernel,
            planetary: PlanetaryKeplerianSource::new(registry),
            targets,
            first: epoch_from_seconds_past_j2000(first_s),
            last: epoch_from_seconds_past_j2000(last_s),
        }
    }

    /// Heliocentric ecliptic state of a segment observer. The solar-system
    /// barycenter collapses onto the Sun here: the fallback tables carry no
    /// barycentric solar motion.
    fn observer_state(
        &self,
        observer_id: NaifId,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let mapped = match observer_id {
            SUN | SOLAR_SYSTEM_BARYCENTER => return Ok(StateVector::zero()),
            1 => MERCURY,
            2 => VENUS,
            4 => MARS,
            5 => JUPITER,
            6 => SATURN,
            7 => URANUS,
            8 => NEPTUNE,
            9 => PLUTO,
            other => other,
        };
        self.planetary.try_state(mapped, epoch)
    }
}

impl EphemerisSource for KernelSource {
    fn first_valid_epoch(&self) -> Epoch {
        self.first
    }

    fn last_valid_epoch(&self) -> Epoch {
        self.last
    }

    fn bodies(&self) -> Vec<NaifId> {
        self.targets.clone()
    }

    fn covers(&self, id: NaifId, epoch: Epoch) -> bool {
        let t_s = seconds_past_j2000(epoch);
        self.kernel
            .segments()
            .iter()
            .any(|s| s.target_id == id && s.covers(t_s))
    }

    fn try_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError> {
        let t_s = seconds_past_j2000(epoch);
        let summary = self
            .kernel
            .segments()
            .iter()
            .find(|s| s.target_id == id && s.covers(t_s))
            .copied();
        let summary = match summary {
            Some(summary) => summary,
            None if self.targets.contains(&id) => {
                return Err(EphemerisError::NoCoverage {
                    id,
                    epoch,
                    start: self.first,
                    end: self.last,
                })
            }
            None => return Err(EphemerisError::UnknownBody { id }),
        };

        let (pos_km, vel_km_day) = self
            .kernel
            .state_at(t_s, summary.target_id, summary.observer_id)
            .map_err(|source| EphemerisError::Kernel {
                action: "querying a kernel state",
                source,
            })?;

        let relative = StateVector::new(
            equatorial_to_ecliptic(&pos_km) * 1.0e3,
            equatorial_to_ecliptic(&vel_km_day) * (1.0e3 / SECONDS_PER_DAY),
        );
        let observer = self.observer_state(summary.observer_id, epoch)?;
        Ok(observer + relative)
    }
}

#[cfg(test)]
mod kernel_source_ut {
    use super::*;
    use crate::constants::celestial_objects::TITAN;
    use crate::constants::J2000_JD;
    use crate::math::frames::ecliptic_to_equatorial;
    use crate::math::Vector3;
    use crate::naif::{ChebyshevKernel, ChebyshevRecord, ChebyshevSegment, SegmentSummary};

    /// A one-week segment placing Titan on a fixed offset from Saturn,
    /// expressed in the equatorial frame so the source has to rotate it back.
    fn titan_kernel() -> ChebyshevKernel {
        let offset_ecliptic_km = Vector3::new(1_221_870.0, 0.0, 0.0);
        let offset_eq = ecliptic_to_equatorial(&offset_ecliptic_km);
        let summary = SegmentSummary {
            target_id: TITAN,
            observer_id: 6,
            jd_start: J2000_JD,
            jd_end: J2000_JD + 7.0,
            record_type: 2,
        };
        let records = vec![ChebyshevRecord {
            x_km: vec![offset_eq.x],
            y_km: vec![offset_eq.y],
            z_km: vec![offset_eq.z],
        }];
        let segment = ChebyshevSegment::new(summary, 7.0 * SECONDS_PER_DAY, records).unwrap();
        ChebyshevKernel::new(vec![segment])
    }

    #[test]
    fn rotates_and_translates_to_heliocentric() {
        let source = KernelSource::new(Box::new(titan_kernel()), Registry::builtin());
        let epoch = epoch_from_seconds_past_j2000(3.0 * SECONDS_PER_DAY);
        let titan = source.try_state(TITAN, epoch).unwrap();
        let saturn = source.planetary.try_state(SATURN, epoch).unwrap();
        let relative = titan.position_m - saturn.position_m;
        // The equatorial offset must come back as the original ecliptic one.
        assert!((relative - Vector3::new(1.221_870e9, 0.0, 0.0)).norm() < 1.0);
        // Static segment: relative velocity is zero, so Titan moves with Saturn.
        assert!((titan.velocity_m_s - saturn.velocity_m_s).norm() < 1e-9);
    }

    #[test]
    fn window_and_body_errors_are_distinct() {
        let source = KernelSource::new(Box::new(titan_kernel()), Registry::builtin());
        let outside = epoch_from_seconds_past_j2000(30.0 * SECONDS_PER_DAY);
        assert!(matches!(
            source.try_state(TITAN, outside),
            Err(EphemerisError::NoCoverage { id: TITAN, .. })
        ));
        let inside = epoch_from_seconds_past_j2000(SECONDS_PER_DAY);
        assert!(matches!(
            source.try_state(12_345, inside),
            Err(EphemerisError::UnknownBody { .. })
        ));
    }

    #[test]
    fn validity_window_is_the_segment_union() {
        let source = KernelSource::new(Box::new(titan_kernel()), Registry::builtin());
        assert!((seconds_past_j2000(source.first_valid_epoch())).abs() < 1.0);
        assert!((seconds_past_j2000(source.last_valid_epoch()) - 7.0 * SECONDS_PER_DAY).abs() < 1.0);
    }
}
