/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The composite solar-system ephemeris: every registered source behind one
//! dispatch point.

use hifitime::{Duration, Epoch};
use log::debug;

use crate::bodies::Registry;
use crate::ephemerides::keplerian::{MoonKeplerianSource, PlanetaryKeplerianSource};
use crate::ephemerides::{EphemerisError, EphemerisSource};
use crate::math::cartesian::StateVector;
use crate::NaifId;

/// Dispatches state queries across its sources by body and instant.
///
/// When several sources cover the same (body, instant), the one with the
/// narrowest validity window answers: narrow windows mean precomputed
/// high-fidelity data, the all-time Keplerian tables are the fallback.
pub struct SolarSystemEphemeris {
    sources: Vec<Box<dyn EphemerisSource>>,
}

impl SolarSystemEphemeris {
    /// The builtin configuration: long-form planetary tables (with the lunar
    /// series) plus the moon element fallback. Kernels are registered on top.
    pub fn builtin(registry: Registry) -> Self {
        let planetary = PlanetaryKeplerianSource::new(registry.clone());
        let moons = MoonKeplerianSource::new(registry);
        Self {
            sources: vec![Box::new(planetary), Box::new(moons)],
        }
    }

    pub fn register(&mut self, source: Box<dyn EphemerisSource>) {
        debug!(
            "registered ephemeris source covering {} bodies",
            source.bodies().len()
        );
        self.sources.push(source);
    }

    fn window_of(source: &dyn EphemerisSource) -> Duration {
        source.last_valid_epoch() - source.first_valid_epoch()
    }

    /// The covering source with the narrowest validity window, if any.
    fn best_source(&self, id: NaifId, epoch: Epoch) -> Option<&dyn EphemerisSource> {
        self.sources
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| s.covers(id, epoch))
            .min_by(|a, b| {
                Self::window_of(*a)
                    .partial_cmp(&Self::window_of(*b))
                    .expect("source windows are finite")
            })
    }
}

impl EphemerisSource for SolarSystemEphemeris {
    fn first_valid_epoch(&self) -> Epoch {
        self.sources
            .iter()
            .map(|s| s.first_valid_epoch())
            .min()
            .expect("at least one source is always registered")
    }

    fn last_valid_epoch(&self) -> Epoch {
        self.sources
            .iter()
            .map(|s| s.last_valid_epoch())
            .max()
            .expect("at least one source is always registered")
    }

    fn bodies(&self) -> Vec<NaifId> {
        let mut ids: Vec<NaifId> = Vec::new();
        for source in &self.sources {
            for id in source.bodies() {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    fn try_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError> {
        if let Some(source) = self.best_source(id, epoch) {
            return source.try_state(id, epoch);
        }
        // Nothing covers the pair: distinguish an unknown body from a known
        // body out of range.
        if self.sources.iter().any(|s| s.bodies().contains(&id)) {
            Err(EphemerisError::NoCoverage {
                id,
                epoch,
                start: self.first_valid_epoch(),
                end: self.last_valid_epoch(),
            })
        } else {
            Err(EphemerisError::UnknownBody { id })
        }
    }

    fn try_state_barycentric(
        &self,
        id: NaifId,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let mut last_unsupported = EphemerisError::Unsupported {
            action: "barycentric state query",
        };
        for source in &self.sources {
            if !source.covers(id, epoch) {
                continue;
            }
            match source.try_state_barycentric(id, epoch) {
                Err(err @ EphemerisError::Unsupported { .. }) => last_unsupported = err,
                other => return other,
            }
        }
        Err(last_unsupported)
    }
}

#[cfg(test)]
mod system_ut {
    use super::*;
    use crate::constants::celestial_objects::*;
    use crate::constants::{J2000_JD, SECONDS_PER_DAY};
    use crate::ephemerides::kernel::KernelSource;
    use crate::math::Vector3;
    use crate::naif::{ChebyshevKernel, ChebyshevRecord, ChebyshevSegment, SegmentSummary};
    use crate::time::epoch_from_seconds_past_j2000;

    fn composite() -> SolarSystemEphemeris {
        SolarSystemEphemeris::builtin(Registry::builtin())
    }

    #[test]
    fn covers_planets_and_moons() {
        let eph = composite();
        let epoch = Epoch::from_gregorian_utc_at_midnight(1950, 4, 2);
        for id in [SUN, MERCURY, EARTH, MOON, JUPITER, IO, TITAN, CHARON, CERES] {
            assert!(eph.try_state(id, epoch).is_ok(), "id {id}");
        }
    }

    #[test]
    fn unknown_body_vs_out_of_range() {
        let eph = composite();
        let epoch = Epoch::from_gregorian_utc_at_midnight(1950, 4, 2);
        assert!(matches!(
            eph.try_state(-55, epoch),
            Err(EphemerisError::UnknownBody { id: -55 })
        ));
        let far = Epoch::from_gregorian_utc_at_midnight(3200, 1, 1);
        assert!(matches!(
            eph.try_state(EARTH, far),
            Err(EphemerisError::NoCoverage { .. })
        ));
    }

    #[test]
    fn narrower_window_wins_the_tie_break() {
        // A one-week kernel pinning Io at a recognizable offset must shadow
        // the all-time fallback inside its window and hand back outside it.
        let offset_km = 9.9e5;
        let summary = SegmentSummary {
            target_id: IO,
            observer_id: 5,
            jd_start: J2000_JD,
            jd_end: J2000_JD + 7.0,
            record_type: 2,
        };
        let records = vec![ChebyshevRecord {
            x_km: vec![offset_km],
            y_km: vec![0.0],
            z_km: vec![0.0],
        }];
        let segment = ChebyshevSegment::new(summary, 7.0 * SECONDS_PER_DAY, records).unwrap();
        let kernel = ChebyshevKernel::new(vec![segment]);

        let mut eph = composite();
        eph.register(Box::new(KernelSource::new(
            Box::new(kernel),
            Registry::builtin(),
        )));

        let inside = epoch_from_seconds_past_j2000(2.0 * SECONDS_PER_DAY);
        let io = eph.try_state(IO, inside).unwrap();
        let jupiter = eph.try_state(JUPITER, inside).unwrap();
        let relative_km = (io.position_m - jupiter.position_m) / 1e3;
        // The kernel's equatorial x-axis is the ecliptic x-axis.
        assert!((relative_km - Vector3::new(offset_km, 0.0, 0.0)).norm() < 1e-3);

        let outside = epoch_from_seconds_past_j2000(90.0 * SECONDS_PER_DAY);
        let io_fallback = eph.try_state(IO, outside).unwrap();
        let jupiter_out = eph.try_state(JUPITER, outside).unwrap();
        let r_km = (io_fallback.position_m - jupiter_out.position_m).norm() / 1e3;
        assert!((r_km - 421_800.0).abs() < 45_000.0, "fallback Io at {r_km}");
    }

    #[test]
    fn barycentric_falls_through_to_the_capable_source() {
        let eph = composite();
        let epoch = Epoch::from_gregorian_utc_at_midnight(2010, 10, 10);
        assert!(eph.try_state_barycentric(EARTH_MOON_BARYCENTER, epoch).is_ok());
        assert!(matches!(
            eph.try_state_barycentric(SATURN, epoch),
            Err(EphemerisError::Unsupported { .. })
        ));
    }
}
