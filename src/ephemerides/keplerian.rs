/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The approximate Keplerian ephemeris sources: valid over the whole
//! 3000 BC - AD 3000 domain, used directly for the planets and small bodies
//! and as the fallback for moons not covered by a kernel.

use hifitime::Epoch;
use log::warn;

use crate::astro::elements::OrbitalElements;
use crate::astro::kepler::KeplerSolver;
use crate::bodies::{BodyClass, ElementRecord, Registry};
use crate::constants::celestial_objects::{EARTH, EARTH_MOON_BARYCENTER, MOON, SUN};
use crate::ephemerides::{lunar, EphemerisError, EphemerisSource};
use crate::math::cartesian::StateVector;
use crate::time::{centuries_past_j2000, seconds_past_j2000};
use crate::NaifId;

fn domain_start() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(-3000, 1, 1)
}

fn domain_end() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(3000, 1, 1)
}

/// Heliocentric source for the Sun, the planets, the Earth-Moon pair and the
/// small bodies, from the compiled-in element tables.
///
/// **Convention:** the long-form row registered under Earth describes the
/// Earth-Moon *barycenter*. Earth and Moon states are always derived from
/// that row and the lunar series; the raw row is only reachable through
/// [EphemerisSource::try_state_barycentric] and under the barycenter id.
#[derive(Clone, Debug)]
pub struct PlanetaryKeplerianSource {
    registry: Registry,
    solver: KeplerSolver,
    /// mu_Moon / (mu_Earth + mu_Moon), the barycenter offset fraction.
    moon_fraction: f64,
}

impl PlanetaryKeplerianSource {
    pub fn new(registry: Registry) -> Self {
        Self::with_solver(registry, KeplerSolver::default())
    }

    pub fn with_solver(registry: Registry, solver: KeplerSolver) -> Self {
        let gm_earth = registry
            .by_id(EARTH)
            .map(|b| b.gm_km3_s2)
            .unwrap_or_default();
        let gm_moon = registry.by_id(MOON).map(|b| b.gm_km3_s2).unwrap_or_default();
        let moon_fraction = gm_moon / (gm_earth + gm_moon);
        if !(0.011..0.013).contains(&moon_fraction) {
            warn!("Earth-Moon mass fraction {moon_fraction} is off the measured value");
        }
        Self {
            registry,
            solver,
            moon_fraction,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn gm_sun_km3_s2(&self) -> f64 {
        self.registry
            .by_id(SUN)
            .map(|b| b.gm_km3_s2)
            .unwrap_or_default()
    }

    fn check_window(&self, id: NaifId, epoch: Epoch) -> Result<(), EphemerisError> {
        if epoch < self.first_valid_epoch() || epoch > self.last_valid_epoch() {
            return Err(EphemerisError::NoCoverage {
                id,
                epoch,
                start: self.first_valid_epoch(),
                end: self.last_valid_epoch(),
            });
        }
        Ok(())
    }

    /// State of one long-form row (heliocentric; the Earth row is the EMB).
    fn row_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError> {
        let body = self.registry.by_id(id)?;
        match body.elements {
            Some(ElementRecord::Planetary(row)) => row
                .state_at(centuries_past_j2000(epoch), self.gm_sun_km3_s2(), self.solver)
                .map_err(|source| EphemerisError::EphemerisPhysics {
                    action: "evaluating a long-form planetary row",
                    source,
                }),
            _ => Err(EphemerisError::UnknownBody { id }),
        }
    }

    /// Heliocentric state of a small body from its osculating elements.
    fn small_body_state(
        &self,
        elements: &OrbitalElements,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let gm = self.gm_sun_km3_s2();
        elements
            .propagated_by(seconds_past_j2000(epoch), gm)
            .to_state(gm, self.solver)
            .map_err(|source| EphemerisError::EphemerisPhysics {
                action: "propagating small-body elements",
                source,
            })
    }
}

impl EphemerisSource for PlanetaryKeplerianSource {
    fn first_valid_epoch(&self) -> Epoch {
        domain_start()
    }

    fn last_valid_epoch(&self) -> Epoch {
        domain_end()
    }

    fn bodies(&self) -> Vec<NaifId> {
        let mut ids = vec![SUN, EARTH_MOON_BARYCENTER, MOON];
        for body in self.registry.bodies() {
            match body.class {
                BodyClass::Planet | BodyClass::SmallBody => ids.push(body.id),
                _ => {}
            }
        }
        ids
    }

    fn try_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError> {
        self.check_window(id, epoch)?;
        if id == SUN {
            return Ok(StateVector::zero());
        }
        if id == EARTH_MOON_BARYCENTER {
            return self.row_state(EARTH, epoch);
        }
        if id == EARTH || id == MOON {
            let emb = self.row_state(EARTH, epoch)?;
            let geocentric_moon = lunar::geocentric_state(centuries_past_j2000(epoch));
            let earth = StateVector::new(
                emb.position_m - geocentric_moon.position_m * self.moon_fraction,
                emb.velocity_m_s - geocentric_moon.velocity_m_s * self.moon_fraction,
            );
            return Ok(if id == EARTH {
                earth
            } else {
                earth + geocentric_moon
            });
        }
        let body = self.registry.by_id(id)?;
        match (&body.class, &body.elements) {
            (BodyClass::Planet, Some(ElementRecord::Planetary(_))) => self.row_state(id, epoch),
            (BodyClass::SmallBody, Some(ElementRecord::Osculating(elements))) => {
                self.small_body_state(elements, epoch)
            }
            _ => Err(EphemerisError::UnknownBody { id }),
        }
    }

    fn try_state_barycentric(
        &self,
        id: NaifId,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        if id == EARTH || id == EARTH_MOON_BARYCENTER {
            self.check_window(id, epoch)?;
            self.row_state(EARTH, epoch)
        } else {
            Err(EphemerisError::Unsupported {
                action: "barycentric query outside the Earth-Moon system",
            })
        }
    }
}

/// Planetocentric two-body fallback for the tabulated moons, translated to
/// heliocentric coordinates by the host planet's long-form state.
#[derive(Clone, Debug)]
pub struct MoonKeplerianSource {
    planetary: PlanetaryKeplerianSource,
    solver: KeplerSolver,
}

impl MoonKeplerianSource {
    pub fn new(registry: Registry) -> Self {
        let solver = KeplerSolver::default();
        Self {
            planetary: PlanetaryKeplerianSource::with_solver(registry, solver),
            solver,
        }
    }

    fn registry(&self) -> &Registry {
        self.planetary.registry()
    }

    /// The host-centered state of the moon, before translation.
    pub fn planetocentric_state(
        &self,
        id: NaifId,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let body = self.registry().by_id(id)?;
        let (host, elements) = match (body.class, &body.elements) {
            (BodyClass::Moon { host }, Some(ElementRecord::Osculating(elements))) => {
                (host, *elements)
            }
            _ => return Err(EphemerisError::UnknownBody { id }),
        };
        let gm_host = self.registry().by_id(host)?.gm_km3_s2;
        elements
            .propagated_by(seconds_past_j2000(epoch), gm_host)
            .to_state(gm_host, self.solver)
            .map_err(|source| EphemerisError::EphemerisPhysics {
                action: "propagating moon fallback elements",
                source,
            })
    }
}

impl EphemerisSource for MoonKeplerianSource {
    fn first_valid_epoch(&self) -> Epoch {
        domain_start()
    }

    fn last_valid_epoch(&self) -> Epoch {
        domain_end()
    }

    fn bodies(&self) -> Vec<NaifId> {
        self.registry()
            .bodies()
            .filter(|b| matches!(b.class, BodyClass::Moon { .. }) && b.id != MOON)
            .map(|b| b.id)
            .collect()
    }

    fn try_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError> {
        let body = self.registry().by_id(id)?;
        let host = match body.class {
            BodyClass::Moon { host } if id != MOON => host,
            _ => return Err(EphemerisError::UnknownBody { id }),
        };
        let planetocentric = self.planetocentric_state(id, epoch)?;
        let host_state = self.planetary.try_state(host, epoch)?;
        Ok(host_state + planetocentric)
    }
}
