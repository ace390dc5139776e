/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A planet-centered particle system: the planet at the local origin, its
//! moons (and nearby spacecraft) in planetocentric coordinates, with an
//! oblateness-aware central acceleration. The orchestrator re-anchors the
//! subsystem to the heliocentric planet state around every macro step.

use crate::bodies::OblatenessRecord;
use crate::dynamics::particle::Particle;
use crate::dynamics::system::{CentralOblateness, ParticleSystem};
use crate::errors::PhysicsResult;
use crate::math::cartesian::StateVector;
use crate::math::frames::pole_unit_vector;
use crate::math::Vector3;
use crate::NaifId;

/// Hard bound of a subsystem integration sub-step, seconds (10 minutes).
pub const MAX_SUBSTEP_S: f64 = 600.0;

/// Default range gate of the oblateness term, in equatorial radii.
pub const DEFAULT_OBLATENESS_RANGE_RADII: f64 = 100.0;

/// The J2 zonal term of one oblate body: coefficient, reference radius and
/// spin-axis orientation (unit vector, ecliptic frame).
#[derive(Clone, Debug)]
pub struct Oblateness {
    pub j2: f64,
    pub equatorial_radius_m: f64,
    pub pole: Vector3,
    pub max_range_m: f64,
}

impl Oblateness {
    pub fn from_record(record: &OblatenessRecord) -> Self {
        Self {
            j2: record.j2,
            equatorial_radius_m: record.equatorial_radius_m(),
            pole: pole_unit_vector(record.pole_ra_deg, record.pole_dec_deg),
            max_range_m: DEFAULT_OBLATENESS_RANGE_RADII * record.equatorial_radius_m(),
        }
    }

    pub fn with_max_range_m(mut self, max_range_m: f64) -> Self {
        self.max_range_m = max_range_m;
        self
    }

    /// J2 acceleration felt at `rel_pos_m` from the body center, for a body
    /// of the provided gravitational parameter. Zero beyond the range gate.
    pub fn acceleration_m_s2(&self, gm_m3_s2: f64, rel_pos_m: &Vector3) -> Vector3 {
        let r = rel_pos_m.norm();
        if r > self.max_range_m || r <= 0.0 {
            return Vector3::zeros();
        }
        let z_over_r = rel_pos_m.dot(&self.pole) / r;
        let r2 = r * r;
        let factor =
            1.5 * self.j2 * gm_m3_s2 * self.equatorial_radius_m * self.equatorial_radius_m
                / (r2 * r2);
        (rel_pos_m * ((5.0 * z_over_r * z_over_r - 1.0) / r) - self.pole * (2.0 * z_over_r))
            * factor
    }
}

/// The nested system of one planet's neighborhood, in planetocentric
/// coordinates. The `anchor` is the heliocentric state of the planet and is
/// what translates members back to absolute coordinates on read.
#[derive(Clone, Debug)]
pub struct PlanetSubsystem {
    planet_id: NaifId,
    system: ParticleSystem,
    anchor: StateVector,
}

impl PlanetSubsystem {
    /// Builds the subsystem around its central planet. The planet particle
    /// starts at the local origin by construction.
    pub fn new(mut planet: Particle, oblateness: Option<Oblateness>) -> Self {
        let planet_id = planet.id;
        planet.state = StateVector::zero();
        let mut system = ParticleSystem::new();
        system.insert(planet);
        if let Some(model) = oblateness {
            system.set_central_oblateness(Some(CentralOblateness {
                center: planet_id,
                model,
            }));
        }
        Self {
            planet_id,
            system,
            anchor: StateVector::zero(),
        }
    }

    pub fn planet_id(&self) -> NaifId {
        self.planet_id
    }

    pub fn anchor(&self) -> StateVector {
        self.anchor
    }

    /// Re-synchronizes the subsystem with the heliocentric position and
    /// velocity of its planet before integration.
    pub fn set_anchor(&mut self, anchor: StateVector) {
        self.anchor = anchor;
    }

    /// Adds a member in planetocentric coordinates.
    pub fn insert(&mut self, particle: Particle) {
        self.system.insert(particle);
    }

    pub fn remove(&mut self, id: NaifId) -> Option<Particle> {
        if id == self.planet_id {
            return None;
        }
        self.system.remove(id)
    }

    pub fn contains(&self, id: NaifId) -> bool {
        self.system.contains(id)
    }

    pub fn members(&self) -> impl Iterator<Item = &Particle> {
        self.system.iter()
    }

    pub fn local_state_of(&self, id: NaifId) -> Option<StateVector> {
        self.system.state_of(id)
    }

    /// Heliocentric state of a member: the anchor plus its local state.
    pub fn heliocentric_state_of(&self, id: NaifId) -> Option<StateVector> {
        self.system.state_of(id).map(|local| self.anchor + local)
    }

    pub fn override_local_state(&mut self, id: NaifId, state: StateVector) -> PhysicsResult<()> {
        self.system.override_state(id, state)
    }

    /// Advances the subsystem by `dt_s`, split into equal Runge-Kutta
    /// sub-steps no longer than ten minutes, then re-pins the planet at the
    /// local origin.
    pub fn advance(&mut self, dt_s: f64) -> PhysicsResult<()> {
        if dt_s == 0.0 || self.system.len() < 2 {
            return Ok(());
        }
        let substeps = (dt_s.abs() / MAX_SUBSTEP_S).ceil().max(1.0);
        let sub_dt_s = dt_s / substeps;
        for _ in 0..substeps as usize {
            self.system.advance_rk4(sub_dt_s)?;
        }
        self.correct_drift();
        Ok(())
    }

    /// Re-pins the central planet at the local origin, keeping every member
    /// planetocentric.
    pub fn correct_drift(&mut self) {
        let planet = match self.system.state_of(self.planet_id) {
            Some(state) => state,
            None => return,
        };
        let ids = self.system.ids();
        for id in ids {
            if let Some(member) = self.system.state_of(id) {
                // Plain translation; multistep history is unused here since
                // the subsystem integrates with RK4 only.
                let _ = self.system.override_state(id, member - planet);
            }
        }
    }
}

#[cfg(test)]
mod subsystem_ut {
    use super::*;
    use crate::bodies::Registry;
    use crate::constants::celestial_objects::{EARTH, MOON};

    const GM_EARTH_M3_S2: f64 = 3.986_004_418e14;
    const GM_MOON_M3_S2: f64 = 4.902_800_066e12;

    fn earth_moon() -> PlanetSubsystem {
        let registry = Registry::builtin();
        let oblateness = Oblateness::from_record(registry.oblateness(EARTH).unwrap());
        let mut subsystem = PlanetSubsystem::new(
            Particle::massive(EARTH, GM_EARTH_M3_S2, StateVector::zero()),
            Some(oblateness),
        );
        let r = 3.844e8;
        let v = ((GM_EARTH_M3_S2 + GM_MOON_M3_S2) / r).sqrt();
        subsystem.insert(Particle::massive(
            MOON,
            GM_MOON_M3_S2,
            StateVector::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0)),
        ));
        subsystem
    }

    #[test]
    fn j2_strengthens_equatorial_pull_and_weakens_polar() {
        let model = Oblateness {
            j2: 1.082_63e-3,
            equatorial_radius_m: 6.378_137e6,
            pole: Vector3::new(0.0, 0.0, 1.0),
            max_range_m: 1.0e9,
        };
        let gm = GM_EARTH_M3_S2;
        let r = 7.0e6;
        let equatorial = model.acceleration_m_s2(gm, &Vector3::new(r, 0.0, 0.0));
        // Inward (negative x) at the equator.
        assert!(equatorial.x < 0.0);
        let polar = model.acceleration_m_s2(gm, &Vector3::new(0.0, 0.0, r));
        // Outward (positive z) over the pole, twice the equatorial magnitude.
        assert!(polar.z > 0.0);
        assert!((polar.norm() / equatorial.norm() - 2.0).abs() < 1e-9);
        // Gated out beyond the configured range.
        let far = model.acceleration_m_s2(gm, &Vector3::new(2.0e9, 0.0, 0.0));
        assert_eq!(far, Vector3::zeros());
    }

    #[test]
    fn advance_splits_into_bounded_substeps() {
        let mut subsystem = earth_moon();
        // A one-hour push must not blow up and must keep the Moon at range.
        subsystem.advance(3_600.0).unwrap();
        let moon = subsystem.local_state_of(MOON).unwrap();
        assert!((moon.position_m.norm() - 3.844e8).abs() < 1.0e6);
        // The planet is re-pinned after integration.
        let planet = subsystem.local_state_of(EARTH).unwrap();
        assert_eq!(planet.position_m, Vector3::zeros());
    }

    #[test]
    fn anchor_translates_members_to_heliocentric() {
        let mut subsystem = earth_moon();
        let anchor = StateVector::new(
            Vector3::new(1.5e11, 0.0, 0.0),
            Vector3::new(0.0, 2.98e4, 0.0),
        );
        subsystem.set_anchor(anchor);
        let local = subsystem.local_state_of(MOON).unwrap();
        let absolute = subsystem.heliocentric_state_of(MOON).unwrap();
        assert_eq!(absolute.position_m, anchor.position_m + local.position_m);
        assert_eq!(
            absolute.velocity_m_s,
            anchor.velocity_m_s + local.velocity_m_s
        );
    }

    #[test]
    fn the_planet_cannot_be_removed() {
        let mut subsystem = earth_moon();
        assert!(subsystem.remove(EARTH).is_none());
        assert!(subsystem.remove(MOON).is_some());
    }

    #[test]
    fn lunar_period_is_about_a_month() {
        let mut subsystem = earth_moon();
        let start = subsystem.local_state_of(MOON).unwrap().position_m;
        // Integrate a quarter orbit; the position should rotate by ~90 deg.
        let quarter_s = 27.45 * 86_400.0 / 4.0;
        let mut remaining: f64 = quarter_s;
        while remaining > 0.0 {
            let dt = remaining.min(3_600.0);
            subsystem.advance(dt).unwrap();
            remaining -= dt;
        }
        let end = subsystem.local_state_of(MOON).unwrap().position_m;
        let cos_angle = start.dot(&end) / (start.norm() * end.norm());
        assert!(cos_angle.abs() < 0.12, "swept angle off quarter turn");
    }
}
