/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The compiled-in parameter registry: gravitational parameters, sizes,
//! classes and reference orbital elements for the bodies HELION knows about.
//!
//! The registry is an explicit collaborator: build one with
//! [Registry::builtin] and pass it by reference. Nothing in this crate holds
//! a process-wide instance.

mod data;

use indexmap::IndexMap;

use crate::astro::elements::{OrbitalElements, PlanetaryElements};
use crate::constants::GRAVITATIONAL_CONSTANT;
use crate::ephemerides::EphemerisError;
use crate::NaifId;

/// How a body participates in the system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyClass {
    Star,
    /// Shown on a heliocentric orbit; includes Pluto.
    Planet,
    /// Carries an association with the body it orbits.
    Moon { host: NaifId },
    /// Heliocentric minor body (asteroid, comet).
    SmallBody,
}

/// Reference orbital elements carried by a registry entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ElementRecord {
    /// Long-form heliocentric row with per-century rates. The row registered
    /// under Earth describes the Earth-Moon barycenter; see the planetary
    /// ephemeris source for the split.
    Planetary(PlanetaryElements),
    /// Osculating elements at J2000: host-centered for moons, heliocentric
    /// for small bodies.
    Osculating(OrbitalElements),
}

/// Physical and orbital constants of one body.
///
/// The gravitational parameter is the tabulated quantity; mass is derived
/// from it on request since GM is known far better than G or M alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyConstants {
    pub id: NaifId,
    pub name: &'static str,
    pub gm_km3_s2: f64,
    pub diameter_km: f64,
    pub class: BodyClass,
    pub elements: Option<ElementRecord>,
}

impl BodyConstants {
    pub fn gm_m3_s2(&self) -> f64 {
        self.gm_km3_s2 * 1.0e9
    }

    pub fn mass_kg(&self) -> f64 {
        self.gm_m3_s2() / GRAVITATIONAL_CONSTANT
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_km * 1.0e3
    }

    /// The body this one orbits, for moon-class bodies.
    pub fn host(&self) -> Option<NaifId> {
        match self.class {
            BodyClass::Moon { host } => Some(host),
            _ => None,
        }
    }
}

/// Oblateness data for one planet: the J2 zonal coefficient, the equatorial
/// radius it is normalized to, and the J2000 orientation of the spin axis.
/// Values are IAU working-group constants; they are not present in the
/// long-form tables and are maintained here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OblatenessRecord {
    pub id: NaifId,
    pub j2: f64,
    pub equatorial_radius_km: f64,
    pub pole_ra_deg: f64,
    pub pole_dec_deg: f64,
}

impl OblatenessRecord {
    pub fn equatorial_radius_m(&self) -> f64 {
        self.equatorial_radius_km * 1.0e3
    }
}

/// The read-only body table, addressable by id or by case-sensitive name.
#[derive(Clone, Debug)]
pub struct Registry {
    bodies: IndexMap<NaifId, BodyConstants>,
    oblateness: IndexMap<NaifId, OblatenessRecord>,
}

impl Registry {
    /// Builds the registry from the compiled-in tables.
    pub fn builtin() -> Self {
        let mut bodies = IndexMap::with_capacity(data::BODY_TABLE.len());
        for entry in data::BODY_TABLE {
            bodies.insert(entry.id, *entry);
        }
        let mut oblateness = IndexMap::with_capacity(data::OBLATENESS_TABLE.len());
        for entry in data::OBLATENESS_TABLE {
            oblateness.insert(entry.id, *entry);
        }
        Self { bodies, oblateness }
    }

    pub fn by_id(&self, id: NaifId) -> Result<&BodyConstants, EphemerisError> {
        self.bodies
            .get(&id)
            .ok_or(EphemerisError::UnknownBody { id })
    }

    pub fn by_name(&self, name: &str) -> Result<&BodyConstants, EphemerisError> {
        self.bodies
            .values()
            .find(|b| b.name == name)
            .ok_or_else(|| EphemerisError::UnknownBodyName {
                name: name.to_string(),
            })
    }

    pub fn id_by_name(&self, name: &str) -> Result<NaifId, EphemerisError> {
        self.by_name(name).map(|b| b.id)
    }

    pub fn oblateness(&self, id: NaifId) -> Option<&OblatenessRecord> {
        self.oblateness.get(&id)
    }

    /// All registered bodies, in table order.
    pub fn bodies(&self) -> impl Iterator<Item = &BodyConstants> {
        self.bodies.values()
    }

    /// The moons associated with the provided host, in table order.
    pub fn moons_of(&self, host: NaifId) -> impl Iterator<Item = &BodyConstants> + '_ {
        self.bodies
            .values()
            .filter(move |b| b.host() == Some(host))
    }
}

#[cfg(test)]
mod registry_ut {
    use super::*;
    use crate::constants::celestial_objects::*;

    #[test]
    fn lookup_by_id_and_name() {
        let reg = Registry::builtin();
        assert_eq!(reg.by_id(SUN).unwrap().name, "Sun");
        assert_eq!(reg.id_by_name("Jupiter").unwrap(), JUPITER);
        assert_eq!(reg.by_name("Io").unwrap().host(), Some(JUPITER));
    }

    #[test]
    fn unknown_lookups_fail_cleanly() {
        let reg = Registry::builtin();
        assert!(matches!(
            reg.by_id(123_456),
            Err(EphemerisError::UnknownBody { id: 123_456 })
        ));
        // Names are case-sensitive.
        assert!(reg.by_name("jupiter").is_err());
    }

    #[test]
    fn gm_is_preferred_over_mass() {
        let reg = Registry::builtin();
        let earth = reg.by_id(EARTH).unwrap();
        // Round-tripping mass through G reproduces GM exactly.
        let gm = earth.mass_kg() * crate::constants::GRAVITATIONAL_CONSTANT;
        assert!((gm - earth.gm_m3_s2()).abs() / earth.gm_m3_s2() < 1e-12);
        // And the Sun mass lands near 2e30 kg.
        let sun = reg.by_id(SUN).unwrap();
        assert!((sun.mass_kg() - 1.989e30).abs() / 1.989e30 < 1e-3);
    }

    #[test]
    fn every_moon_has_a_registered_host() {
        let reg = Registry::builtin();
        for body in reg.bodies() {
            if let Some(host) = body.host() {
                assert!(reg.by_id(host).is_ok(), "{} host missing", body.name);
            }
        }
    }

    #[test]
    fn saturn_system_is_complete() {
        let reg = Registry::builtin();
        let moons: Vec<_> = reg.moons_of(SATURN).map(|b| b.id).collect();
        for id in [MIMAS, ENCELADUS, TETHYS, DIONE, RHEA, TITAN, HYPERION, IAPETUS, PHOEBE] {
            assert!(moons.contains(&id));
        }
    }

    #[test]
    fn outer_planets_carry_the_long_form_correction() {
        let reg = Registry::builtin();
        for id in [JUPITER, SATURN, URANUS, NEPTUNE, PLUTO] {
            match reg.by_id(id).unwrap().elements {
                Some(ElementRecord::Planetary(row)) => {
                    assert!(row.correction.is_some(), "id {id}")
                }
                _ => panic!("planet {id} missing long-form row"),
            }
        }
        // And the inner planets must not.
        for id in [MERCURY, VENUS, EARTH, MARS] {
            match reg.by_id(id).unwrap().elements {
                Some(ElementRecord::Planetary(row)) => {
                    assert!(row.correction.is_none(), "id {id}")
                }
                _ => panic!("planet {id} missing long-form row"),
            }
        }
    }

    #[test]
    fn oblateness_covers_the_subsystem_hosts() {
        let reg = Registry::builtin();
        for id in [EARTH, MARS, JUPITER, SATURN, URANUS, NEPTUNE] {
            let rec = reg.oblateness(id).expect("missing oblateness");
            assert!(rec.j2 > 0.0 && rec.j2 < 0.02);
        }
        assert!(reg.oblateness(PLUTO).is_none());
    }
}
