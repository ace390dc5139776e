/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Long-run propagation properties of the orchestrator.

use helion::bodies::Registry;
use helion::constants::celestial_objects::*;
use helion::dynamics::StateVector;
use helion::propagation::SolarSystem;
use hifitime::{Epoch, Unit};

fn seeded(epoch: Epoch) -> SolarSystem {
    let _ = pretty_env_logger::try_init();
    let mut sim = SolarSystem::new(Registry::builtin());
    sim.set_epoch(epoch).unwrap();
    sim
}

fn planet_states(sim: &SolarSystem) -> Vec<(i32, StateVector)> {
    PLANETS
        .iter()
        .map(|&id| (id, sim.state_of(id).unwrap()))
        .collect()
}

/// Newtonian forward-then-reverse runs re-trace their path: after N macro
/// steps out and N back, every planet is within 1 m per 1000 steps.
#[test]
fn reversibility_bound_newtonian() {
    let mut sim = seeded(Epoch::from_gregorian_utc_at_midnight(1977, 9, 5));
    let initial = planet_states(&sim);
    let steps = 1_000;
    for _ in 0..steps {
        sim.advance(Unit::Minute * 30).unwrap();
    }
    for _ in 0..steps {
        sim.advance(Unit::Minute * -30).unwrap();
    }
    for ((id, before), (_, after)) in initial.iter().zip(planet_states(&sim)) {
        let error_m = before.distance_to_m(&after);
        assert!(error_m < 1.0, "planet {id} returned {error_m} m off");
    }
}

/// With the post-Newtonian correction enabled the orchestrator advances with
/// single RK4 macro steps; 240 hours forward and back reproduces every
/// planet position within a meter.
#[test]
fn reversibility_with_post_newtonian() {
    let mut sim = seeded(Epoch::from_gregorian_utc_at_midnight(2005, 8, 9));
    sim.set_post_newtonian(true);
    let initial = planet_states(&sim);
    for _ in 0..240 {
        sim.advance(Unit::Hour * 1).unwrap();
    }
    for _ in 0..240 {
        sim.advance(Unit::Hour * -1).unwrap();
    }
    for ((id, before), (_, after)) in initial.iter().zip(planet_states(&sim)) {
        let error_m = before.distance_to_m(&after);
        assert!(error_m < 1.0, "planet {id} returned {error_m} m off");
    }
}

/// The Sun never leaves the origin across long advances thanks to the drift
/// correction pass.
#[test]
fn sun_stays_pinned() {
    let mut sim = seeded(Epoch::from_gregorian_utc_at_midnight(1999, 1, 1));
    for _ in 0..500 {
        sim.advance(Unit::Minute * 60).unwrap();
    }
    let sun = sim.state_of(SUN).unwrap();
    assert_eq!(sun.position_m.norm(), 0.0);
    assert_eq!(sun.velocity_m_s.norm(), 0.0);
}

/// A nested Saturn subsystem survives a week of macro ticks with all nine
/// classical moons bound, while Saturn itself tracks the heliocentric orbit.
#[test]
fn saturn_subsystem_stays_bound_over_a_week() {
    let mut sim = SolarSystem::new(Registry::builtin());
    sim.enable_moons_of(SATURN).unwrap();
    sim.set_epoch(Epoch::from_gregorian_utc_at_midnight(2004, 7, 1))
        .unwrap();

    let moons = [
        (MIMAS, 1.855_39e8),
        (ENCELADUS, 2.380_42e8),
        (TETHYS, 2.946_72e8),
        (DIONE, 3.774_15e8),
        (RHEA, 5.270_68e8),
        (TITAN, 1.221_87e9),
        (HYPERION, 1.500_933e9),
        (IAPETUS, 3.560_854e9),
        (PHOEBE, 1.294_778e10),
    ];

    for _ in 0..(7 * 24) {
        sim.advance(Unit::Hour * 1).unwrap();
    }

    let saturn = sim.state_of(SATURN).unwrap();
    for (id, sma_m) in moons {
        let moon = sim.state_of(id).unwrap();
        let r = (moon.position_m - saturn.position_m).norm();
        assert!(
            (r - sma_m).abs() < 0.2 * sma_m,
            "moon {id} wandered to {r} m"
        );
    }
    // Saturn still sits at heliocentric distance ~9 AU.
    let r_au = saturn.position_m.norm() / 1.495_978_707e11;
    assert!((8.9..9.7).contains(&r_au), "Saturn at {r_au} AU");
}

/// Adding and removing a massless spacecraft leaves every planet trajectory
/// bit-for-bit unchanged.
#[test]
fn spacecraft_do_not_disturb_planets() {
    use helion::astro::elements::OrbitalElements;
    use helion::constants::AU_KM;
    use helion::dynamics::trajectory::KeplerianTrajectory;

    let epoch = Epoch::from_gregorian_utc_at_midnight(2011, 11, 26);
    let mut plain = seeded(epoch);
    let mut hosting = seeded(epoch);
    let trajectory = KeplerianTrajectory {
        elements: OrbitalElements::new(1.3 * AU_KM, 0.21, 1.7, 330.0, 290.0, 10.0),
        gm_km3_s2: 1.327_124_400_18e11,
        epoch_of_elements: epoch,
        first_valid: epoch - Unit::Day * 10,
        last_valid: epoch + Unit::Day * 400,
    };
    hosting.add_spacecraft("cruiser", Box::new(trajectory)).unwrap();

    for _ in 0..96 {
        plain.advance(Unit::Minute * 30).unwrap();
        hosting.advance(Unit::Minute * 30).unwrap();
    }
    for &id in PLANETS.iter() {
        let a = plain.state_of(id).unwrap();
        let b = hosting.state_of(id).unwrap();
        assert_eq!(a, b, "planet {id} disturbed by a massless spacecraft");
    }
}
