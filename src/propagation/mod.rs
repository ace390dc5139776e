/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The solar-system orchestrator: one heliocentric particle system, nested
//! planet subsystems, the event schedule and the simulation clock, advanced
//! tick by tick against the ephemeris service.

use hifitime::{Duration, Epoch};
use indexmap::IndexMap;
use log::{debug, info};
use snafu::prelude::*;

use crate::bodies::{BodyClass, Registry};
use crate::constants::celestial_objects::{EARTH, MOON};
use crate::dynamics::events::{EventSchedule, ScheduleError, ScheduledEvent};
use crate::dynamics::particle::Particle;
use crate::dynamics::subsystem::{Oblateness, PlanetSubsystem};
use crate::dynamics::system::ParticleSystem;
use crate::dynamics::trajectory::Trajectory;
use crate::ephemerides::system::SolarSystemEphemeris;
use crate::ephemerides::{EphemerisError, EphemerisSource};
use crate::errors::PhysicsError;
use crate::math::cartesian::StateVector;
use crate::NaifId;

/// First id handed to a registered spacecraft; later ones count down.
const FIRST_SPACECRAFT_ID: NaifId = -1000;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SimulationError {
    #[snafu(display("ephemeris query while {action} failed: {source}"))]
    SeedEphemeris {
        action: &'static str,
        source: EphemerisError,
    },
    #[snafu(display("dynamics failure while {action}: {source}"))]
    Dynamics {
        action: &'static str,
        source: PhysicsError,
    },
    #[snafu(display("scheduling failed: {source}"))]
    Scheduling { source: ScheduleError },
    #[snafu(display("no particle {id} anywhere in the simulation"))]
    UnknownParticle { id: NaifId },
    #[snafu(display("the simulation is unseeded; call set_epoch first"))]
    NotSeeded,
}

/// Where the orchestrator stands in its lifecycle. A fatal error during any
/// transition drops back to `Unseeded`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Unseeded,
    Ready,
    Advancing,
    EventPending,
}

struct SpacecraftEntry {
    name: String,
    trajectory: Box<dyn Trajectory>,
}

/// The simulator core. Owns the heliocentric [ParticleSystem], one
/// [PlanetSubsystem] per modeled planet, the derived Earth-Moon barycenter
/// and the [EventSchedule].
pub struct SolarSystem {
    registry: Registry,
    ephemeris: SolarSystemEphemeris,
    heliocentric: ParticleSystem,
    subsystems: IndexMap<NaifId, PlanetSubsystem>,
    modeled_hosts: Vec<NaifId>,
    spacecraft: IndexMap<NaifId, SpacecraftEntry>,
    next_spacecraft_id: NaifId,
    schedule: EventSchedule,
    emb: StateVector,
    epoch: Epoch,
    phase: Phase,
}

impl SolarSystem {
    pub fn new(registry: Registry) -> Self {
        let ephemeris = SolarSystemEphemeris::builtin(registry.clone());
        Self::with_ephemeris(registry, ephemeris)
    }

    pub fn with_ephemeris(registry: Registry, ephemeris: SolarSystemEphemeris) -> Self {
        Self {
            registry,
            ephemeris,
            heliocentric: ParticleSystem::new(),
            subsystems: IndexMap::new(),
            modeled_hosts: Vec::new(),
            spacecraft: IndexMap::new(),
            next_spacecraft_id: FIRST_SPACECRAFT_ID,
            schedule: EventSchedule::empty(),
            emb: StateVector::zero(),
            epoch: crate::time::j2000_reference_epoch(),
            phase: Phase::Unseeded,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ephemeris(&self) -> &SolarSystemEphemeris {
        &self.ephemeris
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn earth_moon_barycenter(&self) -> StateVector {
        self.emb
    }

    pub fn post_newtonian(&self) -> bool {
        self.heliocentric.post_newtonian()
    }

    pub fn set_post_newtonian(&mut self, include: bool) {
        self.heliocentric.set_post_newtonian(include);
    }

    /// Opts into modeling the moons of `host` as a nested subsystem. Takes
    /// effect immediately when the simulation is seeded.
    pub fn enable_moons_of(&mut self, host: NaifId) -> Result<(), SimulationError> {
        if !self.modeled_hosts.contains(&host) {
            self.modeled_hosts.push(host);
        }
        if self.phase != Phase::Unseeded {
            self.build_subsystem(host)?;
        }
        Ok(())
    }

    /// Destroys the subsystem of `host`; its members leave the simulation,
    /// the planet itself stays heliocentric.
    pub fn disable_moons_of(&mut self, host: NaifId) {
        self.modeled_hosts.retain(|id| *id != host);
        self.subsystems.shift_remove(&host);
    }

    /// (Re-)seeds every particle from the ephemeris service at `epoch` and
    /// resets the integrators. This is also the initialization entry point.
    pub fn set_epoch(&mut self, epoch: Epoch) -> Result<(), SimulationError> {
        self.phase = Phase::Unseeded;
        self.epoch = epoch;
        match self.seed() {
            Ok(()) => {
                self.phase = Phase::Ready;
                info!("seeded {} heliocentric particles at {epoch}", self.heliocentric.len());
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    fn seed(&mut self) -> Result<(), SimulationError> {
        let epoch = self.epoch;
        let mut heliocentric = ParticleSystem::new();
        heliocentric.set_post_newtonian(self.heliocentric.post_newtonian());

        for body in self.registry.bodies() {
            let heliocentric_body = match body.class {
                BodyClass::Star | BodyClass::Planet | BodyClass::SmallBody => true,
                // The Moon is heliocentric unless the Earth subsystem owns it.
                BodyClass::Moon { host } => body.id == MOON && !self.modeled_hosts.contains(&host),
            };
            if !heliocentric_body {
                continue;
            }
            let state = self
                .ephemeris
                .try_state(body.id, epoch)
                .context(SeedEphemerisSnafu {
                    action: "seeding the heliocentric system",
                })?;
            heliocentric.insert(Particle::from_constants(body, state));
        }

        for (id, entry) in &self.spacecraft {
            let state =
                entry
                    .trajectory
                    .state_at(epoch)
                    .map_err(|source| SimulationError::Dynamics {
                        action: "re-seeding a spacecraft from its trajectory",
                        source,
                    })?;
            heliocentric.insert(Particle::massless(*id, state));
        }

        self.heliocentric = heliocentric;
        self.subsystems.clear();
        for host in self.modeled_hosts.clone() {
            self.build_subsystem(host)?;
        }
        Ok(())
    }

    fn build_subsystem(&mut self, host: NaifId) -> Result<(), SimulationError> {
        let epoch = self.epoch;
        let host_body = self
            .registry
            .by_id(host)
            .context(SeedEphemerisSnafu {
                action: "resolving a subsystem host",
            })?;
        let host_state = self
            .ephemeris
            .try_state(host, epoch)
            .context(SeedEphemerisSnafu {
                action: "seeding a subsystem host",
            })?;
        let oblateness = self.registry.oblateness(host).map(Oblateness::from_record);
        let mut subsystem = PlanetSubsystem::new(
            Particle::from_constants(host_body, StateVector::zero()),
            oblateness,
        );
        subsystem.set_anchor(host_state);

        let moons: Vec<NaifId> = self.registry.moons_of(host).map(|b| b.id).collect();
        for moon in moons {
            let moon_body = self.registry.by_id(moon).context(SeedEphemerisSnafu {
                action: "resolving a subsystem moon",
            })?;
            let moon_state = self
                .ephemeris
                .try_state(moon, epoch)
                .context(SeedEphemerisSnafu {
                    action: "seeding a subsystem moon",
                })?;
            subsystem.insert(Particle::from_constants(moon_body, moon_state - host_state));
        }
        debug!(
            "subsystem of {host} holds {} members",
            subsystem.members().count()
        );
        self.subsystems.insert(host, subsystem);
        Ok(())
    }

    /// Heliocentric state of any particle in the simulation, subsystem
    /// members included (translated through their host planet).
    pub fn state_of(&self, id: NaifId) -> Result<StateVector, SimulationError> {
        if let Some(state) = self.heliocentric.state_of(id) {
            return Ok(state);
        }
        for subsystem in self.subsystems.values() {
            if subsystem.contains(id) {
                let planet = self
                    .heliocentric
                    .state_of(subsystem.planet_id())
                    .ok_or(SimulationError::UnknownParticle {
                        id: subsystem.planet_id(),
                    })?;
                let local = subsystem
                    .local_state_of(id)
                    .expect("contains() implies a local state");
                return Ok(planet + local);
            }
        }
        Err(SimulationError::UnknownParticle { id })
    }

    /// Heliocentric state by registry name.
    pub fn state_of_name(&self, name: &str) -> Result<StateVector, SimulationError> {
        let id = self
            .registry
            .id_by_name(name)
            .context(SeedEphemerisSnafu {
                action: "resolving a body name",
            })?;
        self.state_of(id)
    }

    /// Registers a massless spacecraft computed from its trajectory, keyed
    /// by a fresh negative id.
    pub fn add_spacecraft(
        &mut self,
        name: &str,
        trajectory: Box<dyn Trajectory>,
    ) -> Result<NaifId, SimulationError> {
        ensure!(self.phase != Phase::Unseeded, NotSeededSnafu);
        let state = trajectory
            .state_at(self.epoch)
            .map_err(|source| SimulationError::Dynamics {
                action: "evaluating a spacecraft trajectory",
                source,
            })?;
        let id = self.next_spacecraft_id;
        self.next_spacecraft_id -= 1;
        self.heliocentric.insert(Particle::massless(id, state));
        self.spacecraft.insert(
            id,
            SpacecraftEntry {
                name: name.to_string(),
                trajectory,
            },
        );
        info!("registered spacecraft {name} as {id}");
        Ok(id)
    }

    /// Removes a spacecraft and prunes its pending scheduled events.
    pub fn remove_spacecraft(&mut self, id: NaifId) -> Result<(), SimulationError> {
        self.spacecraft
            .shift_remove(&id)
            .ok_or(SimulationError::UnknownParticle { id })?;
        self.heliocentric.remove(id);
        self.schedule.prune(id);
        Ok(())
    }

    pub fn spacecraft_name(&self, id: NaifId) -> Option<&str> {
        self.spacecraft.get(&id).map(|entry| entry.name.as_str())
    }

    pub fn set_schedule(&mut self, schedule: EventSchedule) {
        self.schedule = schedule;
    }

    pub fn schedule_event(&mut self, event: ScheduledEvent) -> Result<(), SimulationError> {
        self.schedule.push(event).context(SchedulingSnafu)
    }

    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    /// One macro tick of `dt` (negative `dt` runs the mirror-image backward
    /// tick):
    ///
    /// 1. every subsystem re-anchors to its planet and integrates in bounded
    ///    sub-steps;
    /// 2. the heliocentric system advances, with RK4 when the
    ///    post-Newtonian correction is on, else as two multistep half-steps;
    /// 3. heliocentric drift correction re-pins the Sun;
    /// 4. the Earth-Moon barycenter is recomputed;
    /// 5. the clock advances;
    /// 6. due events re-seat their targets, exactly.
    pub fn advance(&mut self, dt: Duration) -> Result<(), SimulationError> {
        ensure!(self.phase != Phase::Unseeded, NotSeededSnafu);
        let dt_s = dt.to_seconds();
        self.phase = Phase::Advancing;

        if let Err(error) = self.advance_inner(dt, dt_s) {
            self.phase = Phase::Unseeded;
            return Err(error);
        }
        self.phase = Phase::Ready;
        Ok(())
    }

    fn advance_inner(&mut self, dt: Duration, dt_s: f64) -> Result<(), SimulationError> {
        for subsystem in self.subsystems.values_mut() {
            let planet = self
                .heliocentric
                .state_of(subsystem.planet_id())
                .ok_or(SimulationError::UnknownParticle {
                    id: subsystem.planet_id(),
                })?;
            subsystem.set_anchor(planet);
            subsystem
                .advance(dt_s)
                .map_err(|source| SimulationError::Dynamics {
                    action: "advancing a planet subsystem",
                    source,
                })?;
        }

        let advance_heliocentric = |system: &mut ParticleSystem| -> Result<(), PhysicsError> {
            if system.post_newtonian() {
                system.advance_rk4(dt_s)
            } else {
                system.advance_abm4(dt_s / 2.0)?;
                system.advance_abm4(dt_s / 2.0)
            }
        };
        advance_heliocentric(&mut self.heliocentric).map_err(|source| {
            SimulationError::Dynamics {
                action: "advancing the heliocentric system",
                source,
            }
        })?;

        self.heliocentric.correct_drift();
        self.recompute_emb()?;
        self.epoch = self.epoch + dt;

        while let Some(event) = self.schedule.next_due(self.epoch).copied() {
            self.phase = Phase::EventPending;
            self.apply_event(&event)?;
            self.schedule.advance_cursor();
        }
        Ok(())
    }

    fn recompute_emb(&mut self) -> Result<(), SimulationError> {
        let earth = self.state_of(EARTH)?;
        let moon = self.state_of(MOON)?;
        let gm_earth = self
            .registry
            .by_id(EARTH)
            .map(|b| b.gm_m3_s2())
            .unwrap_or_default();
        let gm_moon = self
            .registry
            .by_id(MOON)
            .map(|b| b.gm_m3_s2())
            .unwrap_or_default();
        let total = gm_earth + gm_moon;
        self.emb = StateVector::new(
            (earth.position_m * gm_earth + moon.position_m * gm_moon) / total,
            (earth.velocity_m_s * gm_earth + moon.velocity_m_s * gm_moon) / total,
        );
        Ok(())
    }

    fn apply_event(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        debug!("applying event for {} at {}", event.target, event.epoch);
        if self.heliocentric.contains(event.target) {
            // Exact overwrite; the override also invalidates the multistep
            // history.
            return self
                .heliocentric
                .override_state(event.target, event.state)
                .map_err(|source| SimulationError::Dynamics {
                    action: "applying a scheduled event",
                    source,
                });
        }
        for subsystem in self.subsystems.values_mut() {
            if subsystem.contains(event.target) {
                let planet = self
                    .heliocentric
                    .state_of(subsystem.planet_id())
                    .ok_or(SimulationError::UnknownParticle {
                        id: subsystem.planet_id(),
                    })?;
                return subsystem
                    .override_local_state(event.target, event.state - planet)
                    .map_err(|source| SimulationError::Dynamics {
                        action: "applying a scheduled event in a subsystem",
                        source,
                    });
            }
        }
        Err(SimulationError::UnknownParticle { id: event.target })
    }
}
